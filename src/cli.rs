use clap::{Parser, Subcommand};

use crate::board::GroupBy;
use crate::board::swimlane::VALID_GROUP_BY;
use crate::commands::{
    BoardOptions, cmd_board, cmd_columns, cmd_config_get, cmd_config_set, cmd_config_show,
    cmd_init, cmd_move,
};
use crate::types::{Priority, VALID_PRIORITIES};

/// Output format shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Kanban board for field-service planning")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the planner directory with default columns
    Init {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the board
    #[command(visible_alias = "b")]
    Board {
        /// Only show items with this priority: low, medium, high, urgent
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,

        /// Swimlane grouping: none, employee (default: from config)
        #[arg(short, long, value_parser = parse_group_by)]
        group_by: Option<GroupBy>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List columns with item counts
    Columns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move an item to another column
    #[command(name = "move", visible_alias = "mv")]
    Move {
        /// Item ID
        id: String,

        /// Target column key
        column: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Display current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single value
    Get {
        /// Key in dot notation, e.g. moves.optimistic
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a value
    Set {
        /// Key in dot notation, e.g. swimlanes.group_by
        key: String,

        /// New value
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> crate::error::Result<()> {
        match self {
            Commands::Init { json } => cmd_init(OutputOptions { json }).await,
            Commands::Board {
                priority,
                search,
                group_by,
                json,
            } => {
                cmd_board(
                    BoardOptions {
                        priority,
                        search,
                        group_by,
                    },
                    OutputOptions { json },
                )
                .await
            }
            Commands::Columns { json } => cmd_columns(OutputOptions { json }).await,
            Commands::Move { id, column, json } => {
                cmd_move(&id, &column, OutputOptions { json }).await
            }
            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(OutputOptions { json }),
                ConfigAction::Get { key, json } => cmd_config_get(&key, OutputOptions { json }),
                ConfigAction::Set { key, value, json } => {
                    cmd_config_set(&key, &value, OutputOptions { json })
                }
            },
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        VALID_PRIORITIES,
    )
}

fn parse_group_by(s: &str) -> Result<GroupBy, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "grouping",
        VALID_GROUP_BY,
    )
}
