mod board;
mod columns;
mod config;
mod init;
mod move_item;

pub use board::{BoardOptions, cmd_board};
pub use columns::cmd_columns;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use init::cmd_init;
pub use move_item::cmd_move;

use std::sync::Arc;

use serde::Serialize;

use crate::cli::OutputOptions;
use crate::error::{PlannerError, Result};
use crate::repository::FileRepository;

/// Output of a command: a JSON value plus an optional text rendering
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        CommandOutput { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print as JSON when requested, otherwise as text (falling back to JSON)
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Pretty-print any serializable value to stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Open the planner directory, failing if `planner init` has not been run
fn open_repository() -> Result<Arc<FileRepository>> {
    let repo = FileRepository::from_env();
    if !repo.exists() {
        return Err(PlannerError::NotInitialized(repo.root().to_path_buf()));
    }
    Ok(Arc::new(repo))
}
