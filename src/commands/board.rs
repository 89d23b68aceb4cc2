use super::{open_repository, print_json};
use crate::board::{BoardAction, GroupBy};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::controller::BoardController;
use crate::display::render_board;
use crate::error::Result;
use crate::types::Priority;

/// Filters and grouping requested on the command line
#[derive(Debug, Clone, Default)]
pub struct BoardOptions {
    pub priority: Option<Priority>,
    pub search: Option<String>,
    /// Overrides `swimlanes.group_by` from the config
    pub group_by: Option<GroupBy>,
}

/// Render the board
pub async fn cmd_board(options: BoardOptions, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let repo = open_repository()?;
    let mut controller = BoardController::from_config(repo, &config).await?;

    if let Some(group_by) = options.group_by {
        controller.dispatch(BoardAction::SetGroupBy(group_by));
    }
    controller.dispatch(BoardAction::SetPriorityFilter(options.priority));
    if let Some(search) = options.search {
        controller.dispatch(BoardAction::UpdateSearch(search));
    }

    let vm = controller.view_model();
    tracing::debug!(
        total = vm.total_items,
        shown = vm.total_filtered,
        "rendering board"
    );

    if output.json {
        print_json(&vm)
    } else {
        println!("{}", render_board(&vm));
        Ok(())
    }
}
