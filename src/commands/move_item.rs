use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{CommandOutput, open_repository};
use crate::board::{BoardAction, MoveDecision};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::controller::BoardController;
use crate::error::{PlannerError, Result};

/// Drop an item onto a column, the same way a completed drag would.
///
/// A skipped move is not an error; a failed write is.
pub async fn cmd_move(id: &str, column: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let repo = open_repository()?;
    let mut controller = BoardController::from_config(repo, &config).await?;

    // A column the board doesn't know is treated as dropping on nothing
    let over = controller.snapshot().has_column(column).then_some(column);
    if over.is_none() {
        tracing::warn!(column, "unknown column, drop has no target");
    }

    controller.dispatch(BoardAction::DragStart(id.to_string()));
    let outcome = controller.drop_item(id, over)?;

    if let Some(pending) = outcome.pending {
        pending
            .await
            .map_err(|e| PlannerError::Other(format!("move task failed: {e}")))??;
    }

    let text = match &outcome.decision {
        MoveDecision::Move(command) => format!(
            "{} {} -> {}",
            "Moved".if_supports_color(Stream::Stdout, |t| t.green()),
            command.id,
            command.column_id
        ),
        MoveDecision::Skip { reason } => format!(
            "{} {}: {}",
            "Skipped".if_supports_color(Stream::Stdout, |t| t.yellow()),
            id,
            reason
        ),
    };

    CommandOutput::new(json!({
        "id": id,
        "column": column,
        "decision": outcome.decision,
    }))
    .with_text(text)
    .print(output)
}
