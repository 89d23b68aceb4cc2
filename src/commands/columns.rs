use serde_json::json;

use super::{CommandOutput, open_repository};
use crate::board::column_items;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::controller::BoardController;
use crate::display::columns_table;
use crate::error::Result;

/// List the board's columns with their current (unfiltered) card counts
pub async fn cmd_columns(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let repo = open_repository()?;
    let controller = BoardController::from_config(repo, &config).await?;

    let snapshot = controller.snapshot();
    let items = controller.items();
    let counts: Vec<usize> = snapshot
        .columns
        .iter()
        .map(|c| column_items(&items, &c.column_key).len())
        .collect();

    let json_columns: Vec<_> = snapshot
        .columns
        .iter()
        .zip(&counts)
        .map(|(c, count)| {
            json!({
                "column_key": c.column_key,
                "column_name": c.column_name,
                "color": c.color,
                "wip_limit": c.wip_limit,
                "item_count": count,
            })
        })
        .collect();

    let text = if snapshot.columns.is_empty() {
        "No columns defined".to_string()
    } else {
        columns_table(&snapshot.columns, &counts)
    };

    CommandOutput::new(json!(json_columns))
        .with_text(text)
        .print(output)
}
