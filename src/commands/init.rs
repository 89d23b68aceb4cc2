use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::paths::{columns_path, items_path, staff_path, work_orders_path};
use crate::repository::FileRepository;
use crate::types::default_columns;

/// Create the planner directory with the default columns and empty sources
pub async fn cmd_init(output: OutputOptions) -> Result<()> {
    let repo = FileRepository::from_env();
    let created = repo.init(&default_columns()).await?;

    let config_path = Config::config_path();
    let wrote_config = !config_path.exists();
    if wrote_config {
        Config::default().save()?;
    }

    let files: Vec<String> = [
        columns_path(),
        items_path(),
        work_orders_path(),
        staff_path(),
        config_path,
    ]
    .iter()
    .map(|p| p.display().to_string())
    .collect();

    let root = repo.root().display().to_string();
    let text = if created || wrote_config {
        format!(
            "{} planner at {}",
            "Initialized".if_supports_color(Stream::Stdout, |t| t.green()),
            root
        )
    } else {
        format!("Planner already initialized at {root}")
    };

    CommandOutput::new(json!({
        "root": root,
        "created": created || wrote_config,
        "files": files,
    }))
    .with_text(text)
    .print(output)
}
