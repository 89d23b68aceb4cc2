//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set and persist a value

use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;

    let mut text = format!(
        "{}\n",
        "Configuration:".if_supports_color(Stream::Stdout, |t| t.bold())
    );
    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        text.push_str(&format!(
            "  {}: {}\n",
            key.if_supports_color(Stream::Stdout, |t| t.cyan()),
            value
        ));
    }
    text.push_str(&format!(
        "\nFile: {}",
        Config::config_path()
            .display()
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
    ));

    CommandOutput::new(serde_json::to_value(&config)?)
        .with_text(text)
        .print(output)
}

/// Print one configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let value = Config::load()?.get(key)?;
    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value)
        .print(output)
}

/// Set a configuration value and save it
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    CommandOutput::new(json!({
        "key": key,
        "value": stored,
        "action": "set",
    }))
    .with_text(format!(
        "Set {} = {}",
        key.if_supports_color(Stream::Stdout, |t| t.cyan()),
        stored
    ))
    .print(output)
}
