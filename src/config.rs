//! Top-level application configuration.
//!
//! Configuration is stored in `.planner/config.yaml` and includes:
//! - The board type to load items for
//! - Drag activation distance
//! - Default swimlane grouping
//! - Whether moves patch the local snapshot before the write completes

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::board::GroupBy;
use crate::board::drag::DEFAULT_ACTIVATION_DISTANCE;
use crate::error::{PlannerError, Result};
use crate::paths::planner_root;
use crate::types::KANBAN_BOARD;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Board type whose items are loaded (default: kanban)
    #[serde(default = "default_board_type")]
    pub board_type: String,

    /// Drag sensor configuration
    #[serde(default, skip_serializing_if = "DragConfig::is_default")]
    pub drag: DragConfig,

    /// Swimlane configuration
    #[serde(default, skip_serializing_if = "SwimlaneConfig::is_default")]
    pub swimlanes: SwimlaneConfig,

    /// Move handling configuration
    #[serde(default, skip_serializing_if = "MoveConfig::is_default")]
    pub moves: MoveConfig,
}

fn default_board_type() -> String {
    KANBAN_BOARD.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_type: default_board_type(),
            drag: DragConfig::default(),
            swimlanes: SwimlaneConfig::default(),
            moves: MoveConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer travel in pixels before a press becomes a drag (default: 8)
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f64,
}

fn default_activation_distance() -> f64 {
    DEFAULT_ACTIVATION_DISTANCE
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
        }
    }
}

impl DragConfig {
    pub fn is_default(&self) -> bool {
        self.activation_distance == default_activation_distance()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwimlaneConfig {
    /// Grouping used when none is requested (default: none)
    #[serde(default)]
    pub group_by: GroupBy,
}

impl SwimlaneConfig {
    pub fn is_default(&self) -> bool {
        self.group_by == GroupBy::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveConfig {
    /// Patch the local snapshot before the write completes, rolling back on
    /// failure (default: true)
    #[serde(default = "default_optimistic")]
    pub optimistic: bool,
}

fn default_optimistic() -> bool {
    true
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            optimistic: default_optimistic(),
        }
    }
}

impl MoveConfig {
    pub fn is_default(&self) -> bool {
        self.optimistic == default_optimistic()
    }
}

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "board_type",
    "drag.activation_distance",
    "swimlanes.group_by",
    "moves.optimistic",
];

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        planner_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            PlannerError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            PlannerError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.drag.activation_distance.is_finite() || self.drag.activation_distance < 0.0 {
            return Err(PlannerError::Config(format!(
                "drag.activation_distance must be a non-negative number, got {}",
                self.drag.activation_distance
            )));
        }
        if self.board_type.trim().is_empty() {
            return Err(PlannerError::Config("board_type must not be empty".to_string()));
        }
        Ok(())
    }

    /// Read a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "board_type" => Ok(self.board_type.clone()),
            "drag.activation_distance" => Ok(self.drag.activation_distance.to_string()),
            "swimlanes.group_by" => Ok(self.swimlanes.group_by.to_string()),
            "moves.optimistic" => Ok(self.moves.optimistic.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a single value by dotted key, validating it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "board_type" => {
                self.board_type = value.to_string();
            }
            "drag.activation_distance" => {
                self.drag.activation_distance = value.parse::<f64>().map_err(|_| {
                    PlannerError::Config(format!(
                        "invalid value '{value}' for drag.activation_distance. Expected a number"
                    ))
                })?;
            }
            "swimlanes.group_by" => {
                self.swimlanes.group_by = value.parse()?;
            }
            "moves.optimistic" => {
                self.moves.optimistic = value.parse::<bool>().map_err(|_| {
                    PlannerError::Config(format!(
                        "invalid value '{value}' for moves.optimistic. Expected: true or false"
                    ))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        self.validate()
    }
}

fn unknown_key(key: &str) -> PlannerError {
    // Catch `drag_activation_distance` style keys and suggest the dotted form
    if let Some(suggestion) = CONFIG_KEYS
        .iter()
        .find(|k| k.replace('.', "_") == key && **k != key)
    {
        return PlannerError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{suggestion}'"
        ));
    }
    PlannerError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.board_type, "kanban");
        assert_eq!(config.drag.activation_distance, 8.0);
        assert_eq!(config.swimlanes.group_by, GroupBy::None);
        assert!(config.moves.optimistic);
    }

    #[test]
    fn test_default_config_serializes_minimally() {
        let yaml = serde_yaml_ng::to_string(&Config::default()).unwrap();
        assert_eq!(yaml.trim(), "board_type: kanban");
    }

    #[test]
    fn test_config_partial_yaml() {
        let yaml = r#"
swimlanes:
  group_by: employee
"#;
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.swimlanes.group_by, GroupBy::Employee);
        assert_eq!(config.board_type, "kanban");
        assert!(config.moves.optimistic);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.set("moves.optimistic", "false").unwrap();
        config.set("drag.activation_distance", "12").unwrap();

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let loaded: Config = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("drag.activation_distance").unwrap(), "12");
    }

    #[test]
    fn test_config_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("moves.optimistic", "maybe").is_err());
        assert!(config.set("swimlanes.group_by", "team").is_err());
        assert!(config.set("drag.activation_distance", "-1").is_err());
    }

    #[test]
    fn test_config_underscore_key_hint() {
        let err = Config::default().get("moves_optimistic").unwrap_err();
        assert!(err.to_string().contains("moves.optimistic"));

        let err = Config::default().get("colour").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
    }
}
