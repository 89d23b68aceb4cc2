use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("item '{0}' not found")]
    ItemNotFound(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid grouping mode '{0}'")]
    InvalidGroupBy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no planner directory at {0}. Run `planner init` first")]
    NotInitialized(std::path::PathBuf),

    #[error("moves must be issued from within a tokio runtime")]
    NoRuntime,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("repository error: {0}")]
    Repository(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
