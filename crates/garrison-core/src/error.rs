//! Error types for Garrison

use thiserror::Error;

/// The main error type for Garrison operations
#[derive(Debug, Error)]
pub enum GarrisonError {
    #[error("Script file unavailable: {path}: {source}")]
    ScriptUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No script file associated with this document")]
    NoScriptPath,

    #[error("Point not found: index {0}")]
    PointNotFound(usize),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Workspace error: {0}")]
    WorkspaceError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Garrison operations
pub type Result<T> = std::result::Result<T, GarrisonError>;

impl From<toml::de::Error> for GarrisonError {
    fn from(err: toml::de::Error) -> Self {
        GarrisonError::TomlParseError(err.to_string())
    }
}
