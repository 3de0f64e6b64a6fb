//! Error types for the converter

use std::path::PathBuf;

use thiserror::Error;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Converter and project store errors
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("`{0}` is reserved and can't be used as a project's name")]
    ReservedName(String),

    #[error("Invalid directory selector `{0}`: expected `in` or `out`")]
    InvalidDirection(String),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ConvertError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
