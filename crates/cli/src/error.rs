//! Error types for the query runner.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runner operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Runner error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Query parsing, planning or execution failed.
    #[error("{0}")]
    Query(relq_core::Error),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file contents could not be parsed.
    #[error("{}: {error}", path.display())]
    TableFile {
        path: PathBuf,
        error: relq_core::Error,
    },

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("cannot serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl CliError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the engine error, if this is one.
    pub fn query_error(&self) -> Option<&relq_core::Error> {
        match self {
            CliError::Query(e) | CliError::TableFile { error: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl From<relq_core::Error> for CliError {
    fn from(e: relq_core::Error) -> Self {
        CliError::Query(e)
    }
}
