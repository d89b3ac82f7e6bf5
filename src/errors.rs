//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for roadwatch operations
///
/// Only [`Error::InputUnavailable`] stops a pipeline run. An empty filter
/// result is not an error, and malformed records are logged and kept.
#[derive(Debug, Error)]
pub enum Error {
    /// Source table missing or unreadable
    #[error("Input unavailable: {}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table could not be parsed into segment records (missing column, wrong type)
    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: u64, message: String },

    /// Filter criteria that cannot describe a valid IRI range
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV errors not tied to a specific record
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an input-unavailable error for the given path
    pub fn input_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-input error
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid-criteria error
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::InvalidCriteria(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error means the pipeline could not run at all
    pub fn is_input_unavailable(&self) -> bool {
        matches!(self, Self::InputUnavailable { .. })
    }
}
