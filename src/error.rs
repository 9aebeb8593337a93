//! Error types for the ctgpdx crate

use thiserror::Error;

/// Result type for ctgpdx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ctgpdx operations
#[derive(Debug, Error)]
pub enum Error {
    /// An update cycle failed (fetch or parse)
    #[error("Update failed: {0}")]
    Update(String),

    /// Reading a local document failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}
