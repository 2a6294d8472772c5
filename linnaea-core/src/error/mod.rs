//! Core error types for Linnaea

use thiserror::Error;

/// Main error type for Linnaea operations
#[derive(Error, Debug)]
pub enum LinnaeaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Linnaea operations
pub type LinnaeaResult<T> = Result<T, LinnaeaError>;

// Conversion implementations for common error types
impl From<serde_json::Error> for LinnaeaError {
    fn from(err: serde_json::Error) -> Self {
        LinnaeaError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for LinnaeaError {
    fn from(err: anyhow::Error) -> Self {
        LinnaeaError::Other(err.to_string())
    }
}
