//! Common error types for zoomsite

use thiserror::Error;

/// Common result type for zoomsite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the zoomsite crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content repository file could not be parsed
    #[error("Content error: {0}")]
    Content(#[from] serde_json::Error),

    /// Requested section or category not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
