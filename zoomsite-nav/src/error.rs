//! Error types for zoomsite-nav
//!
//! Defines engine-specific error types using thiserror. Nothing in this
//! crate is fatal to the page: every failure degrades to a visible error
//! panel plus a log line, and the view state is never left inconsistent.

use thiserror::Error;

/// Main error type for the navigation engine
#[derive(Error, Debug)]
pub enum Error {
    /// Requested section or category absent from the content repository
    #[error("Not found: {0}")]
    NotFound(String),

    /// Navigation notification missing expected fields
    #[error("Malformed notification: {0}")]
    MalformedNotification(String),

    /// Panel renderer failed; a generic error panel is shown instead
    #[error("Render error: {0}")]
    Render(String),

    /// Content repository loading errors
    #[error("Content error: {0}")]
    Content(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zoomsite_common::Error> for Error {
    fn from(err: zoomsite_common::Error) -> Self {
        match err {
            zoomsite_common::Error::NotFound(msg) => Error::NotFound(msg),
            zoomsite_common::Error::Io(e) => Error::Io(e),
            zoomsite_common::Error::Config(msg) => Error::Config(msg),
            zoomsite_common::Error::Content(e) => Error::Content(e.to_string()),
            zoomsite_common::Error::InvalidInput(msg) => Error::Content(msg),
        }
    }
}

/// Convenience Result type using the engine Error
pub type Result<T> = std::result::Result<T, Error>;
