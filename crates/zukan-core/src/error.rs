//! Error types for zukan-core

use thiserror::Error;

/// Result type alias using zukan-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in zukan-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Data collaborator (note store) error
    #[error("Data store error: {0}")]
    Data(String),

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Auth error
    #[error("Auth error: {0}")]
    Auth(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
