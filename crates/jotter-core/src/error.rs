//! Error types for jotter-core

use thiserror::Error;

/// Result type alias using jotter-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jotter-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The document store rejected the request; carries its message verbatim
    #[error("{0}")]
    Api(String),

    /// No signed-in session is available for the request
    #[error("Not signed in")]
    NotAuthenticated,

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
