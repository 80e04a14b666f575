use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jotter_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Edited note content cannot be empty")]
    EmptyEditedContent,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Not signed in. Run `jotter auth login --email <EMAIL> --password <PASSWORD>` first.")]
    NotSignedIn,
    /// A note operation failed; the message was already recorded by the controller.
    #[error("{0}")]
    Operation(String),
}
