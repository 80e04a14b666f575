//! Remote document store interface.
//!
//! The note list controller only needs the four calls below; wire details
//! belong to the implementation (see [`HttpDocumentClient`]).

use serde::{Deserialize, Serialize};

use crate::models::{Note, NoteData, NoteId};
use crate::Result;

mod http;

pub use http::HttpDocumentClient;

/// Response of a collection read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Option<Vec<Note>>,
}

impl DocumentList {
    pub fn into_notes(self) -> Vec<Note> {
        self.documents.unwrap_or_default()
    }
}

/// Client for a remote document store.
///
/// Every call may fail with an error whose `Display` is the human-readable
/// message to show the user.
#[allow(async_fn_in_trait)]
pub trait DocumentApi {
    async fn read_documents(&self, collection: &str) -> Result<DocumentList>;

    async fn create_document(&self, collection: &str, data: &NoteData) -> Result<Note>;

    /// Apply a partial-field patch. Only success or failure matters.
    async fn update_document(&self, id: &NoteId, updates: &NoteData) -> Result<()>;

    async fn delete_document(&self, id: &NoteId) -> Result<()>;
}
