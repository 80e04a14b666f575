//! Note list controller.
//!
//! Owns the in-memory note list and mediates every mutation between the view
//! and the remote [`DocumentApi`]. Remote calls always go first; local state is
//! patched only once a call has succeeded, so a failure never leaves a partial
//! change behind.
//!
//! Each mutating operation is split into the remote request and an `apply_*`
//! step taking the request's result. The async wrappers (`load`, `create`,
//! ...) simply do both. A driver that issues several requests at once can call
//! the `apply_*` steps itself as responses arrive, in completion order.

use crate::api::{DocumentApi, DocumentList};
use crate::auth::SessionState;
use crate::error::{Error, Result};
use crate::models::{Note, NoteData, NoteId};

mod edit;

pub use edit::EditSession;

/// State-change notification sent to listeners after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    Loading,
    Loaded { count: usize },
    Created(NoteId),
    Updated(NoteId),
    Deleted(NoteId),
    EditChanged(Option<NoteId>),
    Failed(String),
    Reset,
}

type Listener = Box<dyn Fn(&ControllerEvent) + Send + Sync>;

pub struct NoteListController<A: DocumentApi> {
    api: A,
    collection: String,
    notes: Vec<Note>,
    loading: bool,
    error: Option<String>,
    edit: EditSession,
    authenticated: bool,
    listeners: Vec<Listener>,
}

impl<A: DocumentApi> NoteListController<A> {
    pub fn new(api: A, collection: impl Into<String>) -> Self {
        Self {
            api,
            collection: collection.into(),
            notes: Vec::new(),
            loading: false,
            error: None,
            edit: EditSession::default(),
            authenticated: false,
            listeners: Vec::new(),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Most recent failure message, cleared by the next successful operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ControllerEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// React to a session change: load on sign-in, drop everything on sign-out.
    pub async fn handle_session(&mut self, session: &SessionState) {
        if session.loading {
            return;
        }

        if session.authenticated {
            if !self.authenticated {
                self.authenticated = true;
                self.load().await;
            }
        } else if self.authenticated || !self.notes.is_empty() {
            self.authenticated = false;
            self.reset();
        }
    }

    /// Discard the list, the edit session and any error.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.edit.end();
        self.error = None;
        self.loading = false;
        tracing::info!("Note list reset");
        self.emit(&ControllerEvent::Reset);
    }

    pub async fn load(&mut self) {
        self.begin_load();
        let result = self.api.read_documents(&self.collection).await;
        self.apply_loaded(result);
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.emit(&ControllerEvent::Loading);
    }

    pub fn apply_loaded(&mut self, result: Result<DocumentList>) {
        self.loading = false;
        match result {
            Ok(list) => {
                self.notes = list.into_notes();
                self.error = None;
                self.drop_stale_edit();
                tracing::info!(
                    "Loaded {} notes from '{}'",
                    self.notes.len(),
                    self.collection
                );
                self.emit(&ControllerEvent::Loaded {
                    count: self.notes.len(),
                });
            }
            Err(error) => self.fail("load notes", &error),
        }
    }

    pub async fn create(&mut self) {
        let result = self
            .api
            .create_document(&self.collection, &NoteData::new_note_template())
            .await;
        self.apply_created(result);
    }

    pub fn apply_created(&mut self, result: Result<Note>) {
        match result {
            Ok(note) => {
                let id = note.id.clone();
                self.notes.insert(0, note);
                self.error = None;
                tracing::info!("Created note {}", id);
                self.emit(&ControllerEvent::Created(id));
            }
            Err(error) => self.fail("create note", &error),
        }
    }

    pub async fn update(&mut self, id: &NoteId, updates: NoteData) {
        let result = self.api.update_document(id, &updates).await;
        self.apply_updated(id, &updates, result);
    }

    /// On success merge `updates` into the cached note and leave edit mode.
    /// On failure nothing changes, edit mode included.
    pub fn apply_updated(&mut self, id: &NoteId, updates: &NoteData, result: Result<()>) {
        match result {
            Ok(()) => {
                if let Some(note) = self.notes.iter_mut().find(|note| &note.id == id) {
                    note.data.merge(updates);
                }
                self.error = None;
                self.end_edit();
                tracing::info!("Updated note {}", id);
                self.emit(&ControllerEvent::Updated(id.clone()));
            }
            Err(error) => self.fail("update note", &error),
        }
    }

    pub async fn delete(&mut self, id: &NoteId) {
        let result = self.api.delete_document(id).await;
        self.apply_deleted(id, result);
    }

    pub fn apply_deleted(&mut self, id: &NoteId, result: Result<()>) {
        match result {
            Ok(()) => {
                self.notes.retain(|note| &note.id != id);
                self.error = None;
                if self.edit.is_editing(id) {
                    self.end_edit();
                }
                tracing::info!("Deleted note {}", id);
                self.emit(&ControllerEvent::Deleted(id.clone()));
            }
            Err(error) => self.fail("delete note", &error),
        }
    }

    /// Enter edit mode for `note`, replacing any other edit in progress.
    ///
    /// Returns `false` when the note is not in the current list.
    pub fn start_edit(&mut self, note: &Note) -> bool {
        if self.note(&note.id).is_none() {
            return false;
        }
        self.edit.start(note);
        self.emit(&ControllerEvent::EditChanged(Some(note.id.clone())));
        true
    }

    pub fn start_edit_by_id(&mut self, id: &NoteId) -> bool {
        let Some(note) = self.note(id).cloned() else {
            return false;
        };
        self.start_edit(&note)
    }

    pub fn cancel_edit(&mut self) {
        if self.edit.is_active() {
            self.end_edit();
        }
    }

    pub fn set_draft(&mut self, content: impl Into<String>) -> bool {
        self.edit.set_content(content)
    }

    /// Send the current draft as the note's new content.
    pub async fn save_edit(&mut self) {
        let Some(id) = self.edit.editing_id().cloned() else {
            return;
        };
        let updates = NoteData::new().with_content(self.edit.content());
        self.update(&id, updates).await;
    }

    /// Find a loaded note by full id or unique id prefix.
    pub fn resolve_id(&self, query: &str) -> Result<&Note> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("note id must not be empty".to_string()));
        }
        if let Some(note) = self.notes.iter().find(|note| note.id.as_str() == query) {
            return Ok(note);
        }

        let matches = self
            .notes
            .iter()
            .filter(|note| note.id.as_str().starts_with(query))
            .collect::<Vec<_>>();
        match matches.as_slice() {
            [] => Err(Error::NotFound(query.to_string())),
            [note] => Ok(note),
            _ => {
                let options = matches
                    .iter()
                    .take(3)
                    .map(|note| note.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::InvalidInput(format!(
                    "ID prefix '{query}' is ambiguous; matches: {options}"
                )))
            }
        }
    }

    fn end_edit(&mut self) {
        self.edit.end();
        self.emit(&ControllerEvent::EditChanged(None));
    }

    fn drop_stale_edit(&mut self) {
        let stale = self
            .edit
            .editing_id()
            .is_some_and(|id| !self.notes.iter().any(|note| &note.id == id));
        if stale {
            self.end_edit();
        }
    }

    fn fail(&mut self, operation: &str, error: &Error) {
        let message = error.to_string();
        tracing::warn!("Failed to {}: {}", operation, message);
        self.error = Some(message.clone());
        self.emit(&ControllerEvent::Failed(message));
    }

    fn emit(&self, event: &ControllerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}
