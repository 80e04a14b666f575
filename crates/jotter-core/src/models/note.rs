//! Note model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title shown for notes whose data has no `title` string.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Content shown for notes whose data has no `content` string.
pub const DEFAULT_CONTENT: &str = "No content";
/// Content of a freshly created note.
pub const NEW_NOTE_CONTENT: &str = "Start writing...";

/// A server-assigned note identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Free-form key-value record stored with a note.
///
/// Only `title` and `content` are interpreted; every other field is carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteData(Map<String, Value>);

impl NoteData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed template sent when creating a note.
    #[must_use]
    pub fn new_note_template() -> Self {
        Self::new()
            .with_title(DEFAULT_TITLE)
            .with_content(NEW_NOTE_CONTENT)
    }

    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with("title", Value::String(title.into()))
    }

    #[must_use]
    pub fn with_content(self, content: impl Into<String>) -> Self {
        self.with("content", Value::String(content.into()))
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: fields in `updates` overwrite, all others are retained.
    pub fn merge(&mut self, updates: &Self) {
        for (key, value) in &updates.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl From<Map<String, Value>> for NoteData {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// A note document as returned by the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub data: NoteData,
    #[serde(default, alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a note locally (mostly useful for tests and fixtures).
    pub fn new(id: impl Into<NoteId>, data: NoteData) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display title, falling back to [`DEFAULT_TITLE`].
    #[must_use]
    pub fn title(&self) -> &str {
        self.data.get_str("title").unwrap_or(DEFAULT_TITLE)
    }

    /// Display content, falling back to [`DEFAULT_CONTENT`].
    #[must_use]
    pub fn content(&self) -> &str {
        self.data.get_str("content").unwrap_or(DEFAULT_CONTENT)
    }

    /// Content as stored, empty when absent. Use this, not [`Note::content`],
    /// for anything written back to the document store.
    #[must_use]
    pub fn stored_content(&self) -> &str {
        self.data.get_str("content").unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn title_and_content_fall_back_to_defaults() {
        let note = Note::new("n1", NoteData::new());
        assert_eq!(note.title(), "Untitled");
        assert_eq!(note.content(), "No content");
    }

    #[test]
    fn non_string_fields_use_defaults() {
        let data: NoteData = serde_json::from_value(json!({"title": 7, "content": null})).unwrap();
        let note = Note::new("n1", data);
        assert_eq!(note.title(), "Untitled");
        assert_eq!(note.content(), "No content");
    }

    #[test]
    fn merge_overwrites_only_given_fields() {
        let mut data = NoteData::new()
            .with_title("Groceries")
            .with_content("milk")
            .with("pinned", json!(true));
        data.merge(&NoteData::new().with_content("hi"));

        assert_eq!(data.get_str("title"), Some("Groceries"));
        assert_eq!(data.get_str("content"), Some("hi"));
        assert_eq!(data.get("pinned"), Some(&json!(true)));
    }

    #[test]
    fn new_note_template_fields() {
        let template = NoteData::new_note_template();
        assert_eq!(template.get_str("title"), Some("Untitled"));
        assert_eq!(template.get_str("content"), Some("Start writing..."));
    }

    #[test]
    fn deserializes_camel_case_document() {
        let note: Note = serde_json::from_value(json!({
            "id": "n9",
            "data": {"title": "Untitled", "content": "Start writing...", "color": "red"},
            "createdAt": "2026-01-02T03:04:05Z",
            "updatedAt": "2026-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(note.id.as_str(), "n9");
        assert_eq!(note.title(), "Untitled");
        assert_eq!(note.data.get_str("color"), Some("red"));
        assert_eq!(note.created_at.to_rfc3339(), "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn deserializes_document_without_timestamps() {
        let note: Note = serde_json::from_value(json!({"id": "n1"})).unwrap();
        assert!(note.data.is_empty());
        assert_eq!(note.created_at.timestamp(), 0);
    }

    #[test]
    fn stored_content_has_no_display_fallback() {
        let note = Note::new("n1", NoteData::new().with_title("T"));
        assert_eq!(note.content(), "No content");
        assert_eq!(note.stored_content(), "");

        let note = Note::new("n2", NoteData::new().with_content("body"));
        assert_eq!(note.stored_content(), "body");
    }
}
