//! Single-slot edit session.

use crate::models::{Note, NoteId};

/// Which note, if any, is being edited, plus its unsaved draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing_id: Option<NoteId>,
    edit_content: String,
}

impl EditSession {
    /// Start editing `note`, discarding any other draft.
    pub fn start(&mut self, note: &Note) {
        self.editing_id = Some(note.id.clone());
        self.edit_content = note.stored_content().to_string();
    }

    pub fn end(&mut self) {
        self.editing_id = None;
        self.edit_content.clear();
    }

    pub const fn editing_id(&self) -> Option<&NoteId> {
        self.editing_id.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.edit_content
    }

    pub const fn is_active(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn is_editing(&self, id: &NoteId) -> bool {
        self.editing_id.as_ref() == Some(id)
    }

    /// Replace the draft. Ignored when nothing is being edited.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        if self.editing_id.is_none() {
            return false;
        }
        self.edit_content = content.into();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteData;

    fn note(id: &str, content: &str) -> Note {
        Note::new(id, NoteData::new().with_content(content))
    }

    #[test]
    fn start_seeds_draft_from_note() {
        let mut edit = EditSession::default();
        edit.start(&note("n1", "hello"));
        assert!(edit.is_editing(&NoteId::from("n1")));
        assert_eq!(edit.content(), "hello");
    }

    #[test]
    fn start_on_note_without_content_seeds_empty_draft() {
        let mut edit = EditSession::default();
        edit.start(&Note::new("n1", NoteData::new().with_title("T")));
        assert!(edit.is_active());
        assert_eq!(edit.content(), "");
    }

    #[test]
    fn starting_another_note_discards_previous_draft() {
        let mut edit = EditSession::default();
        edit.start(&note("y", "old"));
        assert!(edit.set_content("unsaved change"));

        edit.start(&note("x", "other"));
        assert_eq!(edit.editing_id(), Some(&NoteId::from("x")));
        assert_eq!(edit.content(), "other");
    }

    #[test]
    fn end_resets_draft() {
        let mut edit = EditSession::default();
        edit.start(&note("n1", "hello"));
        edit.end();
        assert!(!edit.is_active());
        assert_eq!(edit.content(), "");
    }

    #[test]
    fn set_content_requires_active_session() {
        let mut edit = EditSession::default();
        assert!(!edit.set_content("lost"));
        assert_eq!(edit.content(), "");
    }
}
