//! Data models for Jotter

mod note;

pub use note::{Note, NoteData, NoteId, DEFAULT_CONTENT, DEFAULT_TITLE, NEW_NOTE_CONTENT};
