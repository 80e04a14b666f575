//! jotter-core - Core library for Jotter
//!
//! This crate contains the note model, the identity and document store
//! clients, and the note list controller shared by Jotter front-ends.

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod util;
pub mod view;

pub use api::{DocumentApi, DocumentList, HttpDocumentClient};
pub use controller::{ControllerEvent, EditSession, NoteListController};
pub use error::{Error, Result};
pub use models::{Note, NoteData, NoteId};
