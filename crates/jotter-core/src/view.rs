//! View model for note front-ends.
//!
//! Purely derived from the session and controller state; front-ends render it.

use chrono::{DateTime, Utc};

use crate::api::DocumentApi;
use crate::auth::SessionState;
use crate::controller::NoteListController;
use crate::models::NoteId;

/// Per-note action offered by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Edit,
    Delete,
    Save,
    Cancel,
}

const EDITING_CONTROLS: &[Control] = &[Control::Save, Control::Cancel];
const IDLE_CONTROLS: &[Control] = &[Control::Edit, Control::Delete];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
    /// Unsaved draft, present only for the note being edited.
    pub draft: Option<String>,
    pub controls: &'static [Control],
}

impl NoteRow {
    pub const fn is_editing(&self) -> bool {
        self.draft.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub user_email: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    SignIn,
    Empty(Header),
    Notes(Header, Vec<NoteRow>),
}

/// Choose what to show for the given session and controller state.
pub fn render_view<A: DocumentApi>(
    session: &SessionState,
    controller: &NoteListController<A>,
) -> View {
    if session.loading {
        return View::Loading;
    }
    if !session.authenticated {
        return View::SignIn;
    }
    if controller.is_loading() {
        return View::Loading;
    }

    let header = Header {
        user_email: session.user_email().map(str::to_string),
        error: controller.error().map(str::to_string),
    };
    if controller.notes().is_empty() {
        return View::Empty(header);
    }

    let edit = controller.edit_session();
    let rows = controller
        .notes()
        .iter()
        .map(|note| {
            let editing = edit.is_editing(&note.id);
            NoteRow {
                id: note.id.clone(),
                title: note.title().to_string(),
                content: note.content().to_string(),
                updated_at: note.updated_at,
                draft: editing.then(|| edit.content().to_string()),
                controls: if editing {
                    EDITING_CONTROLS
                } else {
                    IDLE_CONTROLS
                },
            }
        })
        .collect();
    View::Notes(header, rows)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::controller::tests::{note, signed_in, FakeDocumentApi};

    #[test]
    fn session_loading_shows_loading_indicator() {
        let controller = NoteListController::new(FakeDocumentApi::default(), "notes");
        assert_eq!(
            render_view(&SessionState::default(), &controller),
            View::Loading
        );
    }

    #[test]
    fn signed_out_shows_sign_in() {
        let controller = NoteListController::new(FakeDocumentApi::default(), "notes");
        assert_eq!(
            render_view(&SessionState::signed_out(), &controller),
            View::SignIn
        );
    }

    #[test]
    fn collection_load_in_flight_shows_loading_indicator() {
        let mut controller = NoteListController::new(FakeDocumentApi::default(), "notes");
        controller.begin_load();
        assert_eq!(render_view(&signed_in(), &controller), View::Loading);
    }

    #[tokio::test]
    async fn empty_collection_shows_prompt_with_error_banner() {
        let mut controller = NoteListController::new(FakeDocumentApi::default(), "notes");
        controller.api().fail_next("offline");
        controller.load().await;

        assert_eq!(
            render_view(&signed_in(), &controller),
            View::Empty(Header {
                user_email: Some("ada@example.com".to_string()),
                error: Some("offline".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn rows_offer_controls_by_edit_membership() {
        let api = FakeDocumentApi::with_documents(vec![
            note("n1", "Groceries", "milk"),
            note("n2", "Ideas", "rust"),
        ]);
        let mut controller = NoteListController::new(api, "notes");
        controller.load().await;
        controller.start_edit_by_id(&NoteId::from("n2"));
        controller.set_draft("rust 2024");

        let View::Notes(header, rows) = render_view(&signed_in(), &controller) else {
            panic!("expected note list");
        };

        assert_eq!(header.error, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].controls, &[Control::Edit, Control::Delete]);
        assert!(!rows[0].is_editing());
        assert_eq!(rows[1].controls, &[Control::Save, Control::Cancel]);
        assert_eq!(rows[1].draft.as_deref(), Some("rust 2024"));
        assert_eq!(rows[1].content, "rust");
    }
}
