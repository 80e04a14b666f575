use jotter_core::NoteData;

use crate::commands::common::{
    capture_editor_input_with_initial, ensure_succeeded, normalize_note_identifier,
    open_note_session,
};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<String>,
    content: Option<String>,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut session = open_note_session(global_profile).await?;
    ensure_succeeded(&session.controller)?;
    let note = session.controller.resolve_id(&normalized_id)?.clone();

    if let Some(updates) = field_updates(title, content) {
        session.controller.update(&note.id, updates).await;
        ensure_succeeded(&session.controller)?;
        println!("{}", note.id);
        return Ok(());
    }

    let Some(edited_content) = capture_editor_input_with_initial(note.stored_content())? else {
        return Err(CliError::EmptyEditedContent);
    };
    if edited_content == note.stored_content() {
        println!("{}", note.id);
        return Ok(());
    }

    session.controller.start_edit(&note);
    session.controller.set_draft(edited_content);
    session.controller.save_edit().await;
    ensure_succeeded(&session.controller)?;

    println!("{}", note.id);
    Ok(())
}

/// Build the update sent for `--title`/`--content`, or `None` when neither was given.
pub fn field_updates(title: Option<String>, content: Option<String>) -> Option<NoteData> {
    if title.is_none() && content.is_none() {
        return None;
    }

    let mut updates = NoteData::new();
    if let Some(title) = title {
        updates = updates.with_title(title);
    }
    if let Some(content) = content {
        updates = updates.with_content(content);
    }
    Some(updates)
}
