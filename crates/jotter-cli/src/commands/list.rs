use jotter_core::view::{render_view, View};

use crate::commands::common::{
    ensure_succeeded, format_note_lines, note_to_list_item, open_note_session, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list(as_json: bool, global_profile: Option<&str>) -> Result<(), CliError> {
    let session = open_note_session(global_profile).await?;
    ensure_succeeded(&session.controller)?;

    if as_json {
        let json_items = session
            .controller
            .notes()
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    match render_view(&session.gate.state(), &session.controller) {
        View::Notes(_, rows) => {
            for line in format_note_lines(&rows) {
                println!("{line}");
            }
        }
        View::Empty(_) => println!("No notes yet."),
        View::SignIn => return Err(CliError::NotSignedIn),
        View::Loading => {}
    }

    Ok(())
}
