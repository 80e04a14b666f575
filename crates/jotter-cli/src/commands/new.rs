use crate::commands::common::{ensure_succeeded, open_note_session};
use crate::error::CliError;

pub async fn run_new(global_profile: Option<&str>) -> Result<(), CliError> {
    let mut session = open_note_session(global_profile).await?;
    ensure_succeeded(&session.controller)?;

    session.controller.create().await;
    ensure_succeeded(&session.controller)?;

    if let Some(note) = session.controller.notes().first() {
        println!("{}", note.id);
    }
    Ok(())
}
