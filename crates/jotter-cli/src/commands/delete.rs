use crate::commands::common::{ensure_succeeded, normalize_note_identifier, open_note_session};
use crate::error::CliError;

pub async fn run_delete(id: &str, global_profile: Option<&str>) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut session = open_note_session(global_profile).await?;
    ensure_succeeded(&session.controller)?;

    let note_id = session.controller.resolve_id(&normalized_id)?.id.clone();
    session.controller.delete(&note_id).await;
    ensure_succeeded(&session.controller)?;

    println!("{note_id}");
    Ok(())
}
