use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use jotter_core::auth::SessionGate;
use jotter_core::config::{ClientConfig, ResolvedClientConfig};
use jotter_core::view::{Control, Header, NoteRow, View};
use jotter_core::{HttpDocumentClient, Note, NoteListController};
use serde::Serialize;

use crate::auth::{session_gate, SessionStore};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

/// Signed-in session plus a loaded note list.
pub struct NoteSession {
    pub profile_name: String,
    pub gate: SessionGate<SessionStore>,
    pub controller: NoteListController<HttpDocumentClient>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

/// Resolve the profile name and its validated client config.
///
/// Environment variables override values saved in the profile.
pub fn resolve_client_config(
    global_profile: Option<&str>,
) -> Result<(String, ResolvedClientConfig), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let saved = config
        .profile(&profile_name)
        .map(|profile| profile.client_config())
        .unwrap_or_default();

    let resolved = ClientConfig::from_env()
        .merge(saved)
        .resolve()
        .map_err(|error| {
            CliError::Config(format!(
                "Profile '{profile_name}': {error}. Run `jotter config init --profile {profile_name}` first."
            ))
        })?;
    Ok((profile_name, resolved))
}

/// Restore the stored session and load the note collection.
pub async fn open_note_session(global_profile: Option<&str>) -> Result<NoteSession, CliError> {
    let (profile_name, config) = resolve_client_config(global_profile)?;
    let mut gate =
        session_gate(&profile_name, &config).map_err(|error| CliError::Auth(error.to_string()))?;
    let state = gate.restore().await;
    let access_token = gate.access_token().ok_or(CliError::NotSignedIn)?;

    let api = HttpDocumentClient::from_config(&config, access_token)?;
    let mut controller = NoteListController::new(api, config.collection.clone());
    controller.handle_session(&state).await;

    tracing::debug!(
        "Opened collection '{}' for profile '{}'",
        config.collection,
        profile_name
    );
    Ok(NoteSession {
        profile_name,
        gate,
        controller,
    })
}

/// Turn the controller's recorded failure into a command error.
pub fn ensure_succeeded(controller: &NoteListController<HttpDocumentClient>) -> Result<(), CliError> {
    match controller.error() {
        Some(message) => Err(CliError::Operation(message.to_string())),
        None => Ok(()),
    }
}

pub fn format_note_lines(rows: &[NoteRow]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    rows.iter()
        .map(|row| {
            let short_id = short_id(row.id.as_str());
            let title = truncate_chars(&row.title, 24);
            let preview = note_preview(&row.content, 40);
            let relative_time = format_relative_time(row.updated_at.timestamp_millis(), now_ms);
            format!("{short_id:<13}  {title:<24}  {preview:<40}  {relative_time}")
        })
        .collect()
}

/// Render a view as plain text lines. Rows are numbered from 1.
pub fn render_view_lines(view: &View) -> Vec<String> {
    match view {
        View::Loading => vec!["Loading...".to_string()],
        View::SignIn => vec![
            "Not signed in.".to_string(),
            "Run `jotter auth login --email <EMAIL> --password <PASSWORD>` to continue."
                .to_string(),
        ],
        View::Empty(header) => {
            let mut lines = header_lines(header);
            lines.push("No notes yet. Create one with `new`.".to_string());
            lines
        }
        View::Notes(header, rows) => {
            let mut lines = header_lines(header);
            for (index, row) in rows.iter().enumerate() {
                lines.push(format!(
                    "{:>3}. {}  [{}]  {}",
                    index + 1,
                    row.title,
                    short_id(row.id.as_str()),
                    render_controls(row.controls)
                ));
                match &row.draft {
                    Some(draft) => {
                        for line in draft.lines() {
                            lines.push(format!("     > {line}"));
                        }
                        if draft.is_empty() {
                            lines.push("     >".to_string());
                        }
                    }
                    None => lines.push(format!("     {}", note_preview(&row.content, 60))),
                }
            }
            lines
        }
    }
}

fn header_lines(header: &Header) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(email) = &header.user_email {
        lines.push(format!("Signed in as {email}"));
    }
    if let Some(error) = &header.error {
        lines.push(format!("! {error}"));
    }
    lines
}

fn render_controls(controls: &[Control]) -> String {
    controls
        .iter()
        .map(|control| match control {
            Control::Edit => "[edit]",
            Control::Delete => "[delete]",
            Control::Save => "[save]",
            Control::Cancel => "[cancel]",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();
    NoteListItem {
        id: note.id.to_string(),
        title: note.title().to_string(),
        content: note.content().to_string(),
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(note.updated_at.timestamp_millis(), now_ms),
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn note_preview(content: &str, max_chars: usize) -> String {
    let first_line = content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = text.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("jotter-note-{}-{now}.md", std::process::id()))
}
