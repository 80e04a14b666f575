//! Interactive note list driven by the note list controller.

use std::io::{self, BufRead, Write};

use jotter_core::view::render_view;
use jotter_core::{HttpDocumentClient, NoteData, NoteId, NoteListController};

use crate::commands::common::{open_note_session, render_view_lines, NoteSession};
use crate::error::CliError;

const HELP_TEXT: &str = "\
Commands:
  list                 show the notes again
  new                  create an untitled note
  edit <n|id>          start editing a note
  draft <text>         replace the draft of the note being edited
  title <n|id> <text>  rename a note
  save                 save the draft
  cancel               leave edit mode without saving
  delete <n|id>        delete a note
  reload               fetch the collection again
  logout               sign out and leave the shell
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    New,
    Edit(String),
    Draft(String),
    Title { target: String, title: String },
    Save,
    Cancel,
    Delete(String),
    Reload,
    Logout,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_shell_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "new" | "add" => ShellCommand::New,
        "edit" => ShellCommand::Edit(required_argument(verb, rest)?),
        "draft" => ShellCommand::Draft(rest.to_string()),
        "title" => {
            let Some((target, title)) = rest.split_once(char::is_whitespace) else {
                return Err("usage: title <n|id> <text>".to_string());
            };
            ShellCommand::Title {
                target: target.to_string(),
                title: title.trim().to_string(),
            }
        }
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "delete" | "rm" => ShellCommand::Delete(required_argument(verb, rest)?),
        "reload" => ShellCommand::Reload,
        "logout" => ShellCommand::Logout,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type `help`.")),
    };
    Ok(Some(command))
}

fn required_argument(verb: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {verb} <n|id>"))
    } else {
        Ok(rest.to_string())
    }
}

/// Resolve a 1-based row number or an id (prefix) to a loaded note.
pub fn resolve_target(
    controller: &NoteListController<HttpDocumentClient>,
    target: &str,
) -> Result<NoteId, CliError> {
    if let Ok(index) = target.trim().parse::<usize>() {
        if let Some(note) = index
            .checked_sub(1)
            .and_then(|index| controller.notes().get(index))
        {
            return Ok(note.id.clone());
        }
    }
    Ok(controller.resolve_id(target)?.id.clone())
}

pub async fn run_shell(global_profile: Option<&str>) -> Result<(), CliError> {
    let mut session = open_note_session(global_profile).await?;
    session.controller.subscribe(|event| {
        tracing::debug!("Controller event: {:?}", event);
    });

    println!("Profile '{}'. Type `help` for commands.", session.profile_name);
    render(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("jotter> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_shell_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match execute(&mut session, command).await {
            Ok(Flow::Continue) => render(&session),
            Ok(Flow::Quiet) => {}
            Ok(Flow::Exit) => break,
            Err(error) => println!("Error: {error}"),
        }
    }

    Ok(())
}

enum Flow {
    Continue,
    Quiet,
    Exit,
}

async fn execute(session: &mut NoteSession, command: ShellCommand) -> Result<Flow, CliError> {
    let controller = &mut session.controller;
    match command {
        ShellCommand::List => {}
        ShellCommand::New => controller.create().await,
        ShellCommand::Edit(target) => {
            let id = resolve_target(controller, &target)?;
            controller.start_edit_by_id(&id);
        }
        ShellCommand::Draft(text) => {
            if !controller.set_draft(text) {
                println!("Not editing a note. Use `edit <n>` first.");
                return Ok(Flow::Quiet);
            }
        }
        ShellCommand::Title { target, title } => {
            let id = resolve_target(controller, &target)?;
            controller.update(&id, NoteData::new().with_title(title)).await;
        }
        ShellCommand::Save => {
            if !controller.edit_session().is_active() {
                println!("Not editing a note.");
                return Ok(Flow::Quiet);
            }
            controller.save_edit().await;
        }
        ShellCommand::Cancel => controller.cancel_edit(),
        ShellCommand::Delete(target) => {
            let id = resolve_target(controller, &target)?;
            controller.delete(&id).await;
        }
        ShellCommand::Reload => controller.load().await,
        ShellCommand::Logout => {
            let state = session.gate.logout().await;
            session.controller.handle_session(&state).await;
            render(session);
            return Ok(Flow::Exit);
        }
        ShellCommand::Help => {
            println!("{HELP_TEXT}");
            return Ok(Flow::Quiet);
        }
        ShellCommand::Quit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

fn render(session: &NoteSession) {
    let view = render_view(&session.gate.state(), &session.controller);
    for line in render_view_lines(&view) {
        println!("{line}");
    }
}
