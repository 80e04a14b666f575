//! Jotter CLI - keep notes in a remote document store from the terminal.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::new::run_new;
use crate::commands::shell::run_shell;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "jotter=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Some(Commands::List { json }) => run_list(json, profile).await?,
        Some(Commands::New) => run_new(profile).await?,
        Some(Commands::Edit { id, title, content }) => {
            run_edit(&id, title, content, profile).await?;
        }
        Some(Commands::Delete { id }) => run_delete(&id, profile).await?,
        Some(Commands::Shell) => run_shell(profile).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => run_config(command, profile)?,
        Some(Commands::Auth { command }) => run_auth(command, profile).await?,
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    match DEFAULT_LOG_DIRECTIVE.parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(error) => eprintln!("Ignoring log directive {DEFAULT_LOG_DIRECTIVE}: {error}"),
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
