use crate::auth::{clear_stored_session, load_stored_session, session_gate};
use crate::cli::AuthCommands;
use crate::commands::common::resolve_client_config;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Login {
            profile,
            email,
            password,
        } => {
            let (profile_name, config) =
                resolve_client_config(profile.as_deref().or(global_profile))?;
            let mut gate = session_gate(&profile_name, &config)
                .map_err(|error| CliError::Auth(error.to_string()))?;
            let state = gate
                .sign_in(&email, &password)
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
            let email_label = state.user_email().unwrap_or("(no email)");
            println!("Signed in profile '{profile_name}' as {email_label}");
            Ok(())
        }
        AuthCommands::Status { profile } => {
            let profile = profile.as_deref().or(global_profile);
            let session = match resolve_client_config(profile) {
                Ok((profile_name, config)) => {
                    let mut gate = session_gate(&profile_name, &config)
                        .map_err(|error| CliError::Auth(error.to_string()))?;
                    gate.restore().await;
                    (profile_name, gate.session().cloned())
                }
                Err(error) => {
                    tracing::debug!("Reading stored session without config: {}", error);
                    let profile_name = resolve_profile_name(profile)?;
                    let session = load_stored_session(&profile_name)
                        .map_err(|error| CliError::Auth(error.to_string()))?;
                    (profile_name, session)
                }
            };

            match session {
                (profile_name, Some(session)) => {
                    let email_label = session.user.email.as_deref().unwrap_or("(no email)");
                    println!(
                        "Profile '{}' is signed in as {} (expires_at={})",
                        profile_name, email_label, session.expires_at
                    );
                }
                (profile_name, None) => println!("Profile '{profile_name}' is not signed in."),
            }
            Ok(())
        }
        AuthCommands::Logout { profile } => {
            let profile = profile.as_deref().or(global_profile);
            let profile_name = if let Ok((profile_name, config)) = resolve_client_config(profile) {
                let mut gate = session_gate(&profile_name, &config)
                    .map_err(|error| CliError::Auth(error.to_string()))?;
                gate.restore().await;
                gate.logout().await;
                profile_name
            } else {
                let profile_name = resolve_profile_name(profile)?;
                clear_stored_session(&profile_name)
                    .map_err(|error| CliError::Auth(error.to_string()))?;
                profile_name
            };

            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
    }
}

fn resolve_profile_name(profile: Option<&str>) -> Result<String, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    Ok(config.resolve_profile_name(profile))
}
