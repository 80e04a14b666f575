use jotter_core::config::{ClientConfig, ResolvedClientConfig};
use jotter_core::util::normalize_text_option;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::commands::common::resolve_client_config;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

/// Resolved profile config as printed by `config show`. The API key is masked.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProfileSummary {
    pub profile: String,
    pub api_base_url: String,
    pub auth_url: String,
    pub api_key: String,
    pub collection: String,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_url,
            auth_url,
            api_key,
            collection,
            no_activate,
        } => {
            let explicit = ClientConfig {
                api_base_url: api_url,
                auth_url,
                api_key,
                collection,
            };
            run_config_init(profile.as_deref().or(global_profile), explicit, no_activate)
        }
        ConfigCommands::Show { profile } => {
            let (profile_name, config) =
                resolve_client_config(profile.as_deref().or(global_profile))?;
            let summary = profile_summary(&profile_name, &config);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}

/// Write a profile from explicit flags, falling back to the environment and
/// then to what the profile already holds.
pub fn run_config_init(
    profile_name: Option<&str>,
    explicit: ClientConfig,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing = config
        .profile(&profile_name)
        .map(CliProfile::client_config)
        .unwrap_or_default();

    let merged = merge_profile_values(explicit, ClientConfig::from_env(), existing);
    validate_profile_urls(&merged)?;
    *config.profile_mut_or_default(&profile_name) = CliProfile::from(merged.clone());

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let missing_fields = missing_fields(&merged);
    if missing_fields.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Run `jotter auth login --email <email> --password <password>`."
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

pub fn merge_profile_values(
    explicit: ClientConfig,
    environment: ClientConfig,
    existing: ClientConfig,
) -> ClientConfig {
    explicit.merge(environment).merge(existing)
}

pub fn missing_fields(config: &ClientConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.api_base_url.is_none() {
        missing.push("api_url");
    }
    if config.api_key.is_none() {
        missing.push("api_key");
    }
    missing
}

fn validate_profile_urls(config: &ClientConfig) -> Result<(), CliError> {
    let urls = [
        ("api_url", config.api_base_url.clone()),
        ("auth_url", config.auth_url.clone()),
    ];
    for (field, value) in urls {
        if let Some(url) = normalize_text_option(value) {
            if !jotter_core::util::is_http_url(&url) {
                return Err(CliError::Config(format!(
                    "{field} must include http:// or https://"
                )));
            }
        }
    }
    Ok(())
}

pub fn profile_summary(profile_name: &str, config: &ResolvedClientConfig) -> ProfileSummary {
    ProfileSummary {
        profile: profile_name.to_string(),
        api_base_url: config.api_base_url.clone(),
        auth_url: config.auth_url.clone(),
        api_key: mask_secret(&config.api_key),
        collection: config.collection.clone(),
    }
}

pub fn mask_secret(value: &str) -> String {
    let visible = value.chars().take(4).collect::<String>();
    if value.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
