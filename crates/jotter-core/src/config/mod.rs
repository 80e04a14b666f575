//! Client configuration.
//!
//! A `ClientConfig` names the document store, the identity service and the
//! collection notes live in. Values may come from flags, the environment or a
//! saved profile; `merge` layers them and `resolve` validates the result.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_COLLECTION: &str = "notes";

pub const ENV_API_URL: &str = "JOTTER_API_URL";
pub const ENV_AUTH_URL: &str = "JOTTER_AUTH_URL";
pub const ENV_API_KEY: &str = "JOTTER_API_KEY";
pub const ENV_COLLECTION: &str = "JOTTER_COLLECTION";

/// Partially specified client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Identity service URL; defaults to `api_base_url`.
    #[serde(default)]
    pub auth_url: Option<String>,
    /// Public API key sent with every request. Never a user secret.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

/// Fully validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClientConfig {
    pub api_base_url: String,
    pub auth_url: String,
    pub api_key: String,
    pub collection: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var(ENV_API_URL).ok(),
            auth_url: env::var(ENV_AUTH_URL).ok(),
            api_key: env::var(ENV_API_KEY).ok(),
            collection: env::var(ENV_COLLECTION).ok(),
        }
        .normalized()
    }

    /// Fill every unset field from `fallback`.
    #[must_use]
    pub fn merge(self, fallback: Self) -> Self {
        let this = self.normalized();
        let fallback = fallback.normalized();
        Self {
            api_base_url: this.api_base_url.or(fallback.api_base_url),
            auth_url: this.auth_url.or(fallback.auth_url),
            api_key: this.api_key.or(fallback.api_key),
            collection: this.collection.or(fallback.collection),
        }
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            api_base_url: normalize_text_option(self.api_base_url),
            auth_url: normalize_text_option(self.auth_url),
            api_key: normalize_text_option(self.api_key),
            collection: normalize_text_option(self.collection),
        }
    }

    pub fn resolve(&self) -> Result<ResolvedClientConfig> {
        let config = self.clone().normalized();

        let api_base_url = config
            .api_base_url
            .ok_or_else(|| Error::InvalidConfiguration("api_base_url is required".to_string()))
            .and_then(|url| normalize_http_url(url, "api_base_url"))?;
        let auth_url = match config.auth_url {
            Some(url) => normalize_http_url(url, "auth_url")?,
            None => api_base_url.clone(),
        };
        let api_key = config
            .api_key
            .ok_or_else(|| Error::InvalidConfiguration("api_key is required".to_string()))?;
        let collection = config
            .collection
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        Ok(ResolvedClientConfig {
            api_base_url,
            auth_url,
            api_key,
            collection,
        })
    }
}

fn normalize_http_url(value: String, field: &str) -> Result<String> {
    if is_http_url(&value) {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "{field} must include http:// or https://"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(api: Option<&str>, key: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_base_url: api.map(str::to_string),
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn resolve_applies_defaults() {
        let resolved = config(Some("https://api.example.com/"), Some(" anon "))
            .resolve()
            .unwrap();
        assert_eq!(
            resolved,
            ResolvedClientConfig {
                api_base_url: "https://api.example.com".to_string(),
                auth_url: "https://api.example.com".to_string(),
                api_key: "anon".to_string(),
                collection: "notes".to_string(),
            }
        );
    }

    #[test]
    fn resolve_rejects_missing_or_invalid_values() {
        assert!(config(None, Some("anon")).resolve().is_err());
        assert!(config(Some("https://api.example.com"), None).resolve().is_err());

        let error = config(Some("api.example.com"), Some("anon"))
            .resolve()
            .unwrap_err();
        assert!(error.to_string().contains("http:// or https://"));
    }

    #[test]
    fn merge_prefers_explicit_values() {
        let explicit = ClientConfig {
            collection: Some("journal".to_string()),
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        let fallback = config(Some("https://api.example.com"), Some("anon"));

        let merged = explicit.merge(fallback);
        assert_eq!(merged.collection.as_deref(), Some("journal"));
        assert_eq!(merged.api_key.as_deref(), Some("anon"));
        assert_eq!(merged.api_base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let result = serde_json::from_str::<ClientConfig>(r#"{"api_base_url":"x","bogus":1}"#);
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }
}
