//! Identity service client and persisted sessions.

use std::fmt;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{is_http_url, parse_api_error, unix_timestamp_now};

mod session;

pub use session::{SessionGate, SessionState};

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Storage for the signed-in session between runs.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

#[derive(Clone)]
pub struct AuthClient<S: SessionPersistence> {
    auth_url: String,
    api_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> AuthClient<S> {
    pub fn new(url: impl AsRef<str>, api_key: impl Into<String>, store: S) -> AuthResult<Self> {
        let auth_url = normalize_auth_url(url.as_ref())?;
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(AuthError::InvalidConfiguration("API key must not be empty"));
        }

        Ok(Self {
            auth_url,
            api_key,
            client: Client::builder().build()?,
            store,
        })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the persisted session, refreshing it when it is about to expire.
    ///
    /// A failed refresh clears the stored session and reports "signed out".
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored_session.is_expired() {
            return Ok(Some(stored_session));
        }

        match self.refresh_session(&stored_session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "password")])
                .json(&payload),
        );

        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Sign-in response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        tracing::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty",
            ));
        }

        let payload = serde_json::json!({
            "refresh_token": refresh_token,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "refresh_token")])
                .json(&payload),
        );
        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Refresh response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Revoke the session server-side and forget it locally.
    ///
    /// An already-invalid token (401) still counts as signed out.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let request = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token);

        let response = request.send().await?;
        if !(response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        self.store.clear_session()?;
        Ok(())
    }

    fn public_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send_auth_request(&self, request: RequestBuilder) -> AuthResult<AuthTokenResponse> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<AuthTokenResponse>().await?)
    }
}

pub fn normalize_auth_url(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::InvalidConfiguration("Auth URL must not be empty"));
    }
    if !is_http_url(trimmed) {
        return Err(AuthError::InvalidConfiguration(
            "Auth URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/auth/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/auth/v1"))
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::Api("Password is required".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AuthTokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<AuthUserPayload>,
}

impl AuthTokenResponse {
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let expires_at = self.expires_at.or_else(|| {
            self.expires_in
                .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
        });
        let user = self.user.map(Into::into);

        match (self.access_token, self.refresh_token, expires_at, user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user,
                }))
            }
            (None, None, None, Some(_)) => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthUserPayload {
    id: String,
    email: Option<String>,
}

impl From<AuthUserPayload> for AuthUser {
    fn from(value: AuthUserPayload) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    pub(crate) struct MemoryStore {
        pub(crate) session: Arc<Mutex<Option<AuthSession>>>,
    }

    impl SessionPersistence for MemoryStore {
        fn load_session(&self) -> AuthResult<Option<AuthSession>> {
            Ok(self.session.lock().unwrap().clone())
        }

        fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn clear_session(&self) -> AuthResult<()> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    pub(crate) fn session_expiring_at(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        }
    }

    #[test]
    fn normalize_auth_url_appends_auth_path() {
        let normalized = normalize_auth_url("https://id.example.com/").unwrap();
        assert_eq!(normalized, "https://id.example.com/auth/v1");
    }

    #[test]
    fn normalize_auth_url_keeps_existing_auth_path() {
        let normalized = normalize_auth_url("https://id.example.com/auth/v1").unwrap();
        assert_eq!(normalized, "https://id.example.com/auth/v1");
    }

    #[test]
    fn normalize_auth_url_rejects_missing_scheme() {
        assert!(normalize_auth_url("id.example.com").is_err());
        assert!(normalize_auth_url("  ").is_err());
    }

    #[test]
    fn response_without_session_fields_has_no_session() {
        let response = AuthTokenResponse {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: Some(AuthUserPayload {
                id: "user".to_string(),
                email: Some("user@example.com".to_string()),
            }),
        };
        assert!(response.into_session().unwrap().is_none());
    }

    #[test]
    fn response_with_expires_in_computes_expiry() {
        let response = AuthTokenResponse {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            expires_at: None,
            expires_in: Some(3600),
            user: Some(AuthUserPayload {
                id: "user".to_string(),
                email: None,
            }),
        };
        let session = response.into_session().unwrap().unwrap();
        assert!(session.expires_at > unix_timestamp_now());
        assert!(!session.is_expired());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
            },
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn restore_session_returns_unexpired_stored_session() {
        let store = MemoryStore::default();
        let stored = session_expiring_at(unix_timestamp_now() + 3600);
        store.save_session(&stored).unwrap();

        let client = AuthClient::new("http://127.0.0.1:1", "key", store).unwrap();
        let restored = client.restore_session().await.unwrap();
        assert_eq!(restored, Some(stored));
    }

    #[tokio::test]
    async fn restore_session_without_stored_session_is_signed_out() {
        let client = AuthClient::new("http://127.0.0.1:1", "key", MemoryStore::default()).unwrap();
        assert!(client.restore_session().await.unwrap().is_none());
    }
}
