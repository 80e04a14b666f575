//! Session gate: decides whether the note view or the sign-in view is shown.

use super::{AuthClient, AuthResult, AuthSession, AuthUser, SessionPersistence};

/// Snapshot of the session as seen by views and the note list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub user: Option<AuthUser>,
    /// True until the persisted session has been restored (or found absent).
    pub loading: bool,
}

impl SessionState {
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            authenticated: false,
            user: None,
            loading: false,
        }
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.email.as_deref())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            authenticated: false,
            user: None,
            loading: true,
        }
    }
}

pub struct SessionGate<S: SessionPersistence> {
    client: AuthClient<S>,
    session: Option<AuthSession>,
    loading: bool,
}

impl<S: SessionPersistence> SessionGate<S> {
    pub const fn new(client: AuthClient<S>) -> Self {
        Self {
            client,
            session: None,
            loading: true,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            authenticated: self.session.is_some(),
            user: self.session.as_ref().map(|session| session.user.clone()),
            loading: self.loading,
        }
    }

    pub const fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.access_token.as_str())
    }

    /// Restore a persisted session. Failures leave the gate signed out.
    pub async fn restore(&mut self) -> SessionState {
        self.loading = true;
        self.session = match self.client.restore_session().await {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!("Failed to restore session: {}", error);
                None
            }
        };
        self.loading = false;
        self.state()
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<SessionState> {
        let session = self.client.sign_in(email, password).await?;
        self.session = Some(session);
        self.loading = false;
        Ok(self.state())
    }

    /// Sign out. The local session is always dropped, even when the identity
    /// service cannot be reached.
    pub async fn logout(&mut self) -> SessionState {
        if let Some(session) = self.session.take() {
            if let Err(error) = self.client.sign_out(&session.access_token).await {
                tracing::warn!("Server-side sign out failed: {}", error);
            }
        }
        if let Err(error) = self.client.store().clear_session() {
            tracing::warn!("Failed to clear stored session: {}", error);
        }
        self.loading = false;
        tracing::info!("Signed out");
        self.state()
    }
}
