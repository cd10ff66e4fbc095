//! Session use case
//!
//! Login, registration, and logout, each a direct forward to the identity
//! provider. Provider failures keep their own message so the screen can
//! surface it verbatim; there is no local retry. The resulting session is
//! persisted across launches through the session store.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::Email;
use crate::ports::{AuthSession, IIdentityProvider, ISessionStore};

/// Use case for authentication and session lifecycle
pub struct SessionUseCase {
    identity: Arc<dyn IIdentityProvider>,
    sessions: Arc<dyn ISessionStore>,
}

impl SessionUseCase {
    pub fn new(identity: Arc<dyn IIdentityProvider>, sessions: Arc<dyn ISessionStore>) -> Self {
        Self { identity, sessions }
    }

    /// Creates a new account and persists its session
    ///
    /// # Errors
    ///
    /// Returns the provider's failure verbatim if sign-up is rejected, or a
    /// persistence error if the session cannot be stored.
    pub async fn register(&self, email: &Email, password: &str) -> Result<AuthSession> {
        let session = self.identity.sign_up(email, password).await?;
        info!(user = %session.user_id, "Account registered");

        self.sessions
            .save(&session)
            .await
            .context("Failed to persist session")?;

        Ok(session)
    }

    /// Signs in to an existing account and persists its session
    ///
    /// # Errors
    ///
    /// Returns the provider's failure verbatim if the credentials are
    /// rejected, or a persistence error if the session cannot be stored.
    pub async fn login(&self, email: &Email, password: &str) -> Result<AuthSession> {
        let session = self.identity.sign_in(email, password).await?;
        info!(user = %session.user_id, "Signed in");

        self.sessions
            .save(&session)
            .await
            .context("Failed to persist session")?;

        Ok(session)
    }

    /// Signs out: best-effort remote revocation, then clears the stored session
    ///
    /// A failed remote revocation is logged and does not keep the local
    /// session alive.
    pub async fn logout(&self) -> Result<()> {
        if let Some(session) = self.sessions.load().await? {
            if let Err(err) = self.identity.sign_out(&session).await {
                warn!(error = %err, "Remote sign-out failed; clearing local session anyway");
            }
            debug!(user = %session.user_id, "Signed out");
        }

        self.sessions
            .clear()
            .await
            .context("Failed to clear stored session")
    }

    /// Returns the persisted session, if any
    pub async fn current(&self) -> Result<Option<AuthSession>> {
        self.sessions
            .load()
            .await
            .context("Failed to load stored session")
    }
}
