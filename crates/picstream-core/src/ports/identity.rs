//! Identity provider port (driven/secondary port)
//!
//! Interface for the remote service's email/password authentication
//! primitive. The client performs no local retry and caches no credentials
//! beyond the persisted [`AuthSession`]; failures carry the provider's own
//! message so it can be surfaced to the user verbatim.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Email, UserId};

/// An authenticated session with the remote service
///
/// Returned by sign-in/sign-up and persisted across launches via the
/// session store, standing in for the session cache a hosted client SDK
/// would keep on device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated user's identity
    pub user_id: UserId,
    /// Bearer token attached to authenticated requests
    pub id_token: String,
    /// Token for obtaining a fresh id token without re-entering credentials
    pub refresh_token: Option<String>,
    /// When the id token expires
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Returns true if the id token has expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the id token expires within the given duration
    #[must_use]
    pub fn expires_within(&self, duration: Duration) -> bool {
        Utc::now() + duration >= self.expires_at
    }
}

/// Port trait for email/password authentication
///
/// ## Implementation Notes
///
/// - Implementations map provider error bodies into errors whose display
///   string is the provider-supplied message, verbatim.
/// - `sign_out` is best-effort; a failed remote revocation still lets the
///   caller discard the local session.
#[async_trait::async_trait]
pub trait IIdentityProvider: Send + Sync {
    /// Creates a new account and returns its session
    async fn sign_up(&self, email: &Email, password: &str) -> anyhow::Result<AuthSession>;

    /// Signs in to an existing account
    async fn sign_in(&self, email: &Email, password: &str) -> anyhow::Result<AuthSession>;

    /// Revokes the given session with the provider
    async fn sign_out(&self, session: &AuthSession) -> anyhow::Result<()>;
}
