//! Session store port (driven/secondary port)
//!
//! Persists the authenticated session across launches, standing in for the
//! on-device session cache a hosted client SDK keeps. Only one session is
//! stored at a time; signing in replaces it, signing out clears it.

use crate::ports::identity::AuthSession;

/// Port trait for the persisted session
#[async_trait::async_trait]
pub trait ISessionStore: Send + Sync {
    /// Loads the stored session, if any
    async fn load(&self) -> anyhow::Result<Option<AuthSession>>;

    /// Stores the session, replacing any previous one
    async fn save(&self, session: &AuthSession) -> anyhow::Result<()>;

    /// Removes the stored session
    async fn clear(&self) -> anyhow::Result<()>;
}
