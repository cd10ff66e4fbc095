//! On-disk session store
//!
//! Persists the authenticated session as a JSON file in the platform data
//! dir, owner-readable only. This is the across-launch session cache the
//! hosted SDK would otherwise keep on device.

use std::path::PathBuf;

use anyhow::{Context, Result};
use picstream_core::config::Config;
use picstream_core::ports::{AuthSession, ISessionStore};
use tracing::debug;

/// File-backed [`ISessionStore`]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the default location: `<data dir>/picstream/session.json`
    pub fn new() -> Self {
        Self::at(Config::default_data_dir().join("session.json"))
    }

    /// Store at an explicit path (used by tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<AuthSession>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read session file {}", self.path.display())
                });
            }
        };

        let session: AuthSession =
            serde_json::from_str(&content).context("Session file is corrupt")?;
        Ok(Some(session))
    }

    async fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        // The file carries a bearer token; keep it owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .context("Failed to restrict session file permissions")?;
        }

        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to remove session file {}", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use picstream_core::domain::UserId;

    fn session() -> AuthSession {
        AuthSession {
            user_id: UserId::new("u1".to_string()).unwrap(),
            id_token: "tok".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let session = session();
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap(), session);

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("session.json"));
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("nested/deep/session.json"));
        store.save(&session()).await.unwrap();
        assert!(store.load().await.unwrap().is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::at(path.clone());
        store.save(&session()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::at(path);
        assert!(store.load().await.is_err());
    }
}
