//! Command context: configuration and adapter wiring
//!
//! Each command builds its use cases from here. The context owns the loaded
//! configuration and hands out the concrete adapters (remote provider,
//! identity, session store, console notices) behind the core's port types.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use picstream_core::config::Config;
use picstream_core::ports::AuthSession;
use picstream_core::usecases::SessionUseCase;
use picstream_remote::{IdentityAdapter, RemoteClient, RemoteStoreProvider};
use tracing::debug;

use crate::notice::ConsoleNotice;
use crate::output::OutputFormat;
use crate::session_file::FileSessionStore;

/// Shared wiring for all commands
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
    sessions: Arc<FileSessionStore>,
}

impl AppContext {
    /// Loads configuration (explicit path, or the default location) and
    /// warns about invalid values without refusing to run
    pub fn load(config_override: Option<&Path>, format: OutputFormat) -> Self {
        let path = config_override
            .map(Path::to_path_buf)
            .unwrap_or_else(Config::default_path);
        let config = Config::load_or_default(&path);

        for problem in config.validate() {
            tracing::warn!(%problem, "Ignoring invalid configuration value");
        }
        debug!(config_path = %path.display(), "Configuration loaded");

        Self {
            config,
            format,
            sessions: Arc::new(FileSessionStore::new()),
        }
    }

    /// The persisted-session store
    pub fn sessions(&self) -> Arc<FileSessionStore> {
        Arc::clone(&self.sessions)
    }

    /// Console notice adapter for the active output format
    pub fn notices(&self) -> Arc<ConsoleNotice> {
        Arc::new(ConsoleNotice::new(self.format))
    }

    /// Session use case over the identity endpoints
    pub fn session_usecase(&self) -> Result<SessionUseCase> {
        let client = RemoteClient::from_config(&self.config.remote)
            .context("Invalid remote configuration")?;
        Ok(SessionUseCase::new(
            Arc::new(IdentityAdapter::new(client)),
            self.sessions(),
        ))
    }

    /// The stored session, or a sign-in hint when there is none
    pub async fn require_session(&self) -> Result<AuthSession> {
        self.session_usecase()?
            .current()
            .await?
            .context("Not signed in. Run 'picstream auth login' first.")
    }

    /// Remote store provider authenticated as the given session
    pub fn provider(&self, session: &AuthSession) -> Result<Arc<RemoteStoreProvider>> {
        let client = RemoteClient::from_config(&self.config.remote)
            .context("Invalid remote configuration")?
            .with_id_token(session.id_token.clone());
        Ok(Arc::new(RemoteStoreProvider::with_watch_config(
            client,
            &self.config.watch,
        )))
    }
}
