//! Remote Data Service HTTP client
//!
//! A typed wrapper over `reqwest` for the service's REST API: base URL and
//! endpoint construction, bearer authentication with the session's id token,
//! and the optional API key every request carries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use picstream_remote::client::RemoteClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RemoteClient::new("https://api.picstream.example")?
//!     .with_id_token("id-token-here");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use picstream_core::config::RemoteConfig;
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;
use url::Url;

/// Default request timeout when not configured
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Remote Data Service REST API
///
/// Cheap to clone; watch loops take their own copy.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests, without a trailing slash
    base_url: String,
    /// Optional API key appended to every request
    api_key: Option<String>,
    /// Bearer token of the authenticated session, if any
    id_token: Option<String>,
}

impl RemoteClient {
    /// Creates a client for the given base URL
    ///
    /// # Errors
    /// Returns an error if the base URL is not a valid absolute URL or the
    /// HTTP client cannot be constructed
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client from the remote configuration section
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        let client = Self::with_timeout(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key),
            None => client,
        })
    }

    fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            id_token: None,
        })
    }

    /// Sets the API key appended to every request
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the bearer token of the authenticated session
    #[must_use]
    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }

    /// Updates the bearer token (e.g. after a fresh sign-in)
    pub fn set_id_token(&mut self, id_token: impl Into<String>) {
        self.id_token = Some(id_token.into());
        debug!("Updated RemoteClient id token");
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for the given method and path
    ///
    /// Prepends the base URL, appends the API key when configured, and adds
    /// the Authorization header when a session token is set.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the base URL (e.g. `/v1/documents/posts`)
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            builder = builder.query(&[("key", key.as_str())]);
        }
        if let Some(ref token) = self.id_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}
