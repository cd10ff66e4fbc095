//! Identity endpoints of the Remote Data Service
//!
//! Email/password sign-up, sign-in, and sign-out. Provider rejections carry
//! a machine-readable message in the error body (`INVALID_PASSWORD`,
//! `EMAIL_EXISTS`, ...); that message becomes the error's display string so
//! screens can surface it verbatim.

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Utc};
use picstream_core::domain::Email;
use picstream_core::ports::{AuthSession, IIdentityProvider};
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::RemoteClient;

/// Sign-in / sign-up request body
#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Successful authentication response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    /// The authenticated user's id
    user_id: String,
    /// Bearer token for subsequent requests
    id_token: String,
    /// Token for refreshing the session
    refresh_token: Option<String>,
    /// Seconds until the id token expires
    expires_in: i64,
}

/// Error body returned on rejected requests
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extracts the provider's error message from a failed response
///
/// Falls back to the HTTP status when the body carries no message.
async fn provider_error(response: Response) -> anyhow::Error {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => anyhow!(body.error.message),
        Err(_) => anyhow!("Request failed with status {status}"),
    }
}

fn session_from_response(response: AuthResponse) -> Result<AuthSession> {
    Ok(AuthSession {
        user_id: response
            .user_id
            .try_into()
            .context("Invalid user id in auth response")?,
        id_token: response.id_token,
        refresh_token: response.refresh_token,
        expires_at: Utc::now() + Duration::seconds(response.expires_in),
    })
}

/// Identity adapter over the service's auth endpoints
///
/// Holds an unauthenticated [`RemoteClient`]; sign-out attaches the
/// session's own bearer token per call.
pub struct IdentityAdapter {
    client: RemoteClient,
}

impl IdentityAdapter {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    async fn authenticate(&self, path: &str, email: &Email, password: &str) -> Result<AuthSession> {
        let response = self
            .client
            .request(Method::POST, path)
            .json(&CredentialsRequest {
                email: email.as_str(),
                password,
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach {path}"))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: AuthResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {path} response"))?;

        debug!(user = %body.user_id, "Authenticated");
        session_from_response(body)
    }
}

#[async_trait::async_trait]
impl IIdentityProvider for IdentityAdapter {
    async fn sign_up(&self, email: &Email, password: &str) -> Result<AuthSession> {
        self.authenticate("/v1/auth:signUp", email, password).await
    }

    async fn sign_in(&self, email: &Email, password: &str) -> Result<AuthSession> {
        self.authenticate("/v1/auth:signIn", email, password).await
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<()> {
        let response = self
            .client
            .request(Method::POST, "/v1/auth:signOut")
            .bearer_auth(&session.id_token)
            .send()
            .await
            .context("Failed to reach /v1/auth:signOut")?;

        // An already-dead session is as signed out as it gets
        if !response.status().is_success() && response.status() != StatusCode::UNAUTHORIZED {
            return Err(provider_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_deserialization() {
        let json = r#"{
            "userId": "u-123",
            "idToken": "tok",
            "refreshToken": "refresh",
            "expiresIn": 3600
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user_id, "u-123");
        assert_eq!(response.expires_in, 3600);
    }

    #[test]
    fn test_auth_response_without_refresh_token() {
        let json = r#"{"userId": "u1", "idToken": "tok", "expiresIn": 60}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn test_session_from_response_expiry_in_future() {
        let response = AuthResponse {
            user_id: "u1".to_string(),
            id_token: "tok".to_string(),
            refresh_token: None,
            expires_in: 3600,
        };
        let session = session_from_response(response).unwrap();
        assert!(!session.is_expired());
    }

    #[test]
    fn test_error_body_deserialization() {
        let json = r#"{"error": {"message": "INVALID_PASSWORD"}}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.message, "INVALID_PASSWORD");
    }
}
