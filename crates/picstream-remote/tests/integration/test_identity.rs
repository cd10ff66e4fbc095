//! Integration tests for the identity endpoints
//!
//! Verifies session parsing and that provider rejections surface the
//! provider's own message verbatim.

use chrono::{Duration, Utc};
use picstream_core::domain::{Email, UserId};
use picstream_core::ports::{AuthSession, IIdentityProvider};
use picstream_remote::IdentityAdapter;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::setup_client;

fn email(address: &str) -> Email {
    Email::new(address.to_string()).unwrap()
}

#[tokio::test]
async fn test_sign_in_returns_session() {
    let (server, client) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth:signIn"))
        .and(body_partial_json(serde_json::json!({
            "email": "user@example.com",
            "password": "secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": "u-123",
            "idToken": "id-tok",
            "refreshToken": "refresh-tok",
            "expiresIn": 3600,
        })))
        .mount(&server)
        .await;

    let identity = IdentityAdapter::new(client);
    let session = identity
        .sign_in(&email("user@example.com"), "secret")
        .await
        .unwrap();

    assert_eq!(session.user_id.as_str(), "u-123");
    assert_eq!(session.id_token, "id-tok");
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_rejected_sign_in_surfaces_provider_message() {
    let (server, client) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth:signIn"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"message": "INVALID_PASSWORD"},
        })))
        .mount(&server)
        .await;

    let identity = IdentityAdapter::new(client);
    let err = identity
        .sign_in(&email("user@example.com"), "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "INVALID_PASSWORD");
}

#[tokio::test]
async fn test_sign_up_returns_session() {
    let (server, client) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth:signUp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": "u-new",
            "idToken": "id-tok",
            "expiresIn": 3600,
        })))
        .mount(&server)
        .await;

    let identity = IdentityAdapter::new(client);
    let session = identity
        .sign_up(&email("new@example.com"), "secret")
        .await
        .unwrap();

    assert_eq!(session.user_id.as_str(), "u-new");
    assert!(session.refresh_token.is_none());
}

#[tokio::test]
async fn test_sign_out_tolerates_dead_session() {
    let (server, client) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth:signOut"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let identity = IdentityAdapter::new(client);
    let session = AuthSession {
        user_id: UserId::new("u1".to_string()).unwrap(),
        id_token: "stale".to_string(),
        refresh_token: None,
        expires_at: Utc::now() - Duration::minutes(1),
    };

    identity.sign_out(&session).await.unwrap();
}
