//! Shared test helpers for Remote Data Service integration tests
//!
//! Provides wiremock-based mock server setup and document body builders.

use picstream_core::config::WatchConfig;
use picstream_remote::{RemoteClient, RemoteStoreProvider};
use wiremock::MockServer;

/// Starts a mock server and returns it with a provider pointed at it
pub async fn setup_provider() -> (MockServer, RemoteStoreProvider) {
    let server = MockServer::start().await;
    let client = RemoteClient::new(server.uri())
        .unwrap()
        .with_id_token("test-id-token");
    let watch = WatchConfig {
        poll_interval: 1,
        long_poll_timeout: 1,
    };
    let provider = RemoteStoreProvider::with_watch_config(client, &watch);
    (server, provider)
}

/// An unauthenticated client for identity tests
pub async fn setup_client() -> (MockServer, RemoteClient) {
    let server = MockServer::start().await;
    let client = RemoteClient::new(server.uri()).unwrap();
    (server, client)
}

/// A post document body as the service returns it
pub fn post_document(id: &str, seconds: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "data": {
            "imageUrl": format!("https://cdn.example.com/{id}.jpg"),
            "caption": format!("caption {id}"),
            "userId": "u1",
            "createdAt": chrono::DateTime::from_timestamp(seconds, 0).unwrap().to_rfc3339(),
        }
    })
}
