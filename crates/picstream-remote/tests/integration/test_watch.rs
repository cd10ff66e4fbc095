//! Integration tests for live watches
//!
//! The document watch test serves one change then switches to 204s, the
//! way the long-poll endpoint behaves when nothing else happens.

use picstream_core::domain::{PostId, UserId};
use picstream_core::ports::IDocumentStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{post_document, setup_provider};

fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

#[tokio::test]
async fn test_favorites_watch_emits_record_updates() {
    let (server, provider) = setup_provider().await;

    // First poll (since=0) returns the current record at version 3
    Mock::given(method("GET"))
        .and(path("/v1/documents/favorites/u1:watch"))
        .and(query_param("since", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "document": {
                "id": "u1",
                "data": {
                    "p1": {
                        "imageUrl": "https://cdn.example.com/p1.jpg",
                        "caption": "caption p1",
                        "userId": "author-1",
                        "createdAt": "2026-08-01T10:00:00Z",
                    }
                }
            },
            "version": 3,
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Later polls (since=3) hang until the long-poll window closes
    Mock::given(method("GET"))
        .and(path("/v1/documents/favorites/u1:watch"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut sub = provider.watch_favorites(&user("u1")).await.unwrap();

    let record = sub.next().await.unwrap();
    assert_eq!(record.len(), 1);
    assert!(record.contains(&PostId::new("p1".to_string()).unwrap()));

    sub.dispose();
}

#[tokio::test]
async fn test_profile_watch_parses_document() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("GET"))
        .and(path("/v1/documents/users/u1:watch"))
        .and(query_param("since", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "document": {"id": "u1", "data": {"username": "casey"}},
            "version": 1,
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/documents/users/u1:watch"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut sub = provider.watch_profile(&user("u1")).await.unwrap();

    let profile = sub.next().await.unwrap();
    assert_eq!(profile.username, "casey");
}

#[tokio::test]
async fn test_posts_watch_polls_query() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/posts:query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [post_document("p1", 100)],
        })))
        .mount(&server)
        .await;

    let mut sub = provider.watch_posts_by_author(&user("u1")).await.unwrap();

    let posts = sub.next().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id.as_str(), "p1");
}
