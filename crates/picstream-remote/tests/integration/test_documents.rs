//! Integration tests for the document endpoints
//!
//! Verifies query bodies (ordering, limit, cursor), document parsing with
//! required-field validation, and the single-write favorites mutations.

use chrono::{TimeZone, Utc};
use picstream_core::domain::{
    Caption, FavoriteEntry, FeedCursor, ImageUrl, NewPost, Post, PostId, UserId, UserProfile,
};
use picstream_core::ports::IDocumentStore;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{post_document, setup_provider};

fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

#[tokio::test]
async fn test_first_feed_page_orders_and_limits() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/posts:query"))
        .and(body_partial_json(serde_json::json!({
            "orderBy": {"field": "createdAt", "direction": "desc"},
            "limit": 5,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [post_document("p9", 900), post_document("p8", 800)],
        })))
        .mount(&server)
        .await;

    let posts = provider.fetch_feed_page(5, None).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id.as_str(), "p9");
    assert_eq!(posts[1].id.as_str(), "p8");
    assert_eq!(posts[0].author.as_str(), "u1");
}

#[tokio::test]
async fn test_next_feed_page_sends_cursor() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/posts:query"))
        .and(body_partial_json(serde_json::json!({
            "startAfter": {"id": "p5"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [post_document("p4", 400)],
        })))
        .mount(&server)
        .await;

    let cursor = FeedCursor {
        post_id: PostId::new("p5".to_string()).unwrap(),
        created_at: Some(Utc.timestamp_opt(500, 0).unwrap()),
    };
    let posts = provider.fetch_feed_page(5, Some(&cursor)).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id.as_str(), "p4");
}

#[tokio::test]
async fn test_malformed_feed_document_rejected() {
    let (server, provider) = setup_provider().await;

    // Missing imageUrl must fail validation, not produce a half-built post
    Mock::given(method("POST"))
        .and(path("/v1/documents/posts:query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [{"id": "p1", "data": {"caption": "x", "userId": "u1"}}],
        })))
        .mount(&server)
        .await;

    let result = provider.fetch_feed_page(5, None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_create_post_round_trip() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/posts"))
        .and(body_partial_json(serde_json::json!({
            "data": {
                "imageUrl": "https://cdn.example.com/new.jpg",
                "caption": "fresh",
                "userId": "u1",
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p-new",
            "data": {
                "imageUrl": "https://cdn.example.com/new.jpg",
                "caption": "fresh",
                "userId": "u1",
                "createdAt": "2026-08-01T10:00:00Z",
            }
        })))
        .mount(&server)
        .await;

    let new_post = NewPost {
        author: user("u1"),
        image_url: ImageUrl::new("https://cdn.example.com/new.jpg".to_string()).unwrap(),
        caption: Caption::new("fresh").unwrap(),
    };
    let post = provider.create_post(&new_post).await.unwrap();

    assert_eq!(post.id.as_str(), "p-new");
    assert!(post.created_at.is_some());
}

#[tokio::test]
async fn test_posts_by_author_sends_filter() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/posts:query"))
        .and(body_partial_json(serde_json::json!({
            "where": {"field": "userId", "equals": "u7"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [],
        })))
        .mount(&server)
        .await;

    let posts = provider.fetch_posts_by_author(&user("u7")).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_missing_profile_is_none() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("GET"))
        .and(path("/v1/documents/users/u1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let profile = provider.fetch_profile(&user("u1")).await.unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn test_save_profile_puts_document() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("PUT"))
        .and(path("/v1/documents/users/u1"))
        .and(body_partial_json(serde_json::json!({
            "data": {"username": "casey"},
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let profile = UserProfile {
        user: user("u1"),
        username: "casey".to_string(),
        profile_image: None,
    };
    provider.save_profile(&profile).await.unwrap();
}

#[tokio::test]
async fn test_missing_favorites_record_is_empty() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("GET"))
        .and(path("/v1/documents/favorites/u1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let record = provider.fetch_favorites(&user("u1")).await.unwrap();
    assert!(record.is_empty());
}

#[tokio::test]
async fn test_fetch_favorites_parses_entries() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("GET"))
        .and(path("/v1/documents/favorites/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u1",
            "data": {
                "p1": {
                    "imageUrl": "https://cdn.example.com/p1.jpg",
                    "caption": "caption p1",
                    "userId": "author-1",
                    "createdAt": "2026-08-01T10:00:00Z",
                    "favoritedAt": "2026-08-02T09:00:00Z",
                }
            }
        })))
        .mount(&server)
        .await;

    let record = provider.fetch_favorites(&user("u1")).await.unwrap();
    assert_eq!(record.len(), 1);
    assert!(record.contains(&PostId::new("p1".to_string()).unwrap()));
}

#[tokio::test]
async fn test_add_favorite_merges_single_key() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/documents/favorites/u1"))
        .and(body_partial_json(serde_json::json!({
            "merge": {
                "p1": {
                    "imageUrl": "https://cdn.example.com/p1.jpg",
                    "caption": "caption p1",
                    "userId": "author-1",
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let post = Post {
        id: PostId::new("p1".to_string()).unwrap(),
        image_url: ImageUrl::new("https://cdn.example.com/p1.jpg".to_string()).unwrap(),
        caption: Caption::new("caption p1").unwrap(),
        author: user("author-1"),
        created_at: Some(Utc.timestamp_opt(900, 0).unwrap()),
    };
    let entry = FavoriteEntry::capture(&post, Utc::now());

    provider.add_favorite(&user("u1"), &entry).await.unwrap();
}

#[tokio::test]
async fn test_remove_favorite_deletes_single_key() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/documents/favorites/u1"))
        .and(body_partial_json(serde_json::json!({"remove": ["p1"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    provider
        .remove_favorite(&user("u1"), &PostId::new("p1".to_string()).unwrap())
        .await
        .unwrap();
}
