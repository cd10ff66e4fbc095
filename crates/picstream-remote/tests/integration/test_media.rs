//! Integration tests for the media upload endpoint

use picstream_core::domain::{MediaPath, UserId};
use picstream_core::ports::IMediaStore;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::setup_provider;

#[tokio::test]
async fn test_upload_returns_retrievable_url() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/posts/u1/1718000000000.jpg"))
        .and(header("content-type", "image/jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "https://cdn.example.com/posts/u1/1718000000000.jpg",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = UserId::new("u1".to_string()).unwrap();
    let upload_path = MediaPath::for_post_image(&user, 1_718_000_000_000, "jpg").unwrap();

    let url = provider
        .upload_image(&upload_path, &[0xFF, 0xD8], "image/jpeg")
        .await
        .unwrap();

    assert_eq!(
        url.as_str(),
        "https://cdn.example.com/posts/u1/1718000000000.jpg"
    );
}

#[tokio::test]
async fn test_failed_upload_is_an_error() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(507))
        .mount(&server)
        .await;

    let user = UserId::new("u1".to_string()).unwrap();
    let upload_path = MediaPath::for_post_image(&user, 1, "jpg").unwrap();

    let result = provider.upload_image(&upload_path, &[0xFF], "image/jpeg").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_upload_with_invalid_returned_url_rejected() {
    let (server, provider) = setup_provider().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "not-a-url",
        })))
        .mount(&server)
        .await;

    let user = UserId::new("u1".to_string()).unwrap();
    let upload_path = MediaPath::for_post_image(&user, 1, "jpg").unwrap();

    let result = provider.upload_image(&upload_path, &[0xFF], "image/jpeg").await;
    assert!(result.is_err());
}
