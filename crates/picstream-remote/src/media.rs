//! Media endpoints of the Remote Data Service
//!
//! Uploads raw image bytes under a user-scoped path and returns the
//! retrievable URL the post document will reference. The upload is the
//! first half of a non-transactional two-step publish; the caller accepts
//! an orphaned blob if the following document create fails.

use anyhow::{Context, Result};
use picstream_core::domain::{ImageUrl, MediaPath};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::client::RemoteClient;

/// Response from a completed upload
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Retrievable URL of the stored object
    url: String,
}

/// Uploads image bytes and returns the retrievable URL
pub(crate) async fn upload_image(
    client: &RemoteClient,
    path: &MediaPath,
    bytes: &[u8],
    content_type: &str,
) -> Result<ImageUrl> {
    let request_path = format!("/v1/media/{path}");
    debug!(path = %path, size = bytes.len(), "Uploading image");

    let response: UploadResponse = client
        .request(Method::POST, &request_path)
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(bytes.to_vec())
        .send()
        .await
        .context("Failed to send upload request")?
        .error_for_status()
        .context("Upload returned error status")?
        .json()
        .await
        .context("Failed to parse upload response")?;

    let url = ImageUrl::new(response.url).context("Upload returned an invalid URL")?;
    debug!(url = %url, "Image uploaded");
    Ok(url)
}
