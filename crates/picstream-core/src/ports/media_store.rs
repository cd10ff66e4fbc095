//! Media store port (driven/secondary port)
//!
//! Interface for the remote service's blob storage: upload image bytes under
//! a user-scoped path and get back a retrievable URL to reference from a
//! post document. Uploads are not transactional with the document create
//! that follows them; a create failure orphans the blob and no compensating
//! delete is attempted.

use crate::domain::{ImageUrl, MediaPath};

/// Port trait for blob uploads
#[async_trait::async_trait]
pub trait IMediaStore: Send + Sync {
    /// Uploads image bytes to the given path and returns the retrievable URL
    ///
    /// # Arguments
    /// * `path` - User-and-timestamp-scoped storage path
    /// * `bytes` - The raw image data
    /// * `content_type` - MIME type of the image (e.g. `image/jpeg`)
    async fn upload_image(
        &self,
        path: &MediaPath,
        bytes: &[u8],
        content_type: &str,
    ) -> anyhow::Result<ImageUrl>;
}
