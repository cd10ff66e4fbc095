//! Local device capability ports (driven/secondary ports)
//!
//! The image gallery port models the device photo library: a permission
//! gate followed by a pick that may be cancelled. The haptics port is a
//! fire-and-forget feedback signal.
//!
//! ## Design Notes
//!
//! - Permission is a tri-state: asking again after a denial is up to the
//!   platform, so the composer treats `Denied` as blocking until granted
//!   out-of-band.
//! - `pick_image` returns the image bytes eagerly; the composer holds them
//!   in the draft so a failed submit can be retried without re-picking.

use std::path::PathBuf;

/// State of the photo-library permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Permission has not been requested yet
    Undetermined,
    /// The user granted access
    Granted,
    /// The user denied access
    Denied,
}

/// An image selected from the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// Local file reference of the selected image
    pub path: PathBuf,
    /// MIME type derived from the file (e.g. `image/jpeg`)
    pub content_type: String,
    /// The image bytes
    pub bytes: Vec<u8>,
}

impl PickedImage {
    /// File extension matching the content type, for upload path naming
    #[must_use]
    pub fn extension(&self) -> &str {
        match self.content_type.as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

/// Port trait for the device photo library
#[async_trait::async_trait]
pub trait IImageGallery: Send + Sync {
    /// Current permission state without prompting
    async fn permission(&self) -> PermissionState;

    /// Prompts for photo-library access and returns the resulting state
    async fn request_permission(&self) -> anyhow::Result<PermissionState>;

    /// Opens the picker; `None` means the user cancelled
    async fn pick_image(&self) -> anyhow::Result<Option<PickedImage>>;
}

/// Strength of a haptic impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

/// Port trait for haptic feedback
///
/// Fire-and-forget; implementations swallow delivery failures.
#[async_trait::async_trait]
pub trait IHaptics: Send + Sync {
    /// Triggers an impact of the given strength
    async fn impact(&self, style: ImpactStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_type() {
        let image = |ct: &str| PickedImage {
            path: PathBuf::from("/pics/x"),
            content_type: ct.to_string(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(image("image/png").extension(), "png");
        assert_eq!(image("image/jpeg").extension(), "jpg");
        assert_eq!(image("application/octet-stream").extension(), "jpg");
    }
}
