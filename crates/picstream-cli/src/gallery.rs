//! Filesystem-backed image gallery
//!
//! The CLI's stand-in for the device photo library: images live in a
//! configured pictures directory, "permission" is whether that directory is
//! readable, and the picker returns either an explicitly chosen file or the
//! newest image in the directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use picstream_core::ports::{IImageGallery, PermissionState, PickedImage};
use tracing::debug;

/// Image file extensions the gallery offers
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Filesystem [`IImageGallery`]
pub struct FsImageGallery {
    pictures_dir: PathBuf,
    /// Explicit file to "pick"; newest image in the directory otherwise
    selection: Option<PathBuf>,
}

impl FsImageGallery {
    pub fn new(pictures_dir: PathBuf) -> Self {
        Self {
            pictures_dir,
            selection: None,
        }
    }

    /// Pre-selects the file the picker will return
    #[must_use]
    pub fn with_selection(mut self, path: PathBuf) -> Self {
        self.selection = Some(path);
        self
    }

    async fn read_image(path: &Path) -> Result<PickedImage> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        debug!(path = %path.display(), size = bytes.len(), "Image read");
        Ok(PickedImage {
            path: path.to_path_buf(),
            content_type: content_type_for(path).to_string(),
            bytes,
        })
    }

    /// Newest image file in the pictures directory, by modification time
    async fn newest_image(&self) -> Result<Option<PathBuf>> {
        let mut entries = match tokio::fs::read_dir(&self.pictures_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to list {}", self.pictures_dir.display())
                });
            }
        };

        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_image(&path) {
                continue;
            }
            let modified = entry
                .metadata()
                .await
                .and_then(|meta| meta.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
            if newest.as_ref().map_or(true, |(best, _)| modified > *best) {
                newest = Some((modified, path));
            }
        }

        Ok(newest.map(|(_, path)| path))
    }
}

#[async_trait::async_trait]
impl IImageGallery for FsImageGallery {
    async fn permission(&self) -> PermissionState {
        match std::fs::read_dir(&self.pictures_dir) {
            Ok(_) => PermissionState::Granted,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                PermissionState::Denied
            }
            // A missing directory has no images but access is not denied
            Err(_) => PermissionState::Undetermined,
        }
    }

    async fn request_permission(&self) -> Result<PermissionState> {
        // Nothing to prompt on a filesystem; re-probe and create the
        // directory so a first run starts from a usable state
        if let Err(err) = tokio::fs::create_dir_all(&self.pictures_dir).await {
            if err.kind() == std::io::ErrorKind::PermissionDenied {
                return Ok(PermissionState::Denied);
            }
            return Err(err).with_context(|| {
                format!("Failed to prepare {}", self.pictures_dir.display())
            });
        }
        Ok(self.permission().await)
    }

    async fn pick_image(&self) -> Result<Option<PickedImage>> {
        let path = match &self.selection {
            Some(path) => path.clone(),
            None => match self.newest_image().await? {
                Some(path) => path,
                None => return Ok(None),
            },
        };
        Ok(Some(Self::read_image(&path).await?))
    }
}
