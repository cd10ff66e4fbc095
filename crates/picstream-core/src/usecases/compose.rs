//! Post composition use case
//!
//! Holds the composer draft (selected image + caption), runs the gallery
//! permission flow, validates before any remote call, and performs the
//! upload-then-create sequence. The two remote steps are not transactional:
//! a create failure after a successful upload orphans the blob, and the
//! draft survives every failure so the user can retry without re-picking.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{Caption, MediaPath, NewPost, Post, UserId};
use crate::ports::{
    IDocumentStore, IImageGallery, IMediaStore, IUserNotice, Notice, PermissionState, PickedImage,
};

/// The composer draft: what the user has staged but not yet posted
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// Selected image, if any
    pub image: Option<PickedImage>,
    /// Raw caption input (validated at submit time)
    pub caption: String,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The post was created; the caller should navigate to the feed
    Posted(Post),
    /// Validation rejected the draft before any remote call
    Rejected,
}

/// Use case for composing and publishing a post
pub struct ComposeUseCase {
    documents: Arc<dyn IDocumentStore>,
    media: Arc<dyn IMediaStore>,
    gallery: Arc<dyn IImageGallery>,
    notices: Arc<dyn IUserNotice>,
    user: UserId,
    draft: Mutex<Draft>,
}

impl ComposeUseCase {
    pub fn new(
        documents: Arc<dyn IDocumentStore>,
        media: Arc<dyn IMediaStore>,
        gallery: Arc<dyn IImageGallery>,
        notices: Arc<dyn IUserNotice>,
        user: UserId,
    ) -> Self {
        Self {
            documents,
            media,
            gallery,
            notices,
            user,
            draft: Mutex::new(Draft::default()),
        }
    }

    /// Snapshot of the current draft
    pub async fn draft(&self) -> Draft {
        self.draft.lock().await.clone()
    }

    /// Replaces the draft caption
    pub async fn set_caption(&self, caption: impl Into<String>) {
        self.draft.lock().await.caption = caption.into();
    }

    /// Clears the draft (the Reset affordance)
    pub async fn reset(&self) {
        *self.draft.lock().await = Draft::default();
    }

    /// Runs the gallery permission flow and opens the picker
    ///
    /// A denied permission raises a blocking notice and leaves the feature
    /// unusable until access is granted out-of-band. Returns whether an
    /// image ended up selected.
    pub async fn select_image(&self) -> anyhow::Result<bool> {
        let mut permission = self.gallery.permission().await;
        if permission == PermissionState::Undetermined {
            permission = self.gallery.request_permission().await?;
        }
        if permission != PermissionState::Granted {
            warn!("Photo library permission denied");
            self.notices
                .show(&Notice::error(
                    "Permission Required",
                    "This app needs access to your photos to upload images.",
                ))
                .await;
            return Ok(false);
        }

        match self.gallery.pick_image().await? {
            Some(image) => {
                debug!(path = %image.path.display(), "Image selected");
                self.draft.lock().await.image = Some(image);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Validates the draft and publishes it
    ///
    /// Missing image and blank caption each raise their own validation
    /// notice, and no remote call is made. On valid input the image is
    /// uploaded first, then the post document created; a failure in either
    /// step raises exactly one failure notice and keeps the draft intact.
    /// Success clears the draft.
    pub async fn submit(&self) -> anyhow::Result<SubmitOutcome> {
        let draft = self.draft.lock().await.clone();

        let image = draft.image;
        let caption = Caption::new(&draft.caption).ok();

        if image.is_none() {
            self.notices
                .show(&Notice::error(
                    "Error",
                    "Please select an image before posting.",
                ))
                .await;
        }
        if caption.is_none() {
            self.notices
                .show(&Notice::error(
                    "Error",
                    "Please enter a caption before posting.",
                ))
                .await;
        }
        let (Some(image), Some(caption)) = (image, caption) else {
            return Ok(SubmitOutcome::Rejected);
        };

        let path = MediaPath::for_post_image(
            &self.user,
            Utc::now().timestamp_millis(),
            image.extension(),
        )?;

        let image_url = match self
            .media
            .upload_image(&path, &image.bytes, &image.content_type)
            .await
        {
            Ok(url) => url,
            Err(err) => {
                self.show_failure().await;
                return Err(err.context("Failed to upload post image"));
            }
        };

        let new_post = NewPost {
            author: self.user.clone(),
            image_url,
            caption,
        };

        match self.documents.create_post(&new_post).await {
            Ok(post) => {
                debug!(post = %post.id, "Post published");
                self.reset().await;
                self.notices
                    .show(&Notice::success("Success", "Your post has been added."))
                    .await;
                Ok(SubmitOutcome::Posted(post))
            }
            Err(err) => {
                // The uploaded blob is orphaned here; no compensating delete
                self.show_failure().await;
                Err(err.context("Failed to create post document"))
            }
        }
    }

    async fn show_failure(&self) {
        self.notices
            .show(&Notice::error(
                "Error",
                "Failed to add your post. Please try again.",
            ))
            .await;
    }
}
