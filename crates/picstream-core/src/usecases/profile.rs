//! Profile use case
//!
//! One-shot profile views (own or another user's), profile edits with an
//! optional image upload, and live subscriptions for a screen that stays
//! current. Read failures follow the feed's quiet policy: log and render
//! placeholders rather than alerting.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::{DomainError, MediaPath, Post, UserId, UserProfile};
use crate::ports::{IDocumentStore, IMediaStore, LiveSubscription, PickedImage};

/// A profile screen's data: the profile header plus the post grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub posts: Vec<Post>,
}

/// Use case for viewing and editing profiles
pub struct ProfileUseCase {
    documents: Arc<dyn IDocumentStore>,
    media: Arc<dyn IMediaStore>,
}

impl ProfileUseCase {
    pub fn new(documents: Arc<dyn IDocumentStore>, media: Arc<dyn IMediaStore>) -> Self {
        Self { documents, media }
    }

    /// Fetches a user's profile and posts in one shot
    ///
    /// A missing profile document renders as a placeholder; read errors are
    /// logged and yield empty results.
    pub async fn view(&self, user: &UserId) -> ProfileView {
        let profile = match self.documents.fetch_profile(user).await {
            Ok(Some(profile)) => profile,
            Ok(None) => UserProfile::placeholder(user.clone()),
            Err(err) => {
                warn!(user = %user, error = %err, "Profile fetch failed");
                UserProfile::placeholder(user.clone())
            }
        };

        let posts = match self.documents.fetch_posts_by_author(user).await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(user = %user, error = %err, "Profile posts fetch failed");
                Vec::new()
            }
        };

        ProfileView { profile, posts }
    }

    /// Updates the acting user's profile
    ///
    /// Uploads the new profile image first when one is given, then upserts
    /// the profile document; the document is created implicitly on first
    /// edit. At least one of `username`/`image` must be provided.
    ///
    /// # Errors
    ///
    /// Returns an error on a blank username, a failed upload, or a failed
    /// document write.
    pub async fn update(
        &self,
        user: &UserId,
        username: Option<String>,
        image: Option<PickedImage>,
    ) -> Result<UserProfile> {
        let mut profile = self
            .documents
            .fetch_profile(user)
            .await
            .context("Failed to read current profile")?
            .unwrap_or_else(|| UserProfile::placeholder(user.clone()));

        if let Some(username) = username {
            let trimmed = username.trim();
            if trimmed.is_empty() {
                return Err(DomainError::MalformedDocument {
                    document: format!("users/{user}"),
                    field: "username".to_string(),
                }
                .into());
            }
            profile.username = trimmed.to_string();
        }

        if let Some(image) = image {
            let path = MediaPath::for_profile_image(
                user,
                Utc::now().timestamp_millis(),
                image.extension(),
            )?;
            let url = self
                .media
                .upload_image(&path, &image.bytes, &image.content_type)
                .await
                .context("Failed to upload profile image")?;
            profile.profile_image = Some(url);
        }

        self.documents
            .save_profile(&profile)
            .await
            .context("Failed to save profile")?;

        debug!(user = %user, "Profile updated");
        Ok(profile)
    }

    /// Opens live watches on the user's profile document and post grid
    pub async fn watch_own(
        &self,
        user: &UserId,
    ) -> Result<(
        LiveSubscription<UserProfile>,
        LiveSubscription<Vec<Post>>,
    )> {
        let profile = self
            .documents
            .watch_profile(user)
            .await
            .context("Failed to watch profile")?;
        let posts = self
            .documents
            .watch_posts_by_author(user)
            .await
            .context("Failed to watch posts")?;
        Ok((profile, posts))
    }
}
