//! RemoteStoreProvider - port implementations over the REST modules
//!
//! Implements the core's [`IDocumentStore`] and [`IMediaStore`] ports by
//! delegating to the documents, media, and watch modules. Watch loops clone
//! the client and run until their subscription is dropped.

use std::time::Duration;

use anyhow::Result;
use picstream_core::config::WatchConfig;
use picstream_core::domain::{
    FavoriteEntry, FavoritesRecord, FeedCursor, ImageUrl, MediaPath, NewPost, Post, PostId,
    UserId, UserProfile,
};
use picstream_core::ports::{IDocumentStore, IMediaStore, LiveSubscription};

use crate::client::RemoteClient;
use crate::documents::{self, favorites_from_fields, profile_from_fields};
use crate::media;
use crate::watch;

/// Document and media store implementation over the Remote Data Service
pub struct RemoteStoreProvider {
    client: RemoteClient,
    poll_interval: Duration,
    long_poll_timeout: Duration,
}

impl RemoteStoreProvider {
    /// Creates a provider with default watch timing
    pub fn new(client: RemoteClient) -> Self {
        Self::with_watch_config(client, &WatchConfig::default())
    }

    /// Creates a provider with watch timing from configuration
    pub fn with_watch_config(client: RemoteClient, config: &WatchConfig) -> Self {
        Self {
            client,
            poll_interval: Duration::from_secs(config.poll_interval),
            long_poll_timeout: Duration::from_secs(config.long_poll_timeout),
        }
    }
}

#[async_trait::async_trait]
impl IDocumentStore for RemoteStoreProvider {
    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        documents::create_post(&self.client, new_post).await
    }

    async fn fetch_feed_page(
        &self,
        page_size: u32,
        after: Option<&FeedCursor>,
    ) -> Result<Vec<Post>> {
        documents::fetch_feed_page(&self.client, page_size, after).await
    }

    async fn fetch_post(&self, post: &PostId) -> Result<Option<Post>> {
        documents::fetch_post(&self.client, post).await
    }

    async fn fetch_posts_by_author(&self, author: &UserId) -> Result<Vec<Post>> {
        documents::fetch_posts_by_author(&self.client, author).await
    }

    async fn fetch_profile(&self, user: &UserId) -> Result<Option<UserProfile>> {
        documents::fetch_profile(&self.client, user).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        documents::save_profile(&self.client, profile).await
    }

    async fn fetch_favorites(&self, owner: &UserId) -> Result<FavoritesRecord> {
        documents::fetch_favorites(&self.client, owner).await
    }

    async fn add_favorite(&self, owner: &UserId, entry: &FavoriteEntry) -> Result<()> {
        documents::add_favorite(&self.client, owner, entry).await
    }

    async fn remove_favorite(&self, owner: &UserId, post: &PostId) -> Result<()> {
        documents::remove_favorite(&self.client, owner, post).await
    }

    async fn watch_favorites(
        &self,
        owner: &UserId,
    ) -> Result<LiveSubscription<FavoritesRecord>> {
        let record_owner = owner.clone();
        Ok(watch::watch_document(
            self.client.clone(),
            "favorites",
            owner.as_str(),
            self.long_poll_timeout,
            move |doc| Ok(favorites_from_fields(&record_owner, doc.data)?),
        ))
    }

    async fn watch_profile(&self, user: &UserId) -> Result<LiveSubscription<UserProfile>> {
        let profile_user = user.clone();
        Ok(watch::watch_document(
            self.client.clone(),
            "users",
            user.as_str(),
            self.long_poll_timeout,
            move |doc| Ok(profile_from_fields(&profile_user, doc.data)?),
        ))
    }

    async fn watch_posts_by_author(
        &self,
        author: &UserId,
    ) -> Result<LiveSubscription<Vec<Post>>> {
        let client = self.client.clone();
        let author = author.clone();
        Ok(watch::watch_query(self.poll_interval, move || {
            let client = client.clone();
            let author = author.clone();
            async move { documents::fetch_posts_by_author(&client, &author).await }
        }))
    }
}

#[async_trait::async_trait]
impl IMediaStore for RemoteStoreProvider {
    async fn upload_image(
        &self,
        path: &MediaPath,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<ImageUrl> {
        media::upload_image(&self.client, path, bytes, content_type).await
    }
}
