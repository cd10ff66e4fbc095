//! Document store port (driven/secondary port)
//!
//! Interface for the remote service's hosted document database: the posts
//! collection, per-user profile documents, and per-user favorites records.
//! The primary implementation targets the service's REST API, but the trait
//! is transport-agnostic so tests can substitute an in-memory store.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - Implementations validate incoming documents into typed domain values
//!   and reject malformed payloads rather than trusting the backend schema.
//! - Favorite mutations are single-key merges/deletes on the owner's record;
//!   the store never rewrites the whole record.

use crate::domain::{FavoriteEntry, FavoritesRecord, FeedCursor, NewPost, Post, PostId, UserId};
use crate::ports::subscription::LiveSubscription;

/// Port trait for remote document operations
#[async_trait::async_trait]
pub trait IDocumentStore: Send + Sync {
    /// Creates a post document; the service assigns id and creation time
    async fn create_post(&self, new_post: &NewPost) -> anyhow::Result<Post>;

    /// Fetches one feed page ordered by creation time descending
    ///
    /// With `after: None` this is the first page. With a cursor, returns
    /// posts strictly after the cursor in sort order. An empty result means
    /// the feed is exhausted at that cursor.
    async fn fetch_feed_page(
        &self,
        page_size: u32,
        after: Option<&FeedCursor>,
    ) -> anyhow::Result<Vec<Post>>;

    /// Fetches a single post by id (None if it does not exist)
    async fn fetch_post(&self, post: &PostId) -> anyhow::Result<Option<Post>>;

    /// Fetches all posts created by the given user (profile grid data)
    async fn fetch_posts_by_author(&self, author: &UserId) -> anyhow::Result<Vec<Post>>;

    /// Fetches a user's profile document (None if never edited)
    async fn fetch_profile(&self, user: &UserId) -> anyhow::Result<Option<crate::domain::UserProfile>>;

    /// Creates or replaces a user's profile document
    async fn save_profile(&self, profile: &crate::domain::UserProfile) -> anyhow::Result<()>;

    /// Fetches the owner's favorites record (empty record if absent)
    async fn fetch_favorites(&self, owner: &UserId) -> anyhow::Result<FavoritesRecord>;

    /// Merges one favorite entry into the owner's record (single write)
    async fn add_favorite(&self, owner: &UserId, entry: &FavoriteEntry) -> anyhow::Result<()>;

    /// Deletes one key from the owner's record (single write)
    async fn remove_favorite(&self, owner: &UserId, post: &PostId) -> anyhow::Result<()>;

    /// Opens a live watch on the owner's favorites record
    ///
    /// Emits the full record on every remote change. The caller owns the
    /// subscription and must drop/dispose it on teardown.
    async fn watch_favorites(
        &self,
        owner: &UserId,
    ) -> anyhow::Result<LiveSubscription<FavoritesRecord>>;

    /// Opens a live watch on a user's profile document
    async fn watch_profile(
        &self,
        user: &UserId,
    ) -> anyhow::Result<LiveSubscription<crate::domain::UserProfile>>;

    /// Opens a live watch on a user's posts (profile grid)
    ///
    /// Implementations may back this with polling; each emission is the
    /// complete current list.
    async fn watch_posts_by_author(
        &self,
        author: &UserId,
    ) -> anyhow::Result<LiveSubscription<Vec<Post>>>;
}
