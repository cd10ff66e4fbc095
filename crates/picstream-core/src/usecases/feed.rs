//! Feed browsing use case
//!
//! Maintains the reverse-chronological feed: page-at-a-time loading with an
//! opaque cursor, an in-flight guard so scroll events cannot stack page
//! requests, and pull-to-refresh that replaces the list wholesale.
//!
//! Read failures here are deliberately quiet: a feed that cannot load shows
//! as empty, and the warning goes to the log rather than the user.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{FeedCursor, Post};
use crate::ports::IDocumentStore;

/// Number of posts fetched per page
pub const FEED_PAGE_SIZE: u32 = 5;

#[derive(Debug, Default)]
struct FeedState {
    posts: Vec<Post>,
    cursor: Option<FeedCursor>,
    page_loading: bool,
}

/// Use case for browsing the paginated feed
///
/// All mutation happens behind one async mutex. `load_next_page` sets an
/// in-flight flag and releases the lock for the duration of the fetch, so a
/// concurrent `refresh` can still run; when the two race, the last writer's
/// list is the visible state.
pub struct FeedUseCase {
    documents: Arc<dyn IDocumentStore>,
    page_size: u32,
    state: Mutex<FeedState>,
}

impl FeedUseCase {
    /// Creates a feed over the given document store with the default page size
    pub fn new(documents: Arc<dyn IDocumentStore>) -> Self {
        Self::with_page_size(documents, FEED_PAGE_SIZE)
    }

    /// Creates a feed with an explicit page size (from configuration)
    pub fn with_page_size(documents: Arc<dyn IDocumentStore>, page_size: u32) -> Self {
        Self {
            documents,
            page_size,
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Loads the first page, replacing the in-memory list
    ///
    /// On error the feed resets to empty; the failure is logged, not
    /// surfaced.
    pub async fn load_initial_page(&self) {
        self.refresh().await;
    }

    /// Replaces the list with one page of the most-recent posts
    ///
    /// Safe to call while a `load_next_page` is in flight; the race resolves
    /// last-writer-wins.
    pub async fn refresh(&self) {
        match self.documents.fetch_feed_page(self.page_size, None).await {
            Ok(page) => {
                debug!(count = page.len(), "Feed refreshed");
                let cursor = page.last().map(FeedCursor::after);
                let mut state = self.state.lock().await;
                state.posts = page;
                state.cursor = cursor;
            }
            Err(err) => {
                warn!(error = %err, "Feed load failed; showing empty feed");
                let mut state = self.state.lock().await;
                state.posts.clear();
                state.cursor = None;
            }
        }
    }

    /// Loads the next page and appends it to the list
    ///
    /// No-op while a page load is already in flight or when no cursor exists
    /// (feed never loaded, or empty). A zero-document page leaves the cursor
    /// unchanged, signalling exhaustion.
    pub async fn load_next_page(&self) {
        let cursor = {
            let mut state = self.state.lock().await;
            if state.page_loading {
                return;
            }
            let Some(cursor) = state.cursor.clone() else {
                return;
            };
            state.page_loading = true;
            cursor
        };

        let result = self
            .documents
            .fetch_feed_page(self.page_size, Some(&cursor))
            .await;

        let mut state = self.state.lock().await;
        state.page_loading = false;
        match result {
            Ok(page) if page.is_empty() => {
                debug!("Feed exhausted at current cursor");
            }
            Ok(page) => {
                debug!(count = page.len(), "Feed page appended");
                state.cursor = page.last().map(FeedCursor::after);
                state.posts.extend(page);
            }
            Err(err) => {
                warn!(error = %err, "Feed page load failed; list unchanged");
            }
        }
    }

    /// Snapshot of the current feed list
    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.clone()
    }

    /// Whether a page load is currently in flight
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.page_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::fakes::FakeDocumentStore;

    fn feed_over(store: &Arc<FakeDocumentStore>) -> FeedUseCase {
        FeedUseCase::new(Arc::clone(store) as Arc<dyn IDocumentStore>)
    }

    #[tokio::test]
    async fn test_initial_load_takes_one_page() {
        let store = Arc::new(FakeDocumentStore::with_feed(12));
        let feed = feed_over(&store);

        feed.load_initial_page().await;

        let posts = feed.posts().await;
        assert_eq!(posts.len(), 5);
        // Newest first
        assert_eq!(posts[0].id.as_str(), "post-12");
        assert_eq!(posts[4].id.as_str(), "post-8");
    }

    #[tokio::test]
    async fn test_pagination_grows_and_stays_ordered() {
        let store = Arc::new(FakeDocumentStore::with_feed(12));
        let feed = feed_over(&store);

        feed.load_initial_page().await;
        let mut lengths = vec![feed.posts().await.len()];
        feed.load_next_page().await;
        lengths.push(feed.posts().await.len());
        feed.load_next_page().await;
        lengths.push(feed.posts().await.len());

        assert_eq!(lengths, vec![5, 10, 12]);

        let posts = feed.posts().await;
        for pair in posts.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_next_page_noop_without_cursor() {
        let store = Arc::new(FakeDocumentStore::with_feed(0));
        let feed = feed_over(&store);

        feed.load_initial_page().await;
        assert!(feed.posts().await.is_empty());

        let calls_before = store.feed_query_count();
        feed.load_next_page().await;
        assert_eq!(store.feed_query_count(), calls_before);
    }

    #[tokio::test]
    async fn test_exhaustion_leaves_cursor_unchanged() {
        let store = Arc::new(FakeDocumentStore::with_feed(5));
        let feed = feed_over(&store);

        feed.load_initial_page().await;
        feed.load_next_page().await; // empty page
        assert_eq!(feed.posts().await.len(), 5);

        // Cursor still set: another attempt issues a query again
        let calls_before = store.feed_query_count();
        feed.load_next_page().await;
        assert_eq!(store.feed_query_count(), calls_before + 1);
        assert_eq!(feed.posts().await.len(), 5);
    }

    #[tokio::test]
    async fn test_initial_load_error_shows_empty_feed() {
        let store = Arc::new(FakeDocumentStore::with_feed(8));
        let feed = feed_over(&store);

        feed.load_initial_page().await;
        assert_eq!(feed.posts().await.len(), 5);

        store.fail_feed_queries(true);
        feed.refresh().await;
        assert!(feed.posts().await.is_empty());
    }

    #[tokio::test]
    async fn test_next_page_error_leaves_list_unchanged() {
        let store = Arc::new(FakeDocumentStore::with_feed(8));
        let feed = feed_over(&store);

        feed.load_initial_page().await;
        store.fail_feed_queries(true);
        feed.load_next_page().await;

        assert_eq!(feed.posts().await.len(), 5);
        assert!(!feed.is_loading().await);
    }

    #[tokio::test]
    async fn test_refresh_replaces_after_deep_pagination() {
        let store = Arc::new(FakeDocumentStore::with_feed(13));
        let feed = feed_over(&store);

        feed.load_initial_page().await;
        feed.load_next_page().await;
        feed.load_next_page().await;
        assert_eq!(feed.posts().await.len(), 13);

        feed.refresh().await;
        let posts = feed.posts().await;
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[0].id.as_str(), "post-13");
    }
}
