//! Favorites use case
//!
//! Toggles membership of a post in the acting user's favorites record and
//! exposes the record as a live, sorted list. Both halves of the toggle are
//! single remote writes; no optimistic local state is kept because the
//! favorites screen re-renders from the live subscription.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::{FavoriteEntry, Post, UserId};
use crate::ports::{IDocumentStore, IUserNotice, LiveSubscription, Notice};

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The post was not favorited and has been added
    Added,
    /// The post was favorited and has been removed
    Removed,
}

/// Use case for favoriting and unfavoriting posts
///
/// Constructed with the acting user's identity so tests can substitute a
/// fake identity; there is no process-wide current-user singleton.
pub struct FavoritesUseCase {
    documents: Arc<dyn IDocumentStore>,
    notices: Arc<dyn IUserNotice>,
    user: UserId,
}

impl FavoritesUseCase {
    pub fn new(
        documents: Arc<dyn IDocumentStore>,
        notices: Arc<dyn IUserNotice>,
        user: UserId,
    ) -> Self {
        Self {
            documents,
            notices,
            user,
        }
    }

    /// Toggles the post's membership in the user's favorites
    ///
    /// Adds a denormalized copy when absent, removes the key when present.
    /// Either way the user gets a one-shot notice. A remote failure raises
    /// exactly one error notice, leaves the record unchanged, and is
    /// returned to the caller.
    pub async fn toggle(&self, post: &Post) -> anyhow::Result<ToggleOutcome> {
        let favorites = match self.documents.fetch_favorites(&self.user).await {
            Ok(favorites) => favorites,
            Err(err) => {
                self.show_failure().await;
                return Err(err.context("Failed to read favorites record"));
            }
        };

        if favorites.contains(&post.id) {
            if let Err(err) = self.documents.remove_favorite(&self.user, &post.id).await {
                self.show_failure().await;
                return Err(err.context("Failed to remove favorite"));
            }
            debug!(post = %post.id, user = %self.user, "Favorite removed");
            self.notices
                .show(&Notice::success(
                    "Image Removed",
                    "This image has been removed from your favorites.",
                ))
                .await;
            Ok(ToggleOutcome::Removed)
        } else {
            let entry = FavoriteEntry::capture(post, Utc::now());
            if let Err(err) = self.documents.add_favorite(&self.user, &entry).await {
                self.show_failure().await;
                return Err(err.context("Failed to add favorite"));
            }
            debug!(post = %post.id, user = %self.user, "Favorite added");
            self.notices
                .show(&Notice::success(
                    "Image Favorited",
                    "This image has been added to your favorites.",
                ))
                .await;
            Ok(ToggleOutcome::Added)
        }
    }

    /// One-shot read of the favorites list, sorted as the screen renders it
    pub async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let record = self
            .documents
            .fetch_favorites(&self.user)
            .await
            .context("Failed to read favorites record")?;
        Ok(record.flatten_sorted())
    }

    /// Opens a live view of the user's favorites as a sorted post list
    ///
    /// Every update of the underlying record is flattened (newest creation
    /// time first, missing timestamps last) and replaces the previous list.
    /// Dropping the returned subscription tears the watch down.
    pub async fn subscribe(&self) -> anyhow::Result<LiveSubscription<Vec<Post>>> {
        let mut source = self.documents.watch_favorites(&self.user).await?;

        let (tx, rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = task_cancel.cancelled() => break,
                    update = source.next() => match update {
                        Some(record) => {
                            if tx.send(record.flatten_sorted()).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        });

        Ok(LiveSubscription::new(rx, cancel))
    }

    async fn show_failure(&self) {
        self.notices
            .show(&Notice::error(
                "Error",
                "Failed to update your favorites. Please try again.",
            ))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Caption, ImageUrl, PostId};
    use crate::ports::NoticeKind;
    use crate::usecases::fakes::{FakeDocumentStore, FakeNotice};
    use chrono::TimeZone;

    fn post(id: &str, seconds: i64) -> Post {
        Post {
            id: PostId::new(id.to_string()).unwrap(),
            image_url: ImageUrl::new(format!("https://cdn.example.com/{id}.jpg")).unwrap(),
            caption: Caption::new("a caption").unwrap(),
            author: UserId::new("author".to_string()).unwrap(),
            created_at: Some(chrono::Utc.timestamp_opt(seconds, 0).unwrap()),
        }
    }

    fn usecase(
        store: &Arc<FakeDocumentStore>,
        notices: &Arc<FakeNotice>,
    ) -> FavoritesUseCase {
        FavoritesUseCase::new(
            Arc::clone(store) as Arc<dyn IDocumentStore>,
            Arc::clone(notices) as Arc<dyn IUserNotice>,
            UserId::new("u1".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let store = Arc::new(FakeDocumentStore::default());
        let notices = Arc::new(FakeNotice::default());
        let favorites = usecase(&store, &notices);
        let p = post("p1", 100);

        assert_eq!(favorites.toggle(&p).await.unwrap(), ToggleOutcome::Added);
        assert!(store.favorites_of("u1").contains(&p.id));

        assert_eq!(favorites.toggle(&p).await.unwrap(), ToggleOutcome::Removed);
        assert!(!store.favorites_of("u1").contains(&p.id));
    }

    #[tokio::test]
    async fn test_double_toggle_restores_membership() {
        let store = Arc::new(FakeDocumentStore::default());
        let notices = Arc::new(FakeNotice::default());
        let favorites = usecase(&store, &notices);
        let p = post("p1", 100);

        let before = store.favorites_of("u1").contains(&p.id);
        favorites.toggle(&p).await.unwrap();
        favorites.toggle(&p).await.unwrap();
        assert_eq!(store.favorites_of("u1").contains(&p.id), before);
    }

    #[tokio::test]
    async fn test_failed_toggle_notices_once_and_keeps_state() {
        let store = Arc::new(FakeDocumentStore::default());
        let notices = Arc::new(FakeNotice::default());
        let favorites = usecase(&store, &notices);
        let p = post("p1", 100);

        store.fail_favorite_writes(true);
        let result = favorites.toggle(&p).await;

        assert!(result.is_err());
        assert!(!store.favorites_of("u1").contains(&p.id));
        let shown = notices.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_list_is_sorted_newest_first() {
        let store = Arc::new(FakeDocumentStore::default());
        let notices = Arc::new(FakeNotice::default());
        let favorites = usecase(&store, &notices);

        favorites.toggle(&post("a", 5)).await.unwrap();
        favorites.toggle(&post("b", 9)).await.unwrap();

        let list = favorites.list().await.unwrap();
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_subscription_yields_sorted_lists() {
        let store = Arc::new(FakeDocumentStore::default());
        let notices = Arc::new(FakeNotice::default());
        let favorites = usecase(&store, &notices);

        let mut sub = favorites.subscribe().await.unwrap();

        favorites.toggle(&post("a", 5)).await.unwrap();
        let update = sub.next().await.unwrap();
        assert_eq!(update.len(), 1);

        favorites.toggle(&post("b", 9)).await.unwrap();
        let update = sub.next().await.unwrap();
        let ids: Vec<&str> = update.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_subscription_dispose_stops_updates() {
        let store = Arc::new(FakeDocumentStore::default());
        let notices = Arc::new(FakeNotice::default());
        let favorites = usecase(&store, &notices);

        let sub = favorites.subscribe().await.unwrap();
        sub.dispose();
        drop(sub);

        // A later toggle must not panic on a dead subscription
        favorites.toggle(&post("a", 5)).await.unwrap();
    }
}
