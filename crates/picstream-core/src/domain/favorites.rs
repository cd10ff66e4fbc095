//! Per-user favorites record
//!
//! Each user owns exactly one favorites record: a map from post id to a
//! denormalized copy of that post's fields plus the client-observed time it
//! was favorited. The record is mutated one key at a time (merge on favorite,
//! delete on unfavorite), so writes never race across entries.
//!
//! The denormalized copy means an entry can outlive or diverge from the post
//! it was taken from; that staleness is accepted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{PostId, UserId};
use super::post::Post;

/// A denormalized favorite: the post's fields as they were when favorited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Copy of the post at the time it was favorited
    pub post: Post,
    /// Client-observed time the favorite was added
    pub favorited_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Capture a favorite of the given post at the given instant
    #[must_use]
    pub fn capture(post: &Post, at: DateTime<Utc>) -> Self {
        Self {
            post: post.clone(),
            favorited_at: at,
        }
    }
}

/// A user's favorites record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesRecord {
    /// The owning user
    pub owner: UserId,
    /// Map from post id to the denormalized entry
    pub entries: HashMap<PostId, FavoriteEntry>,
}

impl FavoritesRecord {
    /// An empty record for a user who has never favorited anything
    #[must_use]
    pub fn empty(owner: UserId) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
        }
    }

    /// Whether the given post is currently favorited
    #[must_use]
    pub fn contains(&self, post: &PostId) -> bool {
        self.entries.contains_key(post)
    }

    /// Number of favorited posts
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten the record into the rendered list
    ///
    /// Sorted by the denormalized creation timestamp, newest first; entries
    /// whose copy carries no timestamp sort last.
    #[must_use]
    pub fn flatten_sorted(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.entries.values().map(|e| e.post.clone()).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newtypes::{Caption, ImageUrl};
    use chrono::TimeZone;

    fn post(id: &str, seconds: Option<i64>) -> Post {
        Post {
            id: PostId::new(id.to_string()).unwrap(),
            image_url: ImageUrl::new(format!("https://cdn.example.com/{id}.jpg")).unwrap(),
            caption: Caption::new("a caption").unwrap(),
            author: UserId::new("author".to_string()).unwrap(),
            created_at: seconds.map(|s| Utc.timestamp_opt(s, 0).unwrap()),
        }
    }

    fn record(posts: Vec<Post>) -> FavoritesRecord {
        let owner = UserId::new("u1".to_string()).unwrap();
        let now = Utc.timestamp_opt(1_000, 0).unwrap();
        let entries = posts
            .into_iter()
            .map(|p| (p.id.clone(), FavoriteEntry::capture(&p, now)))
            .collect();
        FavoritesRecord { owner, entries }
    }

    #[test]
    fn test_flatten_sorts_newest_first() {
        let record = record(vec![post("a", Some(5)), post("b", Some(9))]);
        let flat = record.flatten_sorted();
        let ids: Vec<&str> = flat.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_flatten_missing_timestamp_sorts_last() {
        let record = record(vec![post("a", None), post("b", Some(9)), post("c", Some(5))]);
        let flat = record.flatten_sorted();
        let ids: Vec<&str> = flat.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_contains() {
        let p = post("a", Some(1));
        let record = record(vec![p.clone()]);
        assert!(record.contains(&p.id));
        assert!(!record.contains(&PostId::new("other".to_string()).unwrap()));
    }

    #[test]
    fn test_empty_record() {
        let owner = UserId::new("u1".to_string()).unwrap();
        let record = FavoritesRecord::empty(owner);
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert!(record.flatten_sorted().is_empty());
    }
}
