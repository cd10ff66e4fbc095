//! Post entity and feed pagination cursor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{Caption, ImageUrl, PostId, UserId};

/// A published post
///
/// Created once by the composer and immutable thereafter in this client.
/// `created_at` is assigned by the remote service; it is always present on
/// documents fetched from the posts collection but may be missing on the
/// denormalized copies stored inside a favorites record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Service-assigned document id
    pub id: PostId,
    /// Retrievable URL of the uploaded image
    pub image_url: ImageUrl,
    /// Caption text
    pub caption: Caption,
    /// Identity of the creator
    pub author: UserId,
    /// Server-assigned creation timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields the composer sends when creating a post
///
/// The id and creation timestamp are assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: UserId,
    pub image_url: ImageUrl,
    pub caption: Caption,
}

/// Opaque pagination marker: the last-fetched post in feed sort order
///
/// Held only in client memory for the duration of a scroll session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCursor {
    /// Id of the last post on the previous page
    pub post_id: PostId,
    /// Its creation timestamp, the feed's ordering key
    pub created_at: Option<DateTime<Utc>>,
}

impl FeedCursor {
    /// Build a cursor positioned after the given post
    #[must_use]
    pub fn after(post: &Post) -> Self {
        Self {
            post_id: post.id.clone(),
            created_at: post.created_at,
        }
    }
}
