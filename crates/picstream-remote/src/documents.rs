//! Document endpoints of the Remote Data Service
//!
//! Typed wire structs for the service's document API and the conversions
//! into domain values. Every incoming document passes required-field
//! validation; a payload the service should never produce is rejected as
//! malformed instead of being trusted.
//!
//! ## Collections
//!
//! - `posts` - one document per post, server-assigned id and `createdAt`
//! - `users` - one profile document per user, keyed by user id
//! - `favorites` - one record per user, a map of post id to a denormalized
//!   copy of the post plus `favoritedAt`

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use picstream_core::domain::{
    Caption, DomainError, FavoriteEntry, FavoritesRecord, FeedCursor, ImageUrl, NewPost, Post,
    PostId, UserId, UserProfile,
};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::RemoteClient;

// ============================================================================
// Wire types (JSON)
// ============================================================================

/// A document envelope as the service returns it
#[derive(Debug, Deserialize)]
pub(crate) struct Document<T: Default> {
    /// Document id within its collection
    pub id: String,
    /// The document's fields
    #[serde(default)]
    pub data: T,
}

/// Fields of a post document
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PostFields {
    image_url: Option<String>,
    caption: Option<String>,
    user_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

/// Fields of a profile document
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProfileFields {
    username: Option<String>,
    profile_image: Option<String>,
}

/// One denormalized entry inside a favorites record
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct FavoriteFields {
    image_url: Option<String>,
    caption: Option<String>,
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favorited_at: Option<DateTime<Utc>>,
}

/// The favorites record's fields: post id -> denormalized copy
pub(crate) type FavoritesFields = HashMap<String, FavoriteFields>;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Document<PostFields>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<OrderBy<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_after: Option<StartAfter<'a>>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    filter: Option<Where<'a>>,
}

#[derive(Debug, Serialize)]
struct OrderBy<'a> {
    field: &'a str,
    direction: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartAfter<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct Where<'a> {
    field: &'a str,
    equals: &'a str,
}

// ============================================================================
// Document -> domain conversions
// ============================================================================

fn malformed(document: impl Into<String>, field: &str) -> DomainError {
    DomainError::MalformedDocument {
        document: document.into(),
        field: field.to_string(),
    }
}

/// Validates a post document into a domain [`Post`]
pub(crate) fn post_from_document(doc: Document<PostFields>) -> Result<Post, DomainError> {
    let label = format!("posts/{}", doc.id);
    let id = PostId::new(doc.id).map_err(|_| malformed(label.clone(), "id"))?;
    let image_url = doc
        .data
        .image_url
        .and_then(|url| ImageUrl::new(url).ok())
        .ok_or_else(|| malformed(label.clone(), "imageUrl"))?;
    let caption = doc
        .data
        .caption
        .and_then(|text| Caption::new(text).ok())
        .ok_or_else(|| malformed(label.clone(), "caption"))?;
    let author = doc
        .data
        .user_id
        .and_then(|user| UserId::new(user).ok())
        .ok_or_else(|| malformed(label, "userId"))?;

    Ok(Post {
        id,
        image_url,
        caption,
        author,
        created_at: doc.data.created_at,
    })
}

/// Validates a profile document into a domain [`UserProfile`]
pub(crate) fn profile_from_fields(
    user: &UserId,
    fields: ProfileFields,
) -> Result<UserProfile, DomainError> {
    let profile_image = match fields.profile_image {
        Some(url) => Some(
            ImageUrl::new(url)
                .map_err(|_| malformed(format!("users/{user}"), "profileImage"))?,
        ),
        None => None,
    };

    Ok(UserProfile {
        user: user.clone(),
        username: fields.username.unwrap_or_default(),
        profile_image,
    })
}

/// Validates a favorites record's fields into a domain [`FavoritesRecord`]
pub(crate) fn favorites_from_fields(
    owner: &UserId,
    fields: FavoritesFields,
) -> Result<FavoritesRecord, DomainError> {
    let label = format!("favorites/{owner}");
    let mut entries = HashMap::new();

    for (key, value) in fields {
        let post_id = PostId::new(key).map_err(|_| malformed(label.clone(), "key"))?;
        let image_url = value
            .image_url
            .and_then(|url| ImageUrl::new(url).ok())
            .ok_or_else(|| malformed(label.clone(), "imageUrl"))?;
        let caption = value
            .caption
            .and_then(|text| Caption::new(text).ok())
            .ok_or_else(|| malformed(label.clone(), "caption"))?;
        let author = value
            .user_id
            .and_then(|user| UserId::new(user).ok())
            .ok_or_else(|| malformed(label.clone(), "userId"))?;

        let post = Post {
            id: post_id.clone(),
            image_url,
            caption,
            author,
            created_at: value.created_at,
        };
        // Entries written before favoritedAt existed fall back to the
        // post's own timestamp, then to the epoch
        let favorited_at = value
            .favorited_at
            .or(value.created_at)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        entries.insert(
            post_id,
            FavoriteEntry {
                post,
                favorited_at,
            },
        );
    }

    Ok(FavoritesRecord {
        owner: owner.clone(),
        entries,
    })
}

fn favorite_fields(entry: &FavoriteEntry) -> FavoriteFields {
    FavoriteFields {
        image_url: Some(entry.post.image_url.as_str().to_string()),
        caption: Some(entry.post.caption.as_str().to_string()),
        user_id: Some(entry.post.author.as_str().to_string()),
        created_at: entry.post.created_at,
        favorited_at: Some(entry.favorited_at),
    }
}

// ============================================================================
// Document API calls
// ============================================================================

/// Creates a post document; the service assigns id and `createdAt`
pub(crate) async fn create_post(client: &RemoteClient, new_post: &NewPost) -> Result<Post> {
    let body = serde_json::json!({
        "data": {
            "imageUrl": new_post.image_url.as_str(),
            "caption": new_post.caption.as_str(),
            "userId": new_post.author.as_str(),
        }
    });

    let doc: Document<PostFields> = client
        .request(Method::POST, "/v1/documents/posts")
        .json(&body)
        .send()
        .await
        .context("Failed to send post create request")?
        .error_for_status()
        .context("Post create returned error status")?
        .json()
        .await
        .context("Failed to parse post create response")?;

    debug!(id = %doc.id, "Post document created");
    Ok(post_from_document(doc)?)
}

/// Fetches one feed page, newest first, strictly after the cursor
pub(crate) async fn fetch_feed_page(
    client: &RemoteClient,
    page_size: u32,
    after: Option<&FeedCursor>,
) -> Result<Vec<Post>> {
    let body = QueryRequest {
        order_by: Some(OrderBy {
            field: "createdAt",
            direction: "desc",
        }),
        limit: Some(page_size),
        start_after: after.map(|cursor| StartAfter {
            id: cursor.post_id.as_str(),
            created_at: cursor.created_at,
        }),
        filter: None,
    };

    run_posts_query(client, &body).await
}

/// Fetches all posts created by the given user
pub(crate) async fn fetch_posts_by_author(
    client: &RemoteClient,
    author: &UserId,
) -> Result<Vec<Post>> {
    let body = QueryRequest {
        order_by: Some(OrderBy {
            field: "createdAt",
            direction: "desc",
        }),
        limit: None,
        start_after: None,
        filter: Some(Where {
            field: "userId",
            equals: author.as_str(),
        }),
    };

    run_posts_query(client, &body).await
}

async fn run_posts_query(client: &RemoteClient, body: &QueryRequest<'_>) -> Result<Vec<Post>> {
    let response: QueryResponse = client
        .request(Method::POST, "/v1/documents/posts:query")
        .json(body)
        .send()
        .await
        .context("Failed to send posts query")?
        .error_for_status()
        .context("Posts query returned error status")?
        .json()
        .await
        .context("Failed to parse posts query response")?;

    debug!(count = response.documents.len(), "Posts query returned");
    response
        .documents
        .into_iter()
        .map(|doc| post_from_document(doc).map_err(Into::into))
        .collect()
}

/// Fetches a single post by id
pub(crate) async fn fetch_post(client: &RemoteClient, post: &PostId) -> Result<Option<Post>> {
    let path = format!("/v1/documents/posts/{post}");
    let response = client
        .request(Method::GET, &path)
        .send()
        .await
        .context("Failed to send post fetch request")?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    let doc: Document<PostFields> = response
        .error_for_status()
        .context("Post fetch returned error status")?
        .json()
        .await
        .context("Failed to parse post document")?;

    Ok(Some(post_from_document(doc)?))
}

/// Fetches a user's profile document (None if never edited)
pub(crate) async fn fetch_profile(
    client: &RemoteClient,
    user: &UserId,
) -> Result<Option<UserProfile>> {
    let path = format!("/v1/documents/users/{user}");
    let response = client
        .request(Method::GET, &path)
        .send()
        .await
        .context("Failed to send profile fetch request")?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    let doc: Document<ProfileFields> = response
        .error_for_status()
        .context("Profile fetch returned error status")?
        .json()
        .await
        .context("Failed to parse profile document")?;

    Ok(Some(profile_from_fields(user, doc.data)?))
}

/// Creates or replaces a user's profile document
pub(crate) async fn save_profile(client: &RemoteClient, profile: &UserProfile) -> Result<()> {
    let path = format!("/v1/documents/users/{}", profile.user);
    let body = serde_json::json!({
        "data": {
            "username": profile.username,
            "profileImage": profile.profile_image.as_ref().map(ImageUrl::as_str),
        }
    });

    client
        .request(Method::PUT, &path)
        .json(&body)
        .send()
        .await
        .context("Failed to send profile save request")?
        .error_for_status()
        .context("Profile save returned error status")?;

    debug!(user = %profile.user, "Profile saved");
    Ok(())
}

/// Fetches the owner's favorites record (empty if absent)
pub(crate) async fn fetch_favorites(
    client: &RemoteClient,
    owner: &UserId,
) -> Result<FavoritesRecord> {
    let path = format!("/v1/documents/favorites/{owner}");
    let response = client
        .request(Method::GET, &path)
        .send()
        .await
        .context("Failed to send favorites fetch request")?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(FavoritesRecord::empty(owner.clone()));
    }

    let doc: Document<FavoritesFields> = response
        .error_for_status()
        .context("Favorites fetch returned error status")?
        .json()
        .await
        .context("Failed to parse favorites record")?;

    Ok(favorites_from_fields(owner, doc.data)?)
}

/// Merges one entry into the owner's favorites record (single write)
pub(crate) async fn add_favorite(
    client: &RemoteClient,
    owner: &UserId,
    entry: &FavoriteEntry,
) -> Result<()> {
    let path = format!("/v1/documents/favorites/{owner}");
    let body = serde_json::json!({
        "merge": {
            entry.post.id.as_str(): favorite_fields(entry),
        }
    });

    client
        .request(Method::PATCH, &path)
        .json(&body)
        .send()
        .await
        .context("Failed to send favorite merge request")?
        .error_for_status()
        .context("Favorite merge returned error status")?;

    debug!(owner = %owner, post = %entry.post.id, "Favorite merged");
    Ok(())
}

/// Deletes one key from the owner's favorites record (single write)
pub(crate) async fn remove_favorite(
    client: &RemoteClient,
    owner: &UserId,
    post: &PostId,
) -> Result<()> {
    let path = format!("/v1/documents/favorites/{owner}");
    let body = serde_json::json!({
        "remove": [post.as_str()],
    });

    client
        .request(Method::PATCH, &path)
        .json(&body)
        .send()
        .await
        .context("Failed to send favorite remove request")?
        .error_for_status()
        .context("Favorite remove returned error status")?;

    debug!(owner = %owner, post = %post, "Favorite removed");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
