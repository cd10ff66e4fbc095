//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for identifiers and values exchanged with the
//! remote service. Each newtype validates at construction time so that the
//! rest of the crate never handles raw, possibly-malformed strings.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Identifier types
// ============================================================================

/// Identifier of a post document, assigned by the remote service
///
/// Opaque, unique, and stable for the lifetime of the post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(String);

impl PostId {
    /// Create a new PostId
    ///
    /// # Errors
    /// Returns an error if the id is empty or contains a path separator
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() || id.contains('/') {
            return Err(DomainError::InvalidPostId(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for PostId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PostId> for String {
    fn from(id: PostId) -> Self {
        id.0
    }
}

/// Identifier of a user account, equal to the session identity
///
/// Assigned by the identity provider at sign-up; also keys the per-user
/// favorites record and the profile document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId
    ///
    /// # Errors
    /// Returns an error if the id is empty or contains a path separator
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() || id.contains('/') {
            return Err(DomainError::InvalidUserId(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

// ============================================================================
// Value types
// ============================================================================

/// A retrievable image URL returned by the media store
///
/// Must be an absolute `http` or `https` URL. The URL is treated as opaque
/// beyond the scheme check; the media store owns its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Create a new ImageUrl
    ///
    /// # Errors
    /// Returns an error unless the value is an absolute http/https URL
    pub fn new(url: String) -> Result<Self, DomainError> {
        let valid = (url.starts_with("https://") && url.len() > "https://".len())
            || (url.starts_with("http://") && url.len() > "http://".len());
        if !valid {
            return Err(DomainError::InvalidImageUrl(url));
        }
        Ok(Self(url))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ImageUrl {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ImageUrl> for String {
    fn from(url: ImageUrl) -> Self {
        url.0
    }
}

/// Maximum caption length accepted by the composer
pub const CAPTION_MAX_LEN: usize = 2200;

/// A post caption, non-empty after trimming
///
/// Construction trims surrounding whitespace; the stored value is the
/// trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Caption(String);

impl Caption {
    /// Create a new Caption from raw user input
    ///
    /// # Errors
    /// Returns an error if the trimmed text is empty or exceeds
    /// [`CAPTION_MAX_LEN`] characters
    pub fn new(text: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCaption("caption is empty".to_string()));
        }
        if trimmed.chars().count() > CAPTION_MAX_LEN {
            return Err(DomainError::InvalidCaption(format!(
                "caption exceeds {CAPTION_MAX_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Caption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Caption {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Caption> for String {
    fn from(caption: Caption) -> Self {
        caption.0
    }
}

/// A relative storage path for an uploaded media object
///
/// Paths are scoped under a collection prefix and the owning user, e.g.
/// `posts/u1/1718000000000.jpg`. Must be relative and free of traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaPath(String);

impl MediaPath {
    /// Create a new MediaPath
    ///
    /// # Errors
    /// Returns an error if the path is empty, absolute, contains `..`,
    /// or contains empty segments
    pub fn new(path: String) -> Result<Self, DomainError> {
        if path.is_empty() {
            return Err(DomainError::InvalidMediaPath("path is empty".to_string()));
        }
        if path.starts_with('/') {
            return Err(DomainError::InvalidMediaPath(format!(
                "path must be relative: {path}"
            )));
        }
        if path.split('/').any(|seg| seg.is_empty() || seg == "..") {
            return Err(DomainError::InvalidMediaPath(format!(
                "path contains invalid segment: {path}"
            )));
        }
        Ok(Self(path))
    }

    /// Build the upload path for a post image: `posts/{user}/{millis}.{ext}`
    ///
    /// The millisecond timestamp keeps concurrent uploads by the same user
    /// from colliding.
    pub fn for_post_image(
        user: &UserId,
        timestamp_ms: i64,
        extension: &str,
    ) -> Result<Self, DomainError> {
        Self::new(format!("posts/{user}/{timestamp_ms}.{extension}"))
    }

    /// Build the upload path for a profile image: `profiles/{user}/{millis}.{ext}`
    pub fn for_profile_image(
        user: &UserId,
        timestamp_ms: i64,
        extension: &str,
    ) -> Result<Self, DomainError> {
        Self::new(format!("profiles/{user}/{timestamp_ms}.{extension}"))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MediaPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MediaPath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<MediaPath> for String {
    fn from(path: MediaPath) -> Self {
        path.0
    }
}

// ============================================================================
// Email type
// ============================================================================

/// Validated email address (basic structural validation)
///
/// Checks for exactly one `@`, a non-empty local part, and a domain with at
/// least one dot. Stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new validated Email
    ///
    /// # Errors
    /// Returns an error if the email format is invalid
    pub fn new(email: String) -> Result<Self, DomainError> {
        Self::validate(&email)?;
        Ok(Self(email.to_lowercase()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(email: &str) -> Result<(), DomainError> {
        let mut parts = email.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => {
                return Err(DomainError::InvalidEmail(format!(
                    "must contain exactly one '@': {email}"
                )));
            }
        };

        if local.is_empty() || local.len() > 64 {
            return Err(DomainError::InvalidEmail(format!(
                "invalid local part: {email}"
            )));
        }
        if domain.is_empty() || !domain.contains('.') {
            return Err(DomainError::InvalidEmail(format!(
                "invalid domain: {email}"
            )));
        }
        if domain.split('.').any(str::is_empty) {
            return Err(DomainError::InvalidEmail(format!(
                "domain contains empty label: {email}"
            )));
        }

        Ok(())
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

// ============================================================================
// Tests
// ============================================================================
