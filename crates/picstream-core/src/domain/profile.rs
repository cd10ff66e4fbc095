//! User profile entity

use serde::{Deserialize, Serialize};

use super::newtypes::{ImageUrl, UserId};

/// A user's public profile
///
/// Keyed by the session identity. The document is created implicitly on the
/// first profile edit; only the owning user mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The owning user, equal to the session identity
    pub user: UserId,
    /// Display name shown on the profile screen
    pub username: String,
    /// Optional profile image
    pub profile_image: Option<ImageUrl>,
}

impl UserProfile {
    /// A placeholder profile for a user with no profile document yet
    #[must_use]
    pub fn placeholder(user: UserId) -> Self {
        Self {
            user,
            username: String::new(),
            profile_image: None,
        }
    }

    /// Whether this profile has ever been edited (has a display name)
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.username.is_empty() && self.profile_image.is_none()
    }
}
