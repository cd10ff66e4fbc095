//! Domain error types
//!
//! Validation failures raised when constructing domain values or when a
//! document arriving from the remote service fails required-field checks.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid post identifier
    #[error("Invalid post id: {0}")]
    InvalidPostId(String),

    /// Invalid user identifier
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    /// Invalid image URL (must be absolute http/https)
    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(String),

    /// Caption is empty after trimming or too long
    #[error("Invalid caption: {0}")]
    InvalidCaption(String),

    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Invalid media storage path
    #[error("Invalid media path: {0}")]
    InvalidMediaPath(String),

    /// A document from the remote service is missing a required field
    #[error("Malformed document: missing or invalid field `{field}` in {document}")]
    MalformedDocument {
        /// The collection/document the field belongs to
        document: String,
        /// The missing or invalid field name
        field: String,
    },
}
