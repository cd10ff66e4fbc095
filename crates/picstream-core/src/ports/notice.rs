//! User notice port (driven/secondary port)
//!
//! One-shot, user-facing notices: validation messages, success
//! confirmations, and failure alerts. This is the only channel through which
//! use cases talk to the user; everything else goes to the tracing log.
//!
//! ## Design Notes
//!
//! - Notices are fire-and-forget; the caller does not wait for
//!   acknowledgement.
//! - Implementations should not fail: a notice that cannot be shown is
//!   dropped silently rather than turned into another error.

use serde::{Deserialize, Serialize};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Informational, e.g. progress hints
    Info,
    /// A completed action, e.g. "post published"
    Success,
    /// A failed or rejected action
    Error,
}

/// A one-shot notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Short title, e.g. "Image Favorited"
    pub title: String,
    /// Body text with details
    pub body: String,
    /// Severity
    pub kind: NoticeKind,
}

impl Notice {
    /// Creates an informational notice
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Info,
        }
    }

    /// Creates a success notice
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Success,
        }
    }

    /// Creates an error notice
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// Port trait for showing one-shot notices to the user
#[async_trait::async_trait]
pub trait IUserNotice: Send + Sync {
    /// Shows a notice
    async fn show(&self, notice: &Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(Notice::info("t", "b").kind, NoticeKind::Info);
        assert_eq!(Notice::success("t", "b").kind, NoticeKind::Success);
        assert_eq!(Notice::error("t", "b").kind, NoticeKind::Error);
    }
}
