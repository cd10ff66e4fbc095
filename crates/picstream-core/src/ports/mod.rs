//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the interfaces the domain core depends on, implemented by
//! adapter crates (the REST adapter, the CLI's local adapters) or by
//! in-memory fakes in tests.
//!
//! ## Ports Overview
//!
//! - [`IIdentityProvider`] - Email/password authentication with the service
//! - [`IDocumentStore`] - Posts, profiles, and favorites documents + watches
//! - [`IMediaStore`] - Blob uploads returning retrievable URLs
//! - [`IImageGallery`] / [`IHaptics`] - Local device capabilities
//! - [`IUserNotice`] - One-shot user-facing notices
//! - [`ISessionStore`] - Across-launch session persistence

pub mod document_store;
pub mod gallery;
pub mod identity;
pub mod media_store;
pub mod notice;
pub mod session_store;
pub mod subscription;

pub use document_store::IDocumentStore;
pub use gallery::{IHaptics, IImageGallery, ImpactStyle, PermissionState, PickedImage};
pub use identity::{AuthSession, IIdentityProvider};
pub use media_store::IMediaStore;
pub use notice::{IUserNotice, Notice, NoticeKind};
pub use session_store::ISessionStore;
pub use subscription::LiveSubscription;
