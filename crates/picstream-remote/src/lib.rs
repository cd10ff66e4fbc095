//! Picstream Remote - Remote Data Service REST adapter
//!
//! Implements the core's remote ports over the service's REST API:
//! - [`client`] - Typed HTTP client (base URL, bearer auth, API key)
//! - [`identity`] - Email/password sign-up, sign-in, sign-out
//! - [`documents`] - Posts, profiles, and favorites documents and queries
//! - [`media`] - Image uploads returning retrievable URLs
//! - [`watch`] - Long-poll document watches and poll-backed query watches
//! - [`provider`] - [`RemoteStoreProvider`] wiring it all behind the ports
//!
//! [`RemoteStoreProvider`]: provider::RemoteStoreProvider

pub mod client;
pub mod documents;
pub mod identity;
pub mod media;
pub mod provider;
pub mod watch;

pub use client::RemoteClient;
pub use identity::IdentityAdapter;
pub use provider::RemoteStoreProvider;
