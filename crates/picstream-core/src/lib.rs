//! Picstream Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Post`, `UserProfile`, `FavoritesRecord`, `FeedCursor`
//! - **Use cases** - `SessionUseCase`, `FeedUseCase`, `FavoritesUseCase`,
//!   `ComposeUseCase`, `ProfileUseCase`
//! - **Port definitions** - Traits for adapters: `IIdentityProvider`,
//!   `IDocumentStore`, `IMediaStore`, `IImageGallery`, `IUserNotice`,
//!   `ISessionStore`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no transport
//! dependencies. Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces; identity is
//! always passed in explicitly rather than read from process-wide state.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
