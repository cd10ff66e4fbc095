//! Integration tests for the Remote Data Service adapter
//!
//! Each module spins up a wiremock server standing in for the service and
//! drives the adapter through the core's port traits.

mod common;
mod test_documents;
mod test_identity;
mod test_media;
mod test_watch;
