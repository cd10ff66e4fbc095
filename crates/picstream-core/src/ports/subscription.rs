//! Cancellable live-subscription handle
//!
//! Remote watches deliver updates through an mpsc channel; the subscription
//! owns a cancellation token that stops the producing task. The consuming
//! screen owns the subscription and disposal happens automatically on drop,
//! so navigating away cannot leak a watch loop.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A live subscription to a remote document or query
///
/// Yields a fresh snapshot of the watched value on every remote change.
/// Dropping the subscription (or calling [`dispose`](Self::dispose)) cancels
/// the producing task; any in-flight snapshot is discarded.
#[derive(Debug)]
pub struct LiveSubscription<T> {
    updates: mpsc::Receiver<T>,
    cancel: CancellationToken,
}

impl<T> LiveSubscription<T> {
    /// Pairs a receiver with the token that stops its producer
    #[must_use]
    pub fn new(updates: mpsc::Receiver<T>, cancel: CancellationToken) -> Self {
        Self { updates, cancel }
    }

    /// Waits for the next snapshot
    ///
    /// Returns `None` once the subscription is disposed or the producer has
    /// stopped.
    pub async fn next(&mut self) -> Option<T> {
        self.updates.recv().await
    }

    /// Attempts to take an already-delivered snapshot without waiting
    pub fn try_next(&mut self) -> Option<T> {
        self.updates.try_recv().ok()
    }

    /// Stops the producing task
    ///
    /// Idempotent; also invoked on drop.
    pub fn dispose(&self) {
        self.cancel.cancel();
    }

    /// Whether the subscription has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<T> Drop for LiveSubscription<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
