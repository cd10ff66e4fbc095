//! Live watch machinery
//!
//! Two flavours of remote watch feed a [`LiveSubscription`]:
//!
//! - **Document watch** - a long-poll loop against the service's `:watch`
//!   endpoint, carrying a `since` version so only real changes come back.
//! - **Query watch** - interval polling for endpoints without a long-poll
//!   form (the per-author post grid), emitting only when the result changes.
//!
//! Both run on a spawned task that terminates when the subscription's
//! cancellation token fires, so dropping the subscription tears the loop
//! down. Malformed updates are logged and discarded rather than ending the
//! watch.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use picstream_core::ports::LiveSubscription;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::RemoteClient;
use crate::documents::Document;

/// Delay before re-polling after a failed watch request
const ERROR_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Headroom added to the HTTP timeout over the long-poll window
const LONG_POLL_HEADROOM: Duration = Duration::from_secs(10);

/// Capacity of the update channel behind each subscription
const CHANNEL_CAPACITY: usize = 16;

/// One long-poll result: the changed document and its new version
#[derive(Debug, Deserialize)]
struct WatchResponse<T: Default> {
    document: Document<T>,
    version: u64,
}

/// Spawns a long-poll watch on a single document
///
/// `convert` validates each raw document into the update type; a conversion
/// failure drops that update and keeps the watch alive.
pub(crate) fn watch_document<T, U, F>(
    client: RemoteClient,
    collection: &str,
    id: &str,
    long_poll_timeout: Duration,
    convert: F,
) -> LiveSubscription<U>
where
    T: DeserializeOwned + Default + Send + 'static,
    U: Send + 'static,
    F: Fn(Document<T>) -> Result<U> + Send + 'static,
{
    let path = format!("/v1/documents/{collection}/{id}:watch");
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        let mut since: u64 = 0;
        loop {
            tokio::select! {
                () = task_cancel.cancelled() => break,
                result = poll_document::<T>(&client, &path, since, long_poll_timeout) => {
                    match result {
                        Ok(Some(response)) => {
                            since = response.version;
                            match convert(response.document) {
                                Ok(update) => {
                                    if tx.send(update).await.is_err() {
                                        break;
                                    }
                                }
                                Err(err) => {
                                    warn!(error = %err, "Discarding malformed watch update");
                                }
                            }
                        }
                        // Long poll elapsed with no change; go straight back
                        Ok(None) => {}
                        Err(err) => {
                            warn!(error = %err, "Watch poll failed; backing off");
                            tokio::select! {
                                () = task_cancel.cancelled() => break,
                                () = tokio::time::sleep(ERROR_RETRY_DELAY) => {}
                            }
                        }
                    }
                }
            }
        }
        debug!(path = %path, "Document watch stopped");
    });

    LiveSubscription::new(rx, cancel)
}

async fn poll_document<T>(
    client: &RemoteClient,
    path: &str,
    since: u64,
    long_poll_timeout: Duration,
) -> Result<Option<WatchResponse<T>>>
where
    T: DeserializeOwned + Default,
{
    let response = client
        .request(Method::GET, path)
        .query(&[
            ("since", since.to_string()),
            ("timeout", long_poll_timeout.as_secs().to_string()),
        ])
        .timeout(long_poll_timeout + LONG_POLL_HEADROOM)
        .send()
        .await
        .context("Failed to send watch request")?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body: WatchResponse<T> = response
        .error_for_status()
        .context("Watch returned error status")?
        .json()
        .await
        .context("Failed to parse watch response")?;

    Ok(Some(body))
}

/// Spawns an interval-poll watch over a query
///
/// Fetches immediately, then every `interval`; emits only when the result
/// differs from the previous emission. Fetch failures are logged and the
/// next interval tries again.
pub(crate) fn watch_query<T, F, Fut>(interval: Duration, fetch: F) -> LiveSubscription<T>
where
    T: PartialEq + Clone + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        let mut last: Option<T> = None;
        loop {
            tokio::select! {
                () = task_cancel.cancelled() => break,
                result = fetch() => {
                    match result {
                        Ok(current) => {
                            if last.as_ref() != Some(&current) {
                                last = Some(current.clone());
                                if tx.send(current).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Err(err) => warn!(error = %err, "Query poll failed"),
                    }
                    tokio::select! {
                        () = task_cancel.cancelled() => break,
                        () = tokio::time::sleep(interval) => {}
                    }
                }
            }
        }
        debug!("Query watch stopped");
    });

    LiveSubscription::new(rx, cancel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_query_watch_emits_initial_and_changes() {
        let counter = Arc::new(AtomicUsize::new(0));
        let fetch_counter = Arc::clone(&counter);

        let mut sub = watch_query(Duration::from_millis(5), move || {
            let n = fetch_counter.fetch_add(1, Ordering::SeqCst);
            // Same value twice, then a change
            let value = if n < 2 { vec![1] } else { vec![1, 2] };
            async move { Ok(value) }
        });

        assert_eq!(sub.next().await.unwrap(), vec![1]);
        // The repeat fetch of the same value must be skipped
        assert_eq!(sub.next().await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_query_watch_stops_on_dispose() {
        let counter = Arc::new(AtomicUsize::new(0));
        let fetch_counter = Arc::clone(&counter);

        let sub = watch_query(Duration::from_millis(1), move || {
            fetch_counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(0u32) }
        });

        // Let it run briefly, then dispose and confirm polling stops
        tokio::time::sleep(Duration::from_millis(10)).await;
        sub.dispose();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let after_dispose = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(counter.load(Ordering::SeqCst) <= after_dispose + 1);
    }

    #[tokio::test]
    async fn test_query_watch_survives_fetch_errors() {
        let counter = Arc::new(AtomicUsize::new(0));
        let fetch_counter = Arc::clone(&counter);

        let mut sub = watch_query(Duration::from_millis(5), move || {
            let n = fetch_counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    anyhow::bail!("transient failure")
                }
                Ok(vec![n])
            }
        });

        // First fetch fails; the second succeeds and is emitted
        assert_eq!(sub.next().await.unwrap(), vec![1]);
    }
}
