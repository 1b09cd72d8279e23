//! In-memory cache and stream implementations.
//!
//! Used by tests and the demo CLI. Semantics mirror the Redis backend
//! closely enough that producer code cannot tell them apart: last-write-wins
//! keys with TTL expiry, and an append-only multi-reader log.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

use crate::domain::DispatchMessage;
use crate::error::QueueError;
use crate::ports::{PayloadCache, TaskStream};

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// In-memory TTL cache.
///
/// Expiry is lazy: entries past their deadline are dropped on read. Uses
/// tokio's `Instant` so tests can drive expiry with the paused clock.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayloadCache for InMemoryCache {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), QueueError> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, QueueError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// In-memory append-only log.
///
/// Consumers read by offset; `wait_for` blocks until an entry at the given
/// offset exists, using a `Notify` woken on every append.
pub struct InMemoryStream {
    entries: Mutex<Vec<DispatchMessage>>,
    notify: Arc<Notify>,
}

impl InMemoryStream {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Number of messages appended so far.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Copy of all messages from `offset` onward, in append order.
    pub async fn read_from(&self, offset: usize) -> Vec<DispatchMessage> {
        let entries = self.entries.lock().await;
        entries.iter().skip(offset).cloned().collect()
    }

    /// Block until a message exists at `offset`, then return it.
    pub async fn wait_for(&self, offset: usize) -> DispatchMessage {
        loop {
            // Register interest before checking, so an append between the
            // check and the await cannot be missed.
            let notified = self.notify.notified();
            {
                let entries = self.entries.lock().await;
                if let Some(message) = entries.get(offset) {
                    return message.clone();
                }
            }
            notified.await;
        }
    }
}

impl Default for InMemoryStream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStream for InMemoryStream {
    async fn add(&self, message: &DispatchMessage) -> Result<(), QueueError> {
        let mut entries = self.entries.lock().await;
        entries.push(message.clone());
        drop(entries);
        self.notify.notify_waiters();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CorrelationKey, TaskType};

    fn message(model_id: i64) -> DispatchMessage {
        DispatchMessage::new(
            TaskType::Predict,
            None,
            model_id,
            vec![],
            &CorrelationKey::new(),
        )
    }

    #[tokio::test]
    async fn cache_returns_value_within_ttl() {
        let cache = InMemoryCache::new();
        cache
            .set("k", b"v".to_vec(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test(start_paused = true)]
    async fn cache_entry_expires_after_ttl() {
        let cache = InMemoryCache::new();
        cache
            .set("k", b"v".to_vec(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some(b"v".to_vec()));

        tokio::time::advance(Duration::from_millis(1100)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn cache_last_write_wins() {
        let cache = InMemoryCache::new();
        cache
            .set("k", b"old".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set("k", b"new".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn cache_missing_key_is_none_not_error() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn stream_preserves_append_order() {
        let stream = InMemoryStream::new();
        stream.add(&message(1)).await.unwrap();
        stream.add(&message(2)).await.unwrap();
        stream.add(&message(3)).await.unwrap();

        let all = stream.read_from(0).await;
        let ids: Vec<i64> = all.iter().map(|m| m.model_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let tail = stream.read_from(2).await;
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].model_id, 3);
    }

    #[tokio::test]
    async fn stream_wait_for_wakes_on_append() {
        let stream = Arc::new(InMemoryStream::new());

        let reader = {
            let stream = Arc::clone(&stream);
            tokio::spawn(async move { stream.wait_for(0).await })
        };

        // Give the reader a chance to park before appending.
        tokio::task::yield_now().await;
        stream.add(&message(7)).await.unwrap();

        let received = tokio::time::timeout(Duration::from_secs(1), reader)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.model_id, 7);
    }
}
