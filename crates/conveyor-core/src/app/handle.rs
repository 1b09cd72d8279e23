//! Task handles: polling a dispatched task's cached state.

use std::sync::Arc;

use crate::domain::{CorrelationKey, DataFrame, TaskStatus};
use crate::error::QueueError;
use crate::ports::PayloadCache;

/// Client-side view of one dispatched task.
///
/// Holds the store reference and the correlation key, nothing else. All
/// reads are against cache entries the consumer mutates directly; the
/// handle never writes, and it does not own the entries (they expire on
/// their own TTL whether or not the handle is still alive).
#[derive(Clone)]
pub struct TaskHandle {
    cache: Arc<dyn PayloadCache>,
    key: CorrelationKey,
}

impl TaskHandle {
    pub fn new(cache: Arc<dyn PayloadCache>, key: CorrelationKey) -> Self {
        Self { cache, key }
    }

    pub fn key(&self) -> &CorrelationKey {
        &self.key
    }

    /// Current status, or `None` if the entry is absent or expired.
    ///
    /// Bytes that do not decode to a known status mean some writer broke
    /// the wire contract; that surfaces as a backend error, not a guess.
    pub async fn get_status(&self) -> Result<Option<TaskStatus>, QueueError> {
        let Some(bytes) = self.cache.get(&self.key.status()).await? else {
            return Ok(None);
        };
        TaskStatus::from_bytes(&bytes)
            .map(Some)
            .ok_or_else(|| {
                QueueError::Backend(format!(
                    "unrecognized status bytes at {}",
                    self.key.status()
                ))
            })
    }

    /// Result value deposited by the consumer, if any yet.
    pub async fn get_result(&self) -> Result<Option<serde_json::Value>, QueueError> {
        match self.cache.get(&self.key.result()).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// The bulky tabular input attached at dispatch time, if it was
    /// provided and has not expired.
    pub async fn get_dataframe(&self) -> Result<Option<DataFrame>, QueueError> {
        match self.cache.get(&self.key.dataframe()).await? {
            Some(bytes) => Ok(Some(DataFrame::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryCache;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn reads_status_written_by_a_consumer() {
        let cache = Arc::new(InMemoryCache::new());
        let key = CorrelationKey::new();

        cache
            .set(&key.status(), TaskStatus::InProgress.to_bytes(), TTL)
            .await
            .unwrap();

        let handle = TaskHandle::new(cache, key);
        assert_eq!(
            handle.get_status().await.unwrap(),
            Some(TaskStatus::InProgress)
        );
    }

    #[tokio::test]
    async fn absent_entries_read_as_none() {
        let cache = Arc::new(InMemoryCache::new());
        let handle = TaskHandle::new(cache, CorrelationKey::new());

        assert_eq!(handle.get_status().await.unwrap(), None);
        assert_eq!(handle.get_result().await.unwrap(), None);
        assert!(handle.get_dataframe().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_status_bytes_are_an_error() {
        let cache = Arc::new(InMemoryCache::new());
        let key = CorrelationKey::new();
        cache
            .set(&key.status(), b"definitely-not-a-status".to_vec(), TTL)
            .await
            .unwrap();

        let handle = TaskHandle::new(cache, key);
        assert!(matches!(
            handle.get_status().await,
            Err(QueueError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn reads_result_deposited_by_a_consumer() {
        let cache = Arc::new(InMemoryCache::new());
        let key = CorrelationKey::new();
        let result = serde_json::json!({"accuracy": 0.93});

        cache
            .set(&key.result(), serde_json::to_vec(&result).unwrap(), TTL)
            .await
            .unwrap();

        let handle = TaskHandle::new(cache, key);
        assert_eq!(handle.get_result().await.unwrap(), Some(result));
    }
}
