//! TaskProducer: the dispatch path.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::config::DEFAULT_TTL_SECONDS;
use crate::domain::{DataFrame, DispatchMessage, TaskStatus, TaskType};
use crate::error::QueueError;
use crate::ports::{KeyGenerator, PayloadCache, SystemClock, TaskStream, UlidKeyGenerator};

use super::TaskHandle;

/// Puts tasks on the queue.
///
/// Orchestration per dispatch: serialize the payload, generate a
/// correlation key, stash the dataframe (if any) and the initial status in
/// the cache, append the dispatch message to the stream, hand back a
/// [`TaskHandle`].
///
/// Holds no cross-call state beyond the store handles, so one producer can
/// be shared across concurrently running tasks. Blocking points are the
/// store calls themselves; there is no internal retry, timeout, or
/// background work. A failed dispatch leaves at most some cache entries
/// behind, and those expire on their own TTL.
pub struct TaskProducer {
    cache: Arc<dyn PayloadCache>,
    stream: Arc<dyn TaskStream>,
    keys: Arc<dyn KeyGenerator>,
    ttl: Duration,
}

impl TaskProducer {
    pub fn new(cache: Arc<dyn PayloadCache>, stream: Arc<dyn TaskStream>) -> Self {
        Self {
            cache,
            stream,
            keys: Arc::new(UlidKeyGenerator::new(SystemClock)),
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS),
        }
    }

    /// Override the TTL applied to the cache entries written at dispatch.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_key_generator(mut self, keys: Arc<dyn KeyGenerator>) -> Self {
        self.keys = keys;
        self
    }

    /// Add a task to the queue.
    ///
    /// `payload` is lightweight structured data that rides inside the
    /// stream message; `dataframe` is bulky tabular input that travels
    /// through the cache side channel instead.
    ///
    /// The status entry is written strictly before the stream append.
    /// Otherwise a fast consumer could pick up the message, finish the
    /// work, write `complete`, and have it clobbered by our late `waiting`.
    ///
    /// Once this returns `Ok`, the task is durably queued; there is no
    /// producer-side cancel.
    pub async fn dispatch(
        &self,
        task_type: TaskType,
        tenant_id: Option<&str>,
        model_id: i64,
        payload: &serde_json::Value,
        dataframe: Option<&DataFrame>,
    ) -> Result<TaskHandle, QueueError> {
        let payload_bytes = serde_json::to_vec(payload)?;

        let key = self.keys.generate();
        let message = DispatchMessage::new(task_type, tenant_id, model_id, payload_bytes, &key);

        if let Some(frame) = dataframe {
            let encoded = frame.to_bytes()?;
            debug!(key = %key, rows = frame.num_rows(), "caching dataframe");
            self.cache
                .set(&key.dataframe(), encoded, self.ttl)
                .await
                .inspect_err(|e| error!("dispatch failed caching dataframe: {e}"))?;
        }

        self.cache
            .set(&key.status(), TaskStatus::Waiting.to_bytes(), self.ttl)
            .await
            .inspect_err(|e| error!("dispatch failed caching status: {e}"))?;

        self.stream
            .add(&message)
            .await
            .inspect_err(|e| error!("dispatch failed appending to stream: {e}"))?;

        debug!(key = %key, task_type = %task_type, model_id, "task dispatched");
        Ok(TaskHandle::new(Arc::clone(&self.cache), key))
    }
}
