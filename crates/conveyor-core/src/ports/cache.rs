//! PayloadCache port: key/value store with per-key expiry.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::QueueError;

/// Key/value store used for everything too big or too mutable for the
/// stream: bulky dataframes and per-task status flags.
///
/// Semantics:
/// - `set` overwrites any prior value at the key (last write wins) and
///   schedules automatic expiry after `ttl`.
/// - `get` returns `Ok(None)` for absent *or expired* keys; expiry is not
///   an error.
/// - Writes are visible to every process on the same backing store as soon
///   as they return. No retries here; connectivity failures propagate.
#[async_trait]
pub trait PayloadCache: Send + Sync {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), QueueError>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, QueueError>;
}
