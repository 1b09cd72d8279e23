//! Dispatch messages: the small records appended to the task stream.

use serde::{Deserialize, Serialize};

use super::{CorrelationKey, TaskType};

/// The unit written to the task stream.
///
/// Kept deliberately small; the stream is optimized for high-throughput
/// small records, so bulky tabular data goes through the cache under the
/// correlation key's `dataframe` sub-key instead of riding in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchMessage {
    pub task_type: TaskType,

    /// Tenant identifier. Empty string encodes "absent" because the stream
    /// transport cannot represent null; this encoding exists only at this
    /// wire boundary, callers pass an `Option`.
    pub company_id: String,

    /// Target model identifier.
    pub model_id: i64,

    /// Opaque serialized payload, encoded independently of the stream's
    /// own framing.
    pub payload: Vec<u8>,

    /// Correlation key base; consumers derive the status/dataframe/result
    /// sub-keys from it.
    pub redis_key: String,
}

impl DispatchMessage {
    pub fn new(
        task_type: TaskType,
        tenant_id: Option<&str>,
        model_id: i64,
        payload: Vec<u8>,
        key: &CorrelationKey,
    ) -> Self {
        Self {
            task_type,
            company_id: tenant_id.unwrap_or("").to_string(),
            model_id,
            payload,
            redis_key: key.base().to_string(),
        }
    }

    /// Tenant id with the wire encoding undone.
    pub fn tenant_id(&self) -> Option<&str> {
        if self.company_id.is_empty() {
            None
        } else {
            Some(&self.company_id)
        }
    }

    /// Render as ordered field/value pairs for stream transports that frame
    /// entries as flat field maps (e.g. Redis streams).
    pub fn fields(&self) -> Vec<(&'static str, Vec<u8>)> {
        vec![
            ("task_type", self.task_type.as_str().as_bytes().to_vec()),
            ("company_id", self.company_id.as_bytes().to_vec()),
            ("model_id", self.model_id.to_string().into_bytes()),
            ("payload", self.payload.clone()),
            ("redis_key", self.redis_key.as_bytes().to_vec()),
        ]
    }
}
