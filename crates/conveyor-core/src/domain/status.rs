//! Task status values written to the cache.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a dispatched task.
///
/// Transitions (the producer only ever writes `Waiting`; everything after
/// that is the consumer's job):
/// - Waiting -> InProgress -> Complete
/// - Waiting -> InProgress -> Failed
/// - Waiting -> Timeout (never claimed before its cache entry expired)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Dispatched, not yet claimed by a worker. Initial value.
    Waiting,
    /// A worker has claimed the task and is executing it.
    InProgress,
    /// Finished successfully; a result may be present under the result key.
    Complete,
    /// Finished with an error.
    Failed,
    /// Gave up waiting for a worker.
    Timeout,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Waiting => "waiting",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Complete => "complete",
            TaskStatus::Failed => "failed",
            TaskStatus::Timeout => "timeout",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(TaskStatus::Waiting),
            "in_progress" => Some(TaskStatus::InProgress),
            "complete" => Some(TaskStatus::Complete),
            "failed" => Some(TaskStatus::Failed),
            "timeout" => Some(TaskStatus::Timeout),
            _ => None,
        }
    }

    /// Cache byte encoding: plain UTF-8 wire string, so non-Rust consumers
    /// can read and write status entries without sharing a serializer.
    pub fn to_bytes(self) -> Vec<u8> {
        self.as_str().as_bytes().to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().and_then(Self::from_str)
    }

    /// Is this a terminal status (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Complete | TaskStatus::Failed | TaskStatus::Timeout
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
