use thiserror::Error;

/// Errors surfaced by the producer and its backing stores.
///
/// Every failure path is a distinct kind so callers can tell "the broker is
/// down" apart from "this payload cannot be serialized". None of these are
/// retried internally; they propagate to whoever called `dispatch`.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The cache or stream backend is unreachable at call time.
    #[error("backend unreachable: {0}")]
    Connectivity(String),

    /// The payload or dataframe could not be serialized. The call never
    /// reaches the store when this happens.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend rejected an operation for a non-connectivity reason.
    #[error("backend operation failed: {0}")]
    Backend(String),
}
