//! TaskStream port: the append-only dispatch log.

use async_trait::async_trait;

use crate::domain::DispatchMessage;
use crate::error::QueueError;

/// Durable, ordered, multi-reader log of dispatch messages.
///
/// Semantics:
/// - Appends from one producer are visible to consumers in append order;
///   no ordering is promised across independent producers beyond the
///   log-assigned sequence.
/// - `add` returning `Ok` is the durability boundary: once acknowledged, a
///   message survives producer crash. Implementations must document any
///   weaker guarantee their backing log actually provides.
/// - Fire and forget from the producer's side: no acknowledgment payload
///   is consumed beyond success/failure. No silent drops.
#[async_trait]
pub trait TaskStream: Send + Sync {
    async fn add(&self, message: &DispatchMessage) -> Result<(), QueueError>;
}
