//! KeyGenerator port: correlation key generation.

use ulid::Ulid;

use crate::domain::CorrelationKey;
use crate::ports::Clock;

/// Generates fresh correlation keys.
///
/// A trait so producer tests can substitute a deterministic generator.
/// `Send + Sync` because one producer may be shared across tasks.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> CorrelationKey;
}

/// ULID-based key generator.
///
/// ULIDs sort by creation time and need no coordination between producers,
/// which is exactly the collision profile the correlation key needs. The
/// clock is injected so a pinned clock yields a pinned timestamp component
/// (the random component still differs per call).
pub struct UlidKeyGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidKeyGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> KeyGenerator for UlidKeyGenerator<C> {
    fn generate(&self) -> CorrelationKey {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        CorrelationKey::from_ulid(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
