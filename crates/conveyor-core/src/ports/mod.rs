//! Ports: trait seams over external systems.
//!
//! Each trait hides a backing store (Redis in production, in-memory for
//! dev/test) behind an interface the producer can be written against. The
//! clock and key generator are seams too, so tests can pin time and assert
//! on generated keys.

pub mod cache;
pub mod clock;
pub mod key_generator;
pub mod stream;

pub use self::cache::PayloadCache;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::key_generator::{KeyGenerator, UlidKeyGenerator};
pub use self::stream::TaskStream;
