//! Port implementations: in-memory (dev/test) and Redis (production).

pub mod memory;
pub mod redis;

pub use self::memory::{InMemoryCache, InMemoryStream};
pub use self::redis::{RedisBackend, TASKS_STREAM_NAME};
