//! Redis-backed cache and stream.
//!
//! One connection serves both ports: plain keys with `SET .. EX` for the
//! cache, `XADD` on a stream for the dispatch log. The durability boundary
//! is XADD's acknowledgment; replication lag on a clustered deployment is
//! not observable through this API.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, error, info};

use crate::config::QueueConfig;
use crate::domain::DispatchMessage;
use crate::error::QueueError;
use crate::ports::{PayloadCache, TaskStream};

/// Stream the dispatch messages are appended to.
pub const TASKS_STREAM_NAME: &str = "ml-tasks";

/// Shared Redis connection implementing both `PayloadCache` and `TaskStream`.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
    stream_name: String,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("stream_name", &self.stream_name)
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connect and verify the broker is reachable.
    ///
    /// Fails fast: an unreachable broker is a construction error, so a
    /// producer is never handed a backend it cannot dispatch through.
    pub async fn connect(config: &QueueConfig) -> Result<Self, QueueError> {
        let url = config.redis_url();
        info!(host = %config.host, port = config.port, db = config.db, "connecting to redis");

        let client = redis::Client::open(url.as_str()).map_err(map_redis_err)?;
        let mut conn = ConnectionManager::new(client).await.map_err(map_redis_err)?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("redis ping failed: {e}");
                map_redis_err(e)
            })?;
        debug!(%pong, "redis connection verified");

        Ok(Self {
            conn,
            stream_name: TASKS_STREAM_NAME.to_string(),
        })
    }

    /// Use a different stream name (the default is [`TASKS_STREAM_NAME`]).
    pub fn with_stream_name(mut self, name: impl Into<String>) -> Self {
        self.stream_name = name.into();
        self
    }
}

#[async_trait]
impl PayloadCache for RedisBackend {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), QueueError> {
        debug!(%key, ttl_secs = ttl.as_secs(), "cache SET");
        let mut conn = self.conn.clone();
        // EX takes whole seconds; sub-second TTLs round up to 1.
        let ttl_secs = ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(map_redis_err)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, QueueError> {
        debug!(%key, "cache GET");
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_err)?;
        Ok(value)
    }
}

#[async_trait]
impl TaskStream for RedisBackend {
    async fn add(&self, message: &DispatchMessage) -> Result<(), QueueError> {
        debug!(
            stream = %self.stream_name,
            task_type = %message.task_type,
            model_id = message.model_id,
            "stream XADD"
        );
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("XADD");
        cmd.arg(&self.stream_name).arg("*");
        for (name, value) in message.fields() {
            cmd.arg(name).arg(value);
        }
        // XADD returns the assigned entry id; nothing past success is used.
        let _entry_id: String = cmd.query_async(&mut conn).await.map_err(|e| {
            error!("stream append failed: {e}");
            map_redis_err(e)
        })?;
        Ok(())
    }
}

fn map_redis_err(e: redis::RedisError) -> QueueError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() {
        QueueError::Connectivity(e.to_string())
    } else {
        QueueError::Backend(e.to_string())
    }
}
