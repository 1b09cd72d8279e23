//! conveyor-core
//!
//! Producer side of an asynchronous ML task queue: a synchronous caller
//! dispatches work onto a durable stream, stashes bulky inputs and a status
//! flag in a TTL cache, and gets back a handle it can poll later.
//!
//! # Module layout
//! - **domain**: task types, statuses, correlation keys, dispatch messages
//! - **ports**: trait seams over the cache, the stream, clocks and key generation
//! - **impls**: in-memory backends (dev/test) and the Redis backend (production)
//! - **app**: the producer orchestration and the task handle
//!
//! # Design notes
//! - The stream carries only small dispatch records; dataframes travel
//!   through the cache under a derived sub-key.
//! - The status entry is written *before* the stream append so a consumer
//!   that picks the message up immediately always finds it.
//! - Nothing here retries: connectivity failures surface to the caller, and
//!   orphaned cache entries from a half-finished dispatch expire via TTL.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use app::{TaskHandle, TaskProducer};
pub use config::QueueConfig;
pub use domain::{CorrelationKey, DataFrame, DispatchMessage, TaskStatus, TaskType};
pub use error::QueueError;
