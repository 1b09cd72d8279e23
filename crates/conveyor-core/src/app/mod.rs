//! App layer: wires the ports together.
//!
//! - **TaskProducer**: builds dispatch messages, seeds the cache, appends
//!   to the stream.
//! - **TaskHandle**: read-only view of one dispatched task's cached state.

pub mod handle;
pub mod producer;

pub use self::handle::TaskHandle;
pub use self::producer::TaskProducer;
