//! Domain model (task kinds, statuses, correlation keys, messages, frames).

pub mod correlation;
pub mod dataframe;
pub mod message;
pub mod status;
pub mod task_type;

pub use correlation::CorrelationKey;
pub use dataframe::DataFrame;
pub use message::DispatchMessage;
pub use status::TaskStatus;
pub use task_type::TaskType;
