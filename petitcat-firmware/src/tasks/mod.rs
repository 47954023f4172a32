//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod head;
pub mod telemetry;

pub use head::{head_task, HeadAligner};
pub use telemetry::telemetry_task;
