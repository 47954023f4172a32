//! Head state machine
//!
//! The head is either searching for the nearest echo (aligning) or
//! watching the echo it found (monitoring). Transitions are explicit and
//! driven by [`HeadEvent`]s produced by the aligner.

pub mod events;
pub mod machine;

pub use events::HeadEvent;
pub use machine::Mode;
