//! Ultrasonic head alignment
//!
//! The [`EchoAligner`] sweeps the head toward the nearest echo, then
//! watches that echo and sweeps again when it moves.

pub mod aligner;
pub mod history;

pub use aligner::EchoAligner;
pub use history::EchoHistory;
