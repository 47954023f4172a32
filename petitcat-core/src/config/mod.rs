//! Configuration types
//!
//! Board-agnostic configuration for the ultrasonic head.

pub mod types;

pub use types::*;
