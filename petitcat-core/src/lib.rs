//! Board-agnostic core logic for the petitcat ultrasonic head
//!
//! This crate contains all head behavior that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (servo actuator, range sensor, telemetry sink)
//! - Echo measurement type and history
//! - Alignment/monitoring state machine
//! - The [`EchoAligner`] controller
//! - Head geometry (heading toward a point, echo position)
//! - Configuration type definitions
//!
//! The aligner is driven by calling [`EchoAligner::tick`] from a polling
//! loop with the current time in milliseconds. It never blocks except for
//! the single bounded measurement performed by the range sensor.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod echo;
pub mod geometry;
pub mod head;
pub mod state;
pub mod telemetry;
pub mod traits;

pub use config::{ConfigError, HeadConfig};
pub use echo::{Echo, NO_ECHO_DISTANCE_MM};
pub use head::EchoAligner;
pub use state::{HeadEvent, Mode};
