//! Collaborator traits
//!
//! These traits define the interface between the head alignment logic
//! and the hardware (or host-side) implementations it drives.

pub mod actuator;
pub mod range;
pub mod telemetry;

pub use actuator::HeadActuator;
pub use range::RangeSensor;
pub use telemetry::TelemetrySink;
