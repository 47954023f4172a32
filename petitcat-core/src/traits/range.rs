//! Range sensor trait

use crate::echo::Echo;

/// Trait for distance sensors
///
/// Implementations perform one synchronous, bounded-duration measurement
/// per call (about 10 ms for an HC-SR04). A timeout or an implausible zero
/// reading is reported as [`Echo::NoEcho`], never as an error.
pub trait RangeSensor {
    /// Take one distance measurement
    fn measure(&mut self) -> Echo;
}
