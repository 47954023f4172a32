//! Head geometry
//!
//! Conversions between head angles and points in the robot frame. The
//! robot frame has x pointing forward and y pointing left, in millimeters,
//! with the origin at the robot center. The head pivot sits `head_x` mm
//! forward of the center.

use core::f64::consts::PI;

use micromath::F32Ext;

use crate::config::{HEAD_ANGLE_MAX, HEAD_ANGLE_MIN};
use crate::echo::Echo;

/// Angle the head must face to point at `(x, y)` (degrees)
///
/// Points behind the head pivot cannot be faced; the head turns fully to
/// the side the point is on, or straight ahead if it lies on the axis.
/// Fractions of a degree are truncated toward zero.
pub fn heading_toward(x: i32, y: i32, head_x: i32) -> i16 {
    let dx = i64::from(x) - i64::from(head_x);
    if dx < 0 {
        return match y.signum() {
            1 => HEAD_ANGLE_MAX,
            -1 => HEAD_ANGLE_MIN,
            _ => 0,
        };
    }

    // Double precision keeps exact multiples from landing just below
    let degrees = libm::atan2(f64::from(y), dx as f64) * 180.0 / PI;
    degrees as i16
}

/// Position of an echo in the robot frame (mm)
///
/// Returns `None` when nothing was detected.
pub fn echo_point(head_angle: i16, echo: Echo, head_x: i32) -> Option<(i32, i32)> {
    let distance = echo.distance()? as f32;
    let radians = (head_angle as f32).to_radians();

    let x = head_x.saturating_add((radians.cos() * distance).round() as i32);
    let y = (radians.sin() * distance).round() as i32;
    Some((x, y))
}
