//! Head actuator trait

/// Trait for the servo that turns the head
///
/// Angles are absolute, in degrees, with 0 straight ahead and positive
/// angles to the left. Callers clamp to the mount limits before writing.
pub trait HeadActuator {
    /// Command the head to an absolute angle in [-90, 90]
    ///
    /// Fire-and-forget: there is no position feedback.
    fn move_to(&mut self, angle_deg: i16);
}
