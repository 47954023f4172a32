//! Servo drivers

mod pwm;

pub use pwm::{PwmServo, ServoConfig, ServoError};
