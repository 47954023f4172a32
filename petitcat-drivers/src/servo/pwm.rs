//! Hobby servo on a PWM channel
//!
//! The head is mounted on a standard 180° servo. A head angle of -90..=90
//! degrees is shifted to a servo position of 0..=180 degrees, then mapped
//! linearly onto the pulse width range of the servo.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = PwmServo::new(pwm_channel, ServoConfig::default());
//! servo.try_move_to(-45)?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use petitcat_core::config::{HEAD_ANGLE_MAX, HEAD_ANGLE_MIN};
use petitcat_core::traits::HeadActuator;

/// Servo timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at servo position 0 (µs)
    pub min_pulse_us: u16,
    /// Pulse width at servo position 180 (µs)
    pub max_pulse_us: u16,
    /// PWM frame period (µs)
    pub period_us: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: 544,
            max_pulse_us: 2400,
            period_us: 20_000,
        }
    }
}

impl ServoConfig {
    /// Pulse width commanding a head angle (µs)
    ///
    /// Angles outside the mount range are clamped.
    pub fn pulse_us(&self, angle_deg: i16) -> u16 {
        let position = (angle_deg.clamp(HEAD_ANGLE_MIN, HEAD_ANGLE_MAX) - HEAD_ANGLE_MIN) as u32;
        let range = (HEAD_ANGLE_MAX - HEAD_ANGLE_MIN) as u32;
        let min = self.min_pulse_us as u32;
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us) as u32;

        (min + position * span / range) as u16
    }
}

/// Servo errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError<E> {
    /// The PWM channel rejected the duty cycle
    Pwm(E),
}

/// Hobby servo driven by one PWM channel
pub struct PwmServo<P> {
    pwm: P,
    config: ServoConfig,
    /// Last angle successfully commanded
    angle: i16,
    /// PWM writes that failed through the fire-and-forget path
    errors: u16,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Create a new servo driver
    ///
    /// Nothing is written until the first move.
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            angle: 0,
            errors: 0,
        }
    }

    /// Duty cycle commanding a head angle
    pub fn duty_for(&self, angle_deg: i16) -> u16 {
        let pulse = self.config.pulse_us(angle_deg) as u32;
        let max_duty = self.pwm.max_duty_cycle() as u32;
        let period = self.config.period_us.max(1);

        (pulse * max_duty / period).min(max_duty) as u16
    }

    /// Move to a head angle, reporting PWM failures
    pub fn try_move_to(&mut self, angle_deg: i16) -> Result<(), ServoError<P::Error>> {
        let duty = self.duty_for(angle_deg);
        self.pwm.set_duty_cycle(duty).map_err(ServoError::Pwm)?;
        self.angle = angle_deg.clamp(HEAD_ANGLE_MIN, HEAD_ANGLE_MAX);
        Ok(())
    }

    /// Get the last commanded angle (degrees)
    pub fn angle(&self) -> i16 {
        self.angle
    }

    /// Number of failed PWM writes
    pub fn error_count(&self) -> u16 {
        self.errors
    }

    /// Get the configuration
    pub fn config(&self) -> &ServoConfig {
        &self.config
    }
}

impl<P: SetDutyCycle> HeadActuator for PwmServo<P> {
    fn move_to(&mut self, angle_deg: i16) {
        if self.try_move_to(angle_deg).is_err() {
            self.errors = self.errors.saturating_add(1);
        }
    }
}
