//! Board wiring
//!
//! | Function          | GPIO | Peripheral    |
//! |-------------------|------|---------------|
//! | Head servo        | 4    | PWM slice 2 A |
//! | HC-SR04 trigger   | 2    | output        |
//! | HC-SR04 echo      | 3    | input (5V tolerant divider) |
//!
//! Also provides the small adapters the drivers need on top of embassy-rp.

use core::convert::Infallible;

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Instant;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use petitcat_drivers::sensor::MicrosecondClock;

/// Servo PWM channel counting in microseconds
///
/// The slice runs at 1 MHz so the duty cycle is the pulse width in µs and
/// `top + 1` is the frame period.
pub struct ServoPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl ServoPwm {
    /// Configure the slice for a frame of `period_us`
    pub fn new(mut pwm: Pwm<'static>, period_us: u32) -> Self {
        let mut config = PwmConfig::default();
        config.divider = ((clk_sys_freq() / 1_000_000) as u8).into();
        config.top = period_us.saturating_sub(1).min(u16::MAX as u32) as u16;
        config.compare_a = 0; // No pulse until the first move
        pwm.set_config(&config);

        Self { pwm, config }
    }
}

impl ErrorType for ServoPwm {
    type Error = Infallible;
}

impl SetDutyCycle for ServoPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.config.top.saturating_add(1)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.config.compare_a = duty;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

/// Microsecond clock backed by the embassy time driver
pub struct UptimeClock;

impl MicrosecondClock for UptimeClock {
    fn now_us(&mut self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
