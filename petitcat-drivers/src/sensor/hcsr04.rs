//! HC-SR04 ultrasonic ranger
//!
//! A 15 µs trigger pulse starts a burst; the sensor then raises its echo
//! pin for as long as the sound took to come back. The width is timed by
//! busy-polling against a microsecond clock, bounded by a timeout so a
//! missing echo never blocks for long.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use petitcat_core::traits::RangeSensor;
use petitcat_core::Echo;

/// Free-running microsecond counter for platform abstraction
pub trait MicrosecondClock {
    /// Current counter value (µs, wrapping)
    fn now_us(&mut self) -> u32;
}

/// Ranger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HcSr04Config {
    /// Longest wait for the echo pulse to start and end (µs)
    pub timeout_us: u32,
}

impl Default for HcSr04Config {
    fn default() -> Self {
        Self { timeout_us: 10_000 }
    }
}

/// Convert an echo pulse width to a distance
///
/// Sound travels about 0.3314 mm/µs and the pulse covers the round trip,
/// giving 0.1657 mm per µs of echo.
pub fn echo_us_to_mm(echo_us: u32) -> Echo {
    let mm = (echo_us as u64 * 1657 / 10_000).min(u16::MAX as u64);
    Echo::from_mm(mm as u16)
}

/// HC-SR04 ranger on two GPIO pins
pub struct HcSr04<TRIG, ECHO, D, C> {
    trig: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
    config: HcSr04Config,
}

impl<TRIG, ECHO, D, C> HcSr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MicrosecondClock,
{
    /// Create a new ranger
    pub fn new(trig: TRIG, echo: ECHO, delay: D, clock: C, config: HcSr04Config) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            config,
        }
    }

    /// Fire one burst and time the echo pulse (µs)
    ///
    /// Returns `None` on timeout or pin error.
    pub fn measure_echo_us(&mut self) -> Option<u32> {
        self.trig.set_low().ok()?;
        self.delay.delay_us(5);
        self.trig.set_high().ok()?;
        self.delay.delay_us(15);
        self.trig.set_low().ok()?;

        let timeout = self.config.timeout_us;
        let start = self.clock.now_us();

        let rise = loop {
            let now = self.clock.now_us();
            if self.echo.is_high().ok()? {
                break now;
            }
            if now.wrapping_sub(start) >= timeout {
                return None;
            }
        };

        let fall = loop {
            let now = self.clock.now_us();
            if self.echo.is_low().ok()? {
                break now;
            }
            if now.wrapping_sub(start) >= timeout {
                return None;
            }
        };

        Some(fall.wrapping_sub(rise))
    }

    /// Get the configuration
    pub fn config(&self) -> &HcSr04Config {
        &self.config
    }
}

impl<TRIG, ECHO, D, C> RangeSensor for HcSr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MicrosecondClock,
{
    fn measure(&mut self) -> Echo {
        match self.measure_echo_us() {
            Some(echo_us) => echo_us_to_mm(echo_us),
            None => Echo::NoEcho,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use heapless::Vec;

    // All mocks share one simulated microsecond timeline

    struct MockTrig {
        levels: Vec<bool, 8>,
    }

    impl ErrorType for MockTrig {
        type Error = Infallible;
    }

    impl OutputPin for MockTrig {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let _ = self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let _ = self.levels.push(true);
            Ok(())
        }
    }

    // Echo pin high during [rise, fall)
    struct MockEcho<'a> {
        now: &'a Cell<u32>,
        rise: u32,
        fall: u32,
        fail: bool,
    }

    impl ErrorType for MockEcho<'_> {
        type Error = ErrorKind;
    }

    impl InputPin for MockEcho<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            let now = self.now.get();
            Ok(now >= self.rise && now < self.fall)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay<'a> {
        now: &'a Cell<u32>,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.now.set(self.now.get() + ns / 1000);
        }
    }

    // Each read advances time by one microsecond
    struct MockClock<'a> {
        now: &'a Cell<u32>,
    }

    impl MicrosecondClock for MockClock<'_> {
        fn now_us(&mut self) -> u32 {
            let now = self.now.get() + 1;
            self.now.set(now);
            now
        }
    }

    fn ranger(
        now: &Cell<u32>,
        rise: u32,
        fall: u32,
    ) -> HcSr04<MockTrig, MockEcho<'_>, MockDelay<'_>, MockClock<'_>> {
        HcSr04::new(
            MockTrig { levels: Vec::new() },
            MockEcho {
                now,
                rise,
                fall,
                fail: false,
            },
            MockDelay { now },
            MockClock { now },
            HcSr04Config::default(),
        )
    }

    #[test]
    fn test_echo_conversion() {
        assert_eq!(echo_us_to_mm(1000), Echo::Distance(165));
        assert_eq!(echo_us_to_mm(10_000), Echo::Distance(1657));
        assert_eq!(echo_us_to_mm(0), Echo::NoEcho);
        assert_eq!(echo_us_to_mm(5), Echo::NoEcho);
    }

    #[test]
    fn test_measure_distance() {
        let now = Cell::new(0);
        let mut sensor = ranger(&now, 100, 1100);

        assert_eq!(sensor.measure_echo_us(), Some(1000));

        let now = Cell::new(0);
        let mut sensor = ranger(&now, 100, 1100);
        assert_eq!(sensor.measure(), Echo::Distance(165));
    }

    #[test]
    fn test_trigger_sequence() {
        let now = Cell::new(0);
        let mut sensor = ranger(&now, 100, 400);
        sensor.measure();

        assert_eq!(sensor.trig.levels.as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_no_pulse_times_out() {
        let now = Cell::new(0);
        let mut sensor = ranger(&now, u32::MAX, u32::MAX);

        assert_eq!(sensor.measure(), Echo::NoEcho);
        assert!(now.get() >= 10_000);
        assert!(now.get() < 10_100);
    }

    #[test]
    fn test_endless_pulse_times_out() {
        let now = Cell::new(0);
        let mut sensor = ranger(&now, 100, 50_000);

        assert_eq!(sensor.measure(), Echo::NoEcho);
    }

    #[test]
    fn test_pin_error_is_no_echo() {
        let now = Cell::new(0);
        let mut sensor = ranger(&now, 100, 1100);
        sensor.echo.fail = true;

        assert_eq!(sensor.measure(), Echo::NoEcho);
    }
}
