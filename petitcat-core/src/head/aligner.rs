//! Echo alignment controller
//!
//! Greedy search for the direction of the nearest echo. Each saccade moves
//! the head one span and samples the distance:
//!
//! - closer than before: keep going the same way
//! - not closer: step back the other way; if the sample before was also
//!   farther, the previous position was a local minimum and alignment ends
//! - a sweep limit reached while still improving: the limit is the minimum
//!
//! Once aligned, the head only samples at the monitor period and starts a
//! new alignment when two consecutive samples differ from the aligned
//! distance by more than the monitor-variation threshold.
//!
//! # Usage
//!
//! ```ignore
//! let mut aligner = EchoAligner::new(servo, ranger, HeadConfig::default())?;
//! aligner.init();
//!
//! loop {
//!     if let Some(event) = aligner.tick(now_ms()) {
//!         // log event
//!     }
//! }
//! ```

use crate::config::{ConfigError, HeadConfig, HEAD_ANGLE_MAX, HEAD_ANGLE_MIN};
use crate::echo::Echo;
use crate::geometry;
use crate::state::{HeadEvent, Mode};
use crate::telemetry::{FIELD_DISCONTINUOUS, FIELD_ECHO_DISTANCE, FIELD_HEAD_ANGLE};
use crate::traits::{HeadActuator, RangeSensor, TelemetrySink};

use super::history::EchoHistory;

/// Ultrasonic head alignment controller
///
/// Owns the head actuator and the range sensor. All state changes happen
/// in [`tick`](Self::tick) (or an explicit
/// [`begin_alignment`](Self::begin_alignment)).
pub struct EchoAligner<A, S> {
    actuator: A,
    sensor: S,
    config: HeadConfig,
    /// Current head angle (degrees, always within the mount limits)
    head_angle: i16,
    /// Signed saccade; the sign is the sweep direction
    angle_span: i16,
    history: EchoHistory,
    /// Distance found by the last completed alignment
    min_echo: Echo,
    /// Saccades since the current alignment began
    step_count: u16,
    mode: Mode,
    /// No sampling or movement before this time (ms)
    next_deadline_ms: u64,
    /// Last alignment sample jumped away from both earlier samples
    discontinuous: bool,
}

impl<A: HeadActuator, S: RangeSensor> EchoAligner<A, S> {
    /// Create a new aligner
    ///
    /// The head is assumed straight ahead and the aligner starts in
    /// monitoring mode with nothing aligned yet, so the first object seen
    /// twice in a row triggers an alignment.
    pub fn new(actuator: A, sensor: S, config: HeadConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            actuator,
            sensor,
            config,
            head_angle: 0,
            angle_span: config.saccade_span_deg,
            history: EchoHistory::new(),
            min_echo: Echo::NoEcho,
            step_count: 0,
            mode: Mode::Monitoring,
            next_deadline_ms: 0,
            discontinuous: false,
        })
    }

    /// Turn the head straight ahead
    ///
    /// Call once at startup so the physical head matches the stored angle.
    pub fn init(&mut self) {
        self.turn_head(0);
    }

    /// Start a new alignment episode
    ///
    /// Earlier samples were taken elsewhere, so they are discarded. The
    /// sweep direction alternates between episodes, which makes it easier
    /// to follow a moving object.
    pub fn begin_alignment(&mut self, now_ms: u64) {
        self.start_alignment(now_ms);
    }

    /// Advance the aligner
    ///
    /// `now_ms` is a monotonic millisecond clock, such as time since boot.
    /// Does nothing before the next deadline. Otherwise takes one sample
    /// and runs the search or monitor step. Returns what the step did.
    pub fn tick(&mut self, now_ms: u64) -> Option<HeadEvent> {
        if now_ms < self.next_deadline_ms {
            return None;
        }

        self.history.push(self.sensor.measure());

        let event = if self.mode.is_aligning() {
            Some(self.search_step())
        } else {
            self.monitor_step(now_ms)
        };

        let period = self.mode.period_ms(&self.config);
        self.next_deadline_ms = now_ms.saturating_add(u64::from(period));
        event
    }

    /// Last sample taken
    pub fn current_distance(&self) -> Echo {
        self.history.current()
    }

    /// Contribute the head fields to an outcome
    ///
    /// `echo_distance` is only reported once an alignment has found an echo.
    pub fn report_outcome<T: TelemetrySink>(&self, sink: &mut T) {
        sink.record(FIELD_HEAD_ANGLE, i32::from(self.head_angle));

        if let Some(mm) = self.min_echo.distance() {
            sink.record(FIELD_ECHO_DISTANCE, i32::from(mm));
        }

        if self.discontinuous {
            sink.record(FIELD_DISCONTINUOUS, 1);
        }
    }

    /// Angle the head would need to face the point `(x, y)` (mm)
    pub fn heading_toward(&self, x: i32, y: i32) -> i16 {
        geometry::heading_toward(x, y, self.config.head_x_mm)
    }

    /// Get the current head angle (degrees)
    pub fn head_angle(&self) -> i16 {
        self.head_angle
    }

    /// Get the signed saccade span (degrees)
    pub fn angle_span(&self) -> i16 {
        self.angle_span
    }

    /// Get the current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the number of saccades in the current alignment
    pub fn step_count(&self) -> u16 {
        self.step_count
    }

    /// Get the distance found by the last completed alignment
    pub fn min_distance(&self) -> Echo {
        self.min_echo
    }

    /// Get the sample history
    pub fn history(&self) -> &EchoHistory {
        &self.history
    }

    /// Get the time of the next permitted action (ms)
    pub fn next_deadline(&self) -> u64 {
        self.next_deadline_ms
    }

    /// Check if the last alignment sample was discontinuous
    pub fn is_discontinuous(&self) -> bool {
        self.discontinuous
    }

    /// Get the configuration
    pub fn config(&self) -> &HeadConfig {
        &self.config
    }

    /// Get access to the head actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Get access to the range sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    fn start_alignment(&mut self, now_ms: u64) -> HeadEvent {
        let event = HeadEvent::AlignmentTriggered {
            distance: self.history.current(),
        };

        self.mode = self.mode.transition(event);
        self.history.forget_recent();
        self.angle_span = -self.angle_span;
        self.step_count = 0;
        self.next_deadline_ms = now_ms.saturating_add(u64::from(self.config.saccade_period_ms));

        event
    }

    fn search_step(&mut self) -> HeadEvent {
        self.step_count = self.step_count.saturating_add(1);

        let current = self.history.current();
        let previous = self.history.previous();
        let penultimate = self.history.penultimate();

        let jump = self.config.discontinuity_threshold_mm();
        self.discontinuous =
            current.abs_diff(previous) > jump && current.abs_diff(penultimate) > jump;

        if current < previous || self.history.is_silent() {
            // Closer, or still nothing in sight: keep sweeping
            if self.at_limit() {
                if self.step_count > 1 {
                    return self.finish_alignment(current);
                }

                // Started on the limit: sweep back toward the center
                let span = self.config.saccade_span_deg;
                self.angle_span = if self.head_angle >= HEAD_ANGLE_MAX {
                    -span
                } else {
                    span
                };
            }

            self.turn_head(self.head_angle + self.angle_span);
            HeadEvent::Saccade {
                angle: self.head_angle,
            }
        } else {
            // Farther or equal: go back toward the better position
            self.angle_span = -self.angle_span;
            self.turn_head(self.head_angle + self.angle_span);

            if penultimate >= previous && self.step_count >= 2 && previous.is_echo() {
                return self.finish_alignment(previous);
            }

            HeadEvent::Reversal {
                angle: self.head_angle,
            }
        }
    }

    fn monitor_step(&mut self, now_ms: u64) -> Option<HeadEvent> {
        let threshold = self.config.monitor_variation_mm;
        let moved = self.history.current().abs_diff(self.min_echo) > threshold
            && self.history.previous().abs_diff(self.min_echo) > threshold;

        if moved {
            Some(self.start_alignment(now_ms))
        } else {
            None
        }
    }

    fn finish_alignment(&mut self, distance: Echo) -> HeadEvent {
        self.min_echo = distance;

        let event = HeadEvent::Aligned {
            angle: self.head_angle,
            distance,
        };
        self.mode = self.mode.transition(event);

        event
    }

    fn at_limit(&self) -> bool {
        self.head_angle <= HEAD_ANGLE_MIN || self.head_angle >= HEAD_ANGLE_MAX
    }

    fn turn_head(&mut self, angle: i16) {
        self.head_angle = angle.clamp(HEAD_ANGLE_MIN, HEAD_ANGLE_MAX);
        self.actuator.move_to(self.head_angle);
    }
}
