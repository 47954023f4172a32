//! Head alignment task
//!
//! Owns the aligner and polls it at a fixed interval. The aligner gates its
//! own saccade and monitor periods, so the poll interval only bounds how
//! late a step can run.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Duration, Instant, Ticker};

use petitcat_core::geometry::echo_point;
use petitcat_core::telemetry::Outcome;
use petitcat_core::{EchoAligner, HeadEvent};
use petitcat_drivers::sensor::HcSr04;
use petitcat_drivers::servo::PwmServo;

use crate::board::{ServoPwm, UptimeClock};
use crate::channels::OUTCOME;

/// Aligner wired to the board's servo and ranger
pub type HeadAligner = EchoAligner<
    PwmServo<ServoPwm>,
    HcSr04<Output<'static>, Input<'static>, Delay, UptimeClock>,
>;

/// Head task - runs the alignment state machine
#[embassy_executor::task]
pub async fn head_task(mut aligner: HeadAligner, poll_interval_ms: u32) {
    info!("Head task started");

    aligner.init();

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let start = Instant::now();
    let mut servo_errors = 0;

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis();
        let Some(event) = aligner.tick(now_ms) else {
            continue;
        };

        match event {
            HeadEvent::AlignmentTriggered { distance } => {
                info!(
                    "Alignment triggered at {}° (echo {})",
                    aligner.head_angle(),
                    distance
                );
            }
            HeadEvent::Saccade { angle } => {
                trace!("Saccade to {}° (echo {})", angle, aligner.current_distance());
            }
            HeadEvent::Reversal { angle } => {
                debug!("Reversal to {}° (echo {})", angle, aligner.current_distance());
            }
            HeadEvent::Aligned { angle, distance } => {
                info!(
                    "Aligned at {}° after {} saccades (echo {})",
                    angle,
                    aligner.step_count(),
                    distance
                );

                if let Some((x, y)) = echo_point(angle, distance, aligner.config().head_x_mm) {
                    debug!("Echo at x={}mm y={}mm", x, y);
                }

                let mut outcome = Outcome::new();
                aligner.report_outcome(&mut outcome);
                OUTCOME.signal(outcome);
            }
        }

        if event.is_movement() && aligner.is_discontinuous() {
            warn!("Discontinuous echo {}", aligner.current_distance());
        }

        let errors = aligner.actuator().error_count();
        if errors != servo_errors {
            warn!("Servo PWM write failed ({} total)", errors);
            servo_errors = errors;
        }
    }
}
