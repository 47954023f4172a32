//! petitcat - Ultrasonic Head Firmware
//!
//! Main firmware binary for the RP2040 board carrying the petitcat head:
//! a hobby servo turning an HC-SR04 ranger. The head sweeps toward the
//! nearest echo, then keeps watching it and realigns when it moves.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use petitcat_core::EchoAligner;
use petitcat_drivers::sensor::HcSr04;
use petitcat_drivers::servo::PwmServo;

use crate::board::{ServoPwm, UptimeClock};
use crate::config::{HEAD_CONFIG, POLL_INTERVAL_MS, RANGER_CONFIG, SERVO_CONFIG};

mod board;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("petitcat firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    info!(
        "Head config: span={}°, saccade={}ms, monitor={}ms, variation={}mm",
        HEAD_CONFIG.saccade_span_deg,
        HEAD_CONFIG.saccade_period_ms,
        HEAD_CONFIG.monitor_period_ms,
        HEAD_CONFIG.monitor_variation_mm
    );

    // Head servo on GPIO4 (PWM slice 2, channel A)
    let pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, PwmConfig::default());
    let servo = PwmServo::new(ServoPwm::new(pwm, SERVO_CONFIG.period_us), SERVO_CONFIG);

    // HC-SR04 trigger on GPIO2, echo on GPIO3
    let trig = Output::new(p.PIN_2, Level::Low);
    let echo = Input::new(p.PIN_3, Pull::Down);
    let ranger = HcSr04::new(trig, echo, Delay, UptimeClock, RANGER_CONFIG);

    let aligner = match EchoAligner::new(servo, ranger, HEAD_CONFIG) {
        Ok(aligner) => aligner,
        Err(e) => {
            error!("Invalid head config: {}", e);
            return;
        }
    };

    spawner.spawn(tasks::telemetry_task()).unwrap();
    spawner
        .spawn(tasks::head_task(aligner, POLL_INTERVAL_MS))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
