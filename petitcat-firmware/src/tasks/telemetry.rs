//! Telemetry task
//!
//! Waits for alignment outcomes and logs them over RTT.

use defmt::*;

use crate::channels::OUTCOME;

/// Telemetry task - logs each published outcome
#[embassy_executor::task]
pub async fn telemetry_task() {
    info!("Telemetry task started");

    loop {
        let outcome = OUTCOME.wait().await;

        info!("Outcome ({} fields)", outcome.len());
        for (field, value) in outcome.iter() {
            info!("  {} = {}", field, value);
        }

        if outcome.dropped() > 0 {
            warn!("Outcome dropped {} fields", outcome.dropped());
        }
    }
}
