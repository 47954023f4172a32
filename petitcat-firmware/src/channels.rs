//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use petitcat_core::telemetry::Outcome;

/// Outcome of the last completed alignment (updated by the head task)
pub static OUTCOME: Signal<CriticalSectionRawMutex, Outcome> = Signal::new();
