//! Range sensors

mod hcsr04;

pub use hcsr04::{echo_us_to_mm, HcSr04, HcSr04Config, MicrosecondClock};
