//! Firmware configuration
//!
//! Constants generated by the build script from `machine.toml`. The values
//! are range-checked at build time, so editing the file and rebuilding is
//! the only way to change them.

use petitcat_core::HeadConfig;
use petitcat_drivers::sensor::HcSr04Config;
use petitcat_drivers::servo::ServoConfig;

include!(concat!(env!("OUT_DIR"), "/head_config.rs"));
