//! Head configuration type definitions
//!
//! Timing and geometry of the ultrasonic head. The firmware builds this
//! from `machine.toml` at compile time; host code can use the defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Leftmost angle reachable by the head mount (degrees)
pub const HEAD_ANGLE_MIN: i16 = -90;

/// Rightmost angle reachable by the head mount (degrees)
pub const HEAD_ANGLE_MAX: i16 = 90;

/// Default angular step of one saccade (degrees)
pub const DEFAULT_SACCADE_SPAN_DEG: i16 = 10;

/// Default delay between two saccades while aligning (ms)
pub const DEFAULT_SACCADE_PERIOD_MS: u32 = 150;

/// Default delay between two samples while monitoring (ms)
pub const DEFAULT_MONITOR_PERIOD_MS: u32 = 500;

/// Default distance change that re-triggers alignment (mm)
pub const DEFAULT_MONITOR_VARIATION_MM: u16 = 50;

/// Default forward offset of the head from the robot center (mm)
pub const DEFAULT_HEAD_X_MM: i32 = 80;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Saccade span must be at least one degree
    ZeroSaccadeSpan,
    /// Saccade span larger than half the sweep range
    SaccadeSpanTooLarge,
    /// Saccade period must be non-zero
    ZeroSaccadePeriod,
    /// Monitor period must be non-zero
    ZeroMonitorPeriod,
    /// Monitor variation must be non-zero
    ZeroMonitorVariation,
}

/// Ultrasonic head configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeadConfig {
    /// Magnitude of one saccade (degrees, 1-90)
    pub saccade_span_deg: i16,
    /// Time between saccades during alignment (ms)
    pub saccade_period_ms: u32,
    /// Time between samples during monitoring (ms)
    pub monitor_period_ms: u32,
    /// Monitor-variation threshold (mm)
    ///
    /// Twice this value flags a discontinuous reading during alignment.
    pub monitor_variation_mm: u16,
    /// Forward offset of the head pivot from the robot center (mm)
    pub head_x_mm: i32,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            saccade_span_deg: DEFAULT_SACCADE_SPAN_DEG,
            saccade_period_ms: DEFAULT_SACCADE_PERIOD_MS,
            monitor_period_ms: DEFAULT_MONITOR_PERIOD_MS,
            monitor_variation_mm: DEFAULT_MONITOR_VARIATION_MM,
            head_x_mm: DEFAULT_HEAD_X_MM,
        }
    }
}

impl HeadConfig {
    /// Check that the configuration can drive the aligner
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.saccade_span_deg <= 0 {
            return Err(ConfigError::ZeroSaccadeSpan);
        }
        if self.saccade_span_deg > HEAD_ANGLE_MAX {
            return Err(ConfigError::SaccadeSpanTooLarge);
        }
        if self.saccade_period_ms == 0 {
            return Err(ConfigError::ZeroSaccadePeriod);
        }
        if self.monitor_period_ms == 0 {
            return Err(ConfigError::ZeroMonitorPeriod);
        }
        if self.monitor_variation_mm == 0 {
            return Err(ConfigError::ZeroMonitorVariation);
        }
        Ok(())
    }

    /// Threshold above which a sample jump counts as discontinuous (mm)
    pub fn discontinuity_threshold_mm(&self) -> u16 {
        self.monitor_variation_mm.saturating_mul(2)
    }

    /// Upper bound on saccades needed to sweep the whole range once
    pub fn max_sweep_steps(&self) -> u16 {
        let range = (HEAD_ANGLE_MAX - HEAD_ANGLE_MIN) as u16;
        let span = self.saccade_span_deg.max(1) as u16;
        range.div_ceil(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(HeadConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_invalid_fields() {
        let base = HeadConfig::default();

        let cfg = HeadConfig {
            saccade_span_deg: 0,
            ..base
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSaccadeSpan));

        let cfg = HeadConfig {
            saccade_span_deg: -10,
            ..base
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSaccadeSpan));

        let cfg = HeadConfig {
            saccade_span_deg: 91,
            ..base
        };
        assert_eq!(cfg.validate(), Err(ConfigError::SaccadeSpanTooLarge));

        let cfg = HeadConfig {
            saccade_period_ms: 0,
            ..base
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSaccadePeriod));

        let cfg = HeadConfig {
            monitor_period_ms: 0,
            ..base
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMonitorPeriod));

        let cfg = HeadConfig {
            monitor_variation_mm: 0,
            ..base
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMonitorVariation));
    }

    #[test]
    fn test_max_sweep_steps() {
        assert_eq!(HeadConfig::default().max_sweep_steps(), 18);

        let cfg = HeadConfig {
            saccade_span_deg: 7,
            ..HeadConfig::default()
        };
        assert_eq!(cfg.max_sweep_steps(), 26);
    }
}
