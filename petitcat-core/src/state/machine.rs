//! Head mode definition
//!
//! The mode decides what a sample means: during alignment it steers the
//! next saccade, during monitoring it is compared to the aligned distance.

use super::events::HeadEvent;
use crate::config::HeadConfig;

/// Head modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Sweeping toward decreasing distance
    Aligning,
    /// Watching the aligned echo for movement
    #[default]
    Monitoring,
}

impl Mode {
    /// Check if the head is searching
    pub fn is_aligning(&self) -> bool {
        matches!(self, Mode::Aligning)
    }

    /// Delay before the next sample in this mode (ms)
    pub fn period_ms(&self, config: &HeadConfig) -> u32 {
        match self {
            Mode::Aligning => config.saccade_period_ms,
            Mode::Monitoring => config.monitor_period_ms,
        }
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: HeadEvent) -> Self {
        use HeadEvent::*;
        use Mode::*;

        match (self, event) {
            // A new episode may also restart a running one
            (_, AlignmentTriggered { .. }) => Aligning,
            (Aligning, Aligned { .. }) => Monitoring,

            // Saccades and reversals keep the current mode
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::echo::Echo;

    const TRIGGER: HeadEvent = HeadEvent::AlignmentTriggered {
        distance: Echo::Distance(400),
    };
    const ALIGNED: HeadEvent = HeadEvent::Aligned {
        angle: 20,
        distance: Echo::Distance(350),
    };

    #[test]
    fn test_monitoring_to_aligning() {
        assert_eq!(Mode::Monitoring.transition(TRIGGER), Mode::Aligning);
    }

    #[test]
    fn test_aligning_to_monitoring() {
        assert_eq!(Mode::Aligning.transition(ALIGNED), Mode::Monitoring);
    }

    #[test]
    fn test_restart_alignment() {
        assert_eq!(Mode::Aligning.transition(TRIGGER), Mode::Aligning);
    }

    #[test]
    fn test_movement_keeps_mode() {
        let moves = [
            HeadEvent::Saccade { angle: 10 },
            HeadEvent::Reversal { angle: 0 },
        ];

        for event in moves {
            assert_eq!(Mode::Aligning.transition(event), Mode::Aligning);
            assert_eq!(Mode::Monitoring.transition(event), Mode::Monitoring);
        }
    }

    #[test]
    fn test_aligned_ignored_while_monitoring() {
        assert_eq!(Mode::Monitoring.transition(ALIGNED), Mode::Monitoring);
    }

    #[test]
    fn test_period() {
        let config = HeadConfig::default();
        assert_eq!(Mode::Aligning.period_ms(&config), config.saccade_period_ms);
        assert_eq!(Mode::Monitoring.period_ms(&config), config.monitor_period_ms);
    }
}
