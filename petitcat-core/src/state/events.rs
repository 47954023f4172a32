//! Events produced by the aligner

use crate::echo::Echo;

/// What one aligner step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeadEvent {
    /// Alignment started; `distance` is the sample that triggered it
    AlignmentTriggered { distance: Echo },
    /// Head stepped on in the current sweep direction
    Saccade { angle: i16 },
    /// Distance stopped improving; head stepped back the other way
    Reversal { angle: i16 },
    /// Alignment complete; the head faces the nearest echo found
    Aligned { angle: i16, distance: Echo },
}

impl HeadEvent {
    /// Check if this event moved the head
    pub fn is_movement(&self) -> bool {
        matches!(self, HeadEvent::Saccade { .. } | HeadEvent::Reversal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_events() {
        assert!(HeadEvent::Saccade { angle: 10 }.is_movement());
        assert!(HeadEvent::Reversal { angle: 0 }.is_movement());
        assert!(!HeadEvent::AlignmentTriggered {
            distance: Echo::Distance(400)
        }
        .is_movement());
    }
}
