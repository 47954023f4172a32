//! Three-sample echo history

use crate::echo::Echo;

/// Current, previous and penultimate echoes
///
/// Every new sample shifts the older ones down by one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoHistory {
    /// `[current, previous, penultimate]`
    samples: [Echo; 3],
}

impl EchoHistory {
    /// Create a history with no echoes
    pub const fn new() -> Self {
        Self {
            samples: [Echo::NoEcho; 3],
        }
    }

    /// Shift the history and store a new current sample
    pub fn push(&mut self, echo: Echo) {
        self.samples = [echo, self.samples[0], self.samples[1]];
    }

    /// Most recent sample
    pub fn current(&self) -> Echo {
        self.samples[0]
    }

    /// Sample before the current one
    pub fn previous(&self) -> Echo {
        self.samples[1]
    }

    /// Sample before the previous one
    pub fn penultimate(&self) -> Echo {
        self.samples[2]
    }

    /// Forget the current and previous samples
    ///
    /// The penultimate slot is kept; it is overwritten by the next push.
    pub fn forget_recent(&mut self) {
        self.samples[0] = Echo::NoEcho;
        self.samples[1] = Echo::NoEcho;
    }

    /// Check if none of the three samples saw an object
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|echo| !echo.is_echo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_shifts() {
        let mut history = EchoHistory::new();
        history.push(Echo::Distance(500));
        history.push(Echo::Distance(400));
        history.push(Echo::Distance(300));

        assert_eq!(history.current(), Echo::Distance(300));
        assert_eq!(history.previous(), Echo::Distance(400));
        assert_eq!(history.penultimate(), Echo::Distance(500));

        history.push(Echo::NoEcho);
        assert_eq!(history.current(), Echo::NoEcho);
        assert_eq!(history.penultimate(), Echo::Distance(400));
    }

    #[test]
    fn test_forget_recent_keeps_penultimate() {
        let mut history = EchoHistory::new();
        history.push(Echo::Distance(500));
        history.push(Echo::Distance(400));
        history.push(Echo::Distance(300));
        history.forget_recent();

        assert_eq!(history.current(), Echo::NoEcho);
        assert_eq!(history.previous(), Echo::NoEcho);
        assert_eq!(history.penultimate(), Echo::Distance(500));
    }

    #[test]
    fn test_silent() {
        let mut history = EchoHistory::new();
        assert!(history.is_silent());

        history.push(Echo::Distance(800));
        assert!(!history.is_silent());

        history.push(Echo::NoEcho);
        history.push(Echo::NoEcho);
        assert!(!history.is_silent());

        history.push(Echo::NoEcho);
        assert!(history.is_silent());
    }
}
