//! Outcome telemetry
//!
//! Named numeric fields describing what the head did, collected into a
//! fixed-capacity [`Outcome`] record before being handed to the transport.

use heapless::LinearMap;

use crate::traits::TelemetrySink;

/// Head angle at the time of the report (degrees)
pub const FIELD_HEAD_ANGLE: &str = "head_angle";

/// Distance found by the last completed alignment (mm)
pub const FIELD_ECHO_DISTANCE: &str = "echo_distance";

/// Set to 1 when the last alignment sample was discontinuous
pub const FIELD_DISCONTINUOUS: &str = "discontinuous";

/// Maximum number of fields in one outcome
pub const OUTCOME_CAPACITY: usize = 8;

/// Outcome record errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutcomeError {
    /// No room left for a new field
    Full,
}

/// Fixed-capacity outcome record
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    fields: LinearMap<&'static str, i32, OUTCOME_CAPACITY>,
    /// Fields rejected because the record was full
    dropped: u8,
}

impl Outcome {
    /// Create an empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field, replacing any previous value
    pub fn try_record(&mut self, field: &'static str, value: i32) -> Result<(), OutcomeError> {
        self.fields
            .insert(field, value)
            .map(|_| ())
            .map_err(|_| OutcomeError::Full)
    }

    /// Get the value of a field
    pub fn get(&self, field: &str) -> Option<i32> {
        self.fields
            .iter()
            .find(|&(name, _)| *name == field)
            .map(|(_, value)| *value)
    }

    /// Iterate over recorded fields
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, *value))
    }

    /// Number of recorded fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field has been recorded
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields dropped since the last clear
    pub fn dropped(&self) -> u8 {
        self.dropped
    }

    /// Remove all fields
    pub fn clear(&mut self) {
        self.fields.clear();
        self.dropped = 0;
    }
}

impl TelemetrySink for Outcome {
    fn record(&mut self, field: &'static str, value: i32) {
        if self.try_record(field, value).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; OUTCOME_CAPACITY] = ["a", "b", "c", "d", "e", "f", "g", "h"];

    #[test]
    fn test_record_and_get() {
        let mut outcome = Outcome::new();
        assert!(outcome.is_empty());

        outcome.record(FIELD_HEAD_ANGLE, -20);
        outcome.record(FIELD_ECHO_DISTANCE, 350);

        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.get(FIELD_HEAD_ANGLE), Some(-20));
        assert_eq!(outcome.get(FIELD_ECHO_DISTANCE), Some(350));
        assert_eq!(outcome.get("floor"), None);
    }

    #[test]
    fn test_record_overwrites() {
        let mut outcome = Outcome::new();
        outcome.record(FIELD_HEAD_ANGLE, 10);
        outcome.record(FIELD_HEAD_ANGLE, 30);

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.get(FIELD_HEAD_ANGLE), Some(30));
    }

    #[test]
    fn test_overflow_is_counted() {
        let mut outcome = Outcome::new();
        for (i, name) in NAMES.into_iter().enumerate() {
            outcome.record(name, i as i32);
        }
        assert_eq!(outcome.dropped(), 0);

        assert_eq!(
            outcome.try_record(FIELD_HEAD_ANGLE, 0),
            Err(OutcomeError::Full)
        );
        outcome.record(FIELD_HEAD_ANGLE, 0);
        assert_eq!(outcome.dropped(), 1);

        // Existing fields can still be updated
        outcome.record("a", 99);
        assert_eq!(outcome.get("a"), Some(99));
        assert_eq!(outcome.dropped(), 1);

        outcome.clear();
        assert!(outcome.is_empty());
        assert_eq!(outcome.dropped(), 0);
    }
}
