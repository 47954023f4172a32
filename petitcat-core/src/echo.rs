//! Ultrasonic echo measurements
//!
//! An [`Echo`] is either a distance in millimeters or the absence of any
//! reflecting object within the sensor range. Sensor timeouts are folded
//! into [`Echo::NoEcho`]; they are never reported as errors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric stand-in for [`Echo::NoEcho`] in distance arithmetic (mm)
///
/// Farther than anything the sensor can report within its timeout.
pub const NO_ECHO_DISTANCE_MM: u16 = 10_000;

/// One range measurement
///
/// Ordering treats `NoEcho` as farther than every distance, so "no object"
/// never counts as an improvement over a real echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Echo {
    /// Distance to the reflecting object (mm)
    Distance(u16),
    /// No object detected within range
    #[default]
    NoEcho,
}

impl Echo {
    /// Build an echo from a raw millimeter reading
    ///
    /// A zero reading means the sensor saw nothing; readings at or beyond
    /// [`NO_ECHO_DISTANCE_MM`] are out of range.
    pub const fn from_mm(mm: u16) -> Self {
        if mm == 0 || mm >= NO_ECHO_DISTANCE_MM {
            Echo::NoEcho
        } else {
            Echo::Distance(mm)
        }
    }

    /// Distance in millimeters, with `NoEcho` mapped to [`NO_ECHO_DISTANCE_MM`]
    pub const fn as_mm(self) -> u16 {
        match self {
            Echo::Distance(mm) => mm,
            Echo::NoEcho => NO_ECHO_DISTANCE_MM,
        }
    }

    /// Distance in millimeters, if an object was detected
    pub const fn distance(self) -> Option<u16> {
        match self {
            Echo::Distance(mm) => Some(mm),
            Echo::NoEcho => None,
        }
    }

    /// Check if an object was detected
    pub const fn is_echo(self) -> bool {
        matches!(self, Echo::Distance(_))
    }

    /// Absolute distance difference (mm)
    pub fn abs_diff(self, other: Echo) -> u16 {
        self.as_mm().abs_diff(other.as_mm())
    }
}
