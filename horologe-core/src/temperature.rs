//! Fixed-point temperature
//!
//! Stored as a signed count of 1/8 °C, which is the native step of the
//! board's sensor. Conversions to float and to the tenths-of-a-degree
//! format used by displays are provided.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Temperature with 0.125 °C resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Temperature {
    eighths: i16,
}

impl Temperature {
    /// Resolution of one step in °C
    pub const STEP_C: f32 = 0.125;

    /// Build from a count of 1/8 °C steps
    pub const fn from_eighths(eighths: i16) -> Self {
        Self { eighths }
    }

    /// Count of 1/8 °C steps
    pub const fn eighths(&self) -> i16 {
        self.eighths
    }

    /// Degrees Celsius
    pub fn celsius(&self) -> f32 {
        self.eighths as f32 * Self::STEP_C
    }

    /// Tenths of a degree Celsius, rounded half away from zero
    ///
    /// For example, 26.5 °C is returned as 265.
    pub const fn celsius_x10(&self) -> i16 {
        // 10/8 = 5/4; add half the divisor before truncating
        let scaled = self.eighths as i32 * 5;
        let rounded = if scaled >= 0 {
            (scaled + 2) / 4
        } else {
            (scaled - 2) / 4
        };
        rounded as i16
    }
}
