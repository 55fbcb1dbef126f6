//! Time of day

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wall-clock time in 24-hour format
///
/// The fields are public so displays can read them directly; values built
/// by hand should be checked with [`TimeValue::is_valid`] or constructed
/// through [`TimeValue::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeValue {
    /// Hours (0-23)
    pub hours: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
}

impl TimeValue {
    /// Midnight
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build a time of day, rejecting out-of-range fields
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        let t = Self {
            hours,
            minutes,
            seconds,
        };
        if t.is_valid() {
            Some(t)
        } else {
            None
        }
    }

    /// Check all fields are in range
    pub const fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }

    /// Seconds since midnight
    pub const fn seconds_of_day(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
