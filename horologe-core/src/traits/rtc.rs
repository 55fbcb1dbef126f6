//! Real-time clock trait

use core::fmt;

use crate::time::TimeValue;

/// Errors that can occur talking to a real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError<E> {
    /// The bus transfer failed
    Bus(E),
    /// The time is out of range (rejected on write, or corrupt on read)
    InvalidTime,
}

impl<E: fmt::Display> fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::Bus(e) => write!(f, "bus error: {}", e),
            RtcError::InvalidTime => f.write_str("invalid time"),
        }
    }
}

/// Trait for battery-backed real-time clocks
pub trait RealTimeClock {
    /// Bus error type
    type Error;

    /// Read the current time of day
    fn read_time(&mut self) -> Result<TimeValue, RtcError<Self::Error>>;

    /// Set the time of day
    ///
    /// Setting the time also starts the oscillator.
    fn write_time(&mut self, time: &TimeValue) -> Result<(), RtcError<Self::Error>>;

    /// Start the oscillator if it is stopped
    ///
    /// Best effort: bus errors are swallowed so this can run at start-up
    /// before anything else is known about the bus.
    fn start_oscillator_if_halted(&mut self);
}
