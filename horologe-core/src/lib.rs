//! Board-agnostic core types for the Horologe firmware
//!
//! This crate contains everything the application layer sees of the
//! sensors without depending on how they are wired:
//!
//! - Time-of-day and temperature value types
//! - Device traits for the real-time clock and temperature sensor
//! - Device-level error types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod temperature;
pub mod time;
pub mod traits;

pub use temperature::Temperature;
pub use time::TimeValue;
pub use traits::{RealTimeClock, RtcError, TemperatureSensor};
