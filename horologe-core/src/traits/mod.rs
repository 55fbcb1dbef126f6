//! Device traits
//!
//! These traits define the interface between the application layer and
//! the concrete sensor drivers.

pub mod rtc;
pub mod sensor;

pub use rtc::{RealTimeClock, RtcError};
pub use sensor::TemperatureSensor;
