//! Bit-banged two-wire bus master
//!
//! Drives the clock and data lines of a two-wire serial bus from two
//! open-drain GPIOs. Layered bottom-up:
//!
//! - [`line`]: the two wires and the `embedded-hal` pin adapter
//! - `engine`: START/STOP and byte clocking with clock-stretch timeout
//! - `recovery`: clocking out a slave stuck holding the data line
//! - `transaction`: register reads and writes, probing and scanning
//! - `eh`: `embedded_hal::i2c::I2c` on top of the engine
//!
//! # Example
//!
//! ```ignore
//! let mut bus = SoftI2c::new(scl, sda, ticks);
//! bus.init();
//! let mut rtc = Ds1307::new(&mut bus);
//! let now = rtc.read_time()?;
//! ```

mod eh;
mod engine;
pub mod line;
mod recovery;
mod transaction;

#[cfg(test)]
pub(crate) mod sim;

pub use engine::{BusState, SoftI2c};
pub use line::{BusLine, EhOpenDrain};
