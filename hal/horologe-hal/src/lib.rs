//! Horologe Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (STM32F4, host simulation, etc.). The bit-banged
//! bus master in `horologe-drivers` is written against these traits only,
//! so the same protocol engine runs on the board and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Device drivers (DS1307, LM75)          │
//! └─────────────────────────────────────────┘
//!                     │  i2c::I2cBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Bit-bang bus master (horologe-drivers) │
//! └─────────────────────────────────────────┘
//!                     │  gpio::OpenDrainPin + time::TickSource
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ horologe-hal- │       │  host sim     │
//! │    stm32f4    │       │  (tests)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OpenDrainPin`] - Open-drain bus wire
//! - [`time::TickSource`] - Monotonic tick counter with busy-wait delays
//! - [`i2c::I2cBus`] - Register-style bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::OpenDrainPin;
pub use i2c::{BusError, BusTiming, I2cBus};
pub use time::TickSource;
