//! STM32F4-specific HAL for the Horologe firmware
//!
//! This crate provides STM32F4 implementations of the `horologe-hal`
//! traits used by the bit-banged bus master:
//!
//! - [`gpio::OpenDrainLine`] - bus wire on an open-drain GPIO (PB6/PB7 on
//!   the reference board)
//! - [`time::DwtTicks`] - microsecond timing from the DWT cycle counter
//!
//! # Features
//!
//! - `stm32f401re`, `stm32f407vg`, `stm32f411ce` - Chip selection
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod gpio;
pub mod time;

pub use gpio::OpenDrainLine;
pub use time::DwtTicks;

// Re-export shared traits from horologe-hal for convenience
pub use horologe_hal::{OpenDrainPin, TickSource};
