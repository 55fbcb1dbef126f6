//! Hardware driver implementations
//!
//! This crate provides the concrete bus master and the drivers built on
//! it:
//!
//! - Bit-banged two-wire bus master over two open-drain GPIOs
//! - DS1307 real-time clock
//! - LM75 temperature sensor

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod i2c;
pub mod rtc;
pub mod sensor;
