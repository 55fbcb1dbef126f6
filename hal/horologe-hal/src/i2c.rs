//! Two-wire bus abstractions
//!
//! Provides the register-style bus master trait used by device drivers,
//! the bus error kinds, address helpers, and the bit timing profile.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of clock pulses the recovery procedure may issue
///
/// A slave interrupted mid-byte needs at most eight more clocks to finish
/// shifting plus one for its acknowledge slot.
pub const RECOVERY_PULSES: u8 = 9;

/// Lowest 7-bit address that is not reserved
pub const FIRST_ADDRESS: u8 = 0x08;

/// Highest 7-bit address that is not reserved
pub const LAST_ADDRESS: u8 = 0x77;

/// Errors reported by the bus master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// An address or data byte was not acknowledged (device absent or busy)
    NoAck,
    /// A slave held the clock low past the stretch timeout
    ClockStretchTimeout,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::NoAck => f.write_str("no acknowledge"),
            BusError::ClockStretchTimeout => f.write_str("clock stretch timeout"),
        }
    }
}

impl embedded_hal::i2c::Error for BusError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

        match self {
            BusError::NoAck => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            BusError::ClockStretchTimeout => ErrorKind::Other,
        }
    }
}

/// Register-style bus master
///
/// Every method leaves the bus idle (both lines released) when it returns,
/// whether it succeeded or not. Implementations never retry.
pub trait I2cBus {
    /// Error type for bus operations
    type Error;

    /// Check whether a device acknowledges its address
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    fn probe(&mut self, address: u8) -> bool;

    /// Read consecutive registers starting at `register`
    ///
    /// Reads `buf.len()` bytes; an empty buffer performs addressing only.
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `register` - First register to read
    /// * `buf` - Buffer to read into
    fn mem_read(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write consecutive registers starting at `register`
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `register` - First register to write
    /// * `data` - Bytes to write
    fn mem_write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Free a data line held low by a slave stuck mid-byte
    ///
    /// Bounded; does not report whether the slave let go.
    fn recover_bus(&mut self);
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn probe(&mut self, address: u8) -> bool {
        T::probe(self, address)
    }

    fn mem_read(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::mem_read(self, address, register, buf)
    }

    fn mem_write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::mem_write(self, address, register, data)
    }

    fn recover_bus(&mut self) {
        T::recover_bus(self)
    }
}

/// Address byte for a write transfer (R/W bit clear)
///
/// Only the low seven bits of `address` are used.
pub const fn write_address(address: u8) -> u8 {
    address << 1
}

/// Address byte for a read transfer (R/W bit set)
pub const fn read_address(address: u8) -> u8 {
    (address << 1) | 1
}

/// Check that a 7-bit address is outside the reserved ranges
///
/// 0x00-0x07 and 0x78-0x7F are reserved for general call, CBUS, HS-mode
/// and 10-bit addressing.
pub const fn is_valid_address(address: u8) -> bool {
    address >= FIRST_ADDRESS && address <= LAST_ADDRESS
}

/// Bit timing profile
///
/// All values are microseconds. The settle delays only need to satisfy
/// device setup/hold requirements and must stay far below the stretch
/// timeout; see [`BusTiming::is_consistent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// Data setup before the clock is released
    pub setup_us: u32,
    /// Clock high hold after the data line is sampled
    pub high_us: u32,
    /// Clock low hold after the clock is pulled down
    pub low_us: u32,
    /// Hold between the edges of a START or STOP condition
    pub start_hold_us: u32,
    /// How long a slave may stretch the clock before the transfer fails
    pub stretch_timeout_us: u32,
    /// Half period of a recovery clock pulse
    pub recovery_half_period_us: u32,
    /// Settle time after releasing both lines at init
    pub idle_settle_us: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BusTiming {
    /// Roughly 100 kHz standard mode
    pub const STANDARD: Self = Self {
        setup_us: 2,
        high_us: 3,
        low_us: 2,
        start_hold_us: 4,
        stretch_timeout_us: 200,
        recovery_half_period_us: 5,
        idle_settle_us: 5,
    };

    /// Check every settle delay is well below the stretch timeout
    pub const fn is_consistent(&self) -> bool {
        let limit = self.stretch_timeout_us / 10;
        self.setup_us < limit
            && self.high_us < limit
            && self.low_us < limit
            && self.start_hold_us < limit
            && self.recovery_half_period_us < limit
    }

    /// Upper bound on the time one clocked bit can block
    pub const fn max_bit_us(&self) -> u32 {
        self.setup_us
            .saturating_add(self.stretch_timeout_us)
            .saturating_add(self.high_us)
            .saturating_add(self.low_us)
    }

    /// Upper bound on a START or STOP condition
    pub const fn max_condition_us(&self) -> u32 {
        self.stretch_timeout_us
            .saturating_add(self.start_hold_us.saturating_mul(3))
    }

    /// Upper bound on a register transaction moving `bytes` bytes
    ///
    /// Counts a device address byte for each of the two START conditions,
    /// the register byte and the payload, each nine clocked bits.
    /// Saturates at `u32::MAX`.
    pub const fn max_transaction_us(&self, bytes: usize) -> u32 {
        let bytes = if bytes > u32::MAX as usize {
            u32::MAX
        } else {
            bytes as u32
        };
        let frames = bytes.saturating_add(3);
        frames
            .saturating_mul(9)
            .saturating_mul(self.max_bit_us())
            .saturating_add(self.max_condition_us().saturating_mul(3))
    }
}
