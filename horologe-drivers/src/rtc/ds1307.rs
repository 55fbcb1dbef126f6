//! DS1307 real-time clock
//!
//! Battery-backed clock with time kept as packed BCD in a small register
//! file. Only 24-hour mode is supported.

use horologe_core::traits::{RealTimeClock, RtcError};
use horologe_core::TimeValue;
use horologe_hal::I2cBus;

/// Fixed 7-bit bus address
pub const DS1307_ADDRESS: u8 = 0x68;

/// Register map
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DAY: u8 = 0x03;
    pub const DATE: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const CONTROL: u8 = 0x07;
}

/// Clock-halt flag in the seconds register (1 = oscillator stopped)
pub const CLOCK_HALT: u8 = 0x80;

/// Hours field in 24-hour mode
pub const HOURS_MASK: u8 = 0x3F;

/// Packed BCD to binary
pub const fn bcd_to_dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Binary to packed BCD (input must be below 100)
pub const fn dec_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode the seconds, minutes and hours registers
///
/// The clock-halt flag is ignored. Returns `None` if the registers hold an
/// out-of-range time, which happens on a fresh chip with garbage RAM.
pub fn decode_time(raw: [u8; 3]) -> Option<TimeValue> {
    TimeValue::new(
        bcd_to_dec(raw[2] & HOURS_MASK),
        bcd_to_dec(raw[1] & 0x7F),
        bcd_to_dec(raw[0] & !CLOCK_HALT),
    )
}

/// Encode a time as seconds, minutes and hours registers
///
/// The clock-halt flag is cleared, so writing the time also starts the
/// oscillator.
pub fn encode_time(time: &TimeValue) -> [u8; 3] {
    [
        dec_to_bcd(time.seconds) & !CLOCK_HALT,
        dec_to_bcd(time.minutes),
        dec_to_bcd(time.hours) & HOURS_MASK,
    ]
}

/// DS1307 driver
pub struct Ds1307<I2C> {
    i2c: I2C,
}

impl<I2C: I2cBus> Ds1307<I2C> {
    /// Create a driver on the given bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read consecutive registers starting at `register`
    pub fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c.mem_read(DS1307_ADDRESS, register, buf)
    }

    /// Write consecutive registers starting at `register`
    pub fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.mem_write(DS1307_ADDRESS, register, data)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf)?;
        Ok(buf[0])
    }

    /// Read hours, minutes and seconds in one transfer
    pub fn read_time(&mut self) -> Result<TimeValue, RtcError<I2C::Error>> {
        let mut raw = [0u8; 3];
        self.read_registers(reg::SECONDS, &mut raw)
            .map_err(RtcError::Bus)?;
        decode_time(raw).ok_or(RtcError::InvalidTime)
    }

    /// Set the time and start the oscillator
    pub fn write_time(&mut self, time: &TimeValue) -> Result<(), RtcError<I2C::Error>> {
        if !time.is_valid() {
            return Err(RtcError::InvalidTime);
        }
        self.write_registers(reg::SECONDS, &encode_time(time))
            .map_err(RtcError::Bus)
    }

    /// Seconds (0-59), ignoring the halt flag
    pub fn read_seconds(&mut self) -> Result<u8, I2C::Error> {
        self.read_register(reg::SECONDS)
            .map(|b| bcd_to_dec(b & !CLOCK_HALT))
    }

    pub fn read_minutes(&mut self) -> Result<u8, I2C::Error> {
        self.read_register(reg::MINUTES).map(|b| bcd_to_dec(b & 0x7F))
    }

    pub fn read_hours(&mut self) -> Result<u8, I2C::Error> {
        self.read_register(reg::HOURS)
            .map(|b| bcd_to_dec(b & HOURS_MASK))
    }

    /// Oscillator is stopped
    pub fn is_halted(&mut self) -> Result<bool, I2C::Error> {
        self.read_register(reg::SECONDS)
            .map(|b| b & CLOCK_HALT != 0)
    }

    /// Clear the halt flag, keeping the current seconds value
    ///
    /// Bus errors are ignored; call this at start-up before anything else
    /// is known about the bus.
    pub fn start_oscillator_if_halted(&mut self) {
        let Ok(seconds) = self.read_register(reg::SECONDS) else {
            return;
        };

        if seconds & CLOCK_HALT != 0 {
            debug!("rtc oscillator halted, starting");
            let _ = self.write_registers(reg::SECONDS, &[seconds & !CLOCK_HALT]);
        }
    }
}

impl<I2C: I2cBus> RealTimeClock for Ds1307<I2C> {
    type Error = I2C::Error;

    fn read_time(&mut self) -> Result<TimeValue, RtcError<Self::Error>> {
        Ds1307::read_time(self)
    }

    fn write_time(&mut self, time: &TimeValue) -> Result<(), RtcError<Self::Error>> {
        Ds1307::write_time(self, time)
    }

    fn start_oscillator_if_halted(&mut self) {
        Ds1307::start_oscillator_if_halted(self)
    }
}
