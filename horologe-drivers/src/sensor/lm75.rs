//! LM75 temperature sensor
//!
//! The temperature register is a big-endian word with the reading
//! left-justified and two's-complement signed.
//!
//! # Register alignment
//!
//! The reading is aligned by shifting the word right by
//! [`TEMP_ALIGN_SHIFT`] bits and counted in steps of
//! [`TEMP_STEP_EIGHTHS`] eighths of a degree. The
//! classic LM75 has 9 significant bits (0.5 °C, shift 7); the 11-bit
//! LM75B/LM75A parts use shift 5 with 0.125 °C, which is what the board is
//! built around. Check both constants against the datasheet of the fitted
//! part before trusting absolute readings.

use horologe_core::traits::TemperatureSensor;
use horologe_core::Temperature;
use horologe_hal::I2cBus;

/// Address with A2..A0 strapped low
pub const LM75_ADDRESS: u8 = 0x48;

/// Register map
pub mod reg {
    pub const TEMP: u8 = 0x00;
    pub const CONF: u8 = 0x01;
    pub const THYST: u8 = 0x02;
    pub const TOS: u8 = 0x03;
}

/// Right shift that aligns the raw word to the sensor's resolution
pub const TEMP_ALIGN_SHIFT: u32 = 5;

/// One aligned count in 1/8 °C steps (1 for 0.125 °C, 4 for 0.5 °C)
pub const TEMP_STEP_EIGHTHS: i16 = 1;

/// Degrees per least-significant bit after alignment
pub const TEMP_STEP_C: f32 = TEMP_STEP_EIGHTHS as f32 * Temperature::STEP_C;

/// Decode the two temperature register bytes
pub fn decode_temperature(raw: [u8; 2]) -> Temperature {
    decode_aligned(raw, TEMP_ALIGN_SHIFT, TEMP_STEP_EIGHTHS)
}

fn decode_aligned(raw: [u8; 2], shift: u32, step_eighths: i16) -> Temperature {
    let bits = 16 - shift;
    let aligned = (u16::from_be_bytes(raw) >> shift) as i32;

    // Sign-extend from the top significant bit
    let count = if aligned & (1 << (bits - 1)) != 0 {
        aligned - (1 << bits)
    } else {
        aligned
    };

    Temperature::from_eighths((count * step_eighths as i32) as i16)
}

/// LM75 driver
pub struct Lm75<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cBus> Lm75<I2C> {
    /// Create a driver for a sensor at the default address
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: LM75_ADDRESS,
        }
    }

    /// Create a driver for a sensor with address pins strapped to `pins`
    ///
    /// Only the low three bits (A2..A0) are used.
    pub fn with_address_pins(i2c: I2C, pins: u8) -> Self {
        Self {
            i2c,
            address: LM75_ADDRESS | (pins & 0x07),
        }
    }

    /// 7-bit bus address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the temperature register
    pub fn read_temperature(&mut self) -> Result<Temperature, I2C::Error> {
        let mut raw = [0u8; 2];
        self.i2c.mem_read(self.address, reg::TEMP, &mut raw)?;
        Ok(decode_temperature(raw))
    }

    /// Read the temperature in degrees Celsius
    pub fn read_celsius(&mut self) -> Result<f32, I2C::Error> {
        self.read_temperature().map(|t| t.celsius())
    }
}

impl<I2C: I2cBus> TemperatureSensor for Lm75<I2C> {
    type Error = I2C::Error;

    fn read_temperature(&mut self) -> Result<Temperature, Self::Error> {
        Lm75::read_temperature(self)
    }

    fn read_celsius(&mut self) -> Result<f32, Self::Error> {
        Lm75::read_celsius(self)
    }
}
