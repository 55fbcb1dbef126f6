//! Temperature sensor trait

use crate::temperature::Temperature;

/// Trait for temperature sensors
///
/// Takes `&mut self` because reading the sensor requires exclusive bus
/// access.
pub trait TemperatureSensor {
    /// Bus error type
    type Error;

    /// Read the current temperature
    fn read_temperature(&mut self) -> Result<Temperature, Self::Error>;

    /// Read the current temperature in degrees Celsius
    fn read_celsius(&mut self) -> Result<f32, Self::Error> {
        self.read_temperature().map(|t| t.celsius())
    }

    /// Read the current temperature in tenths of a degree
    ///
    /// For example, 45.5°C is returned as 455.
    fn read_celsius_x10(&mut self) -> Result<i16, Self::Error> {
        self.read_temperature().map(|t| t.celsius_x10())
    }
}
