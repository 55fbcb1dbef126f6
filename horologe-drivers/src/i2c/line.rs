//! Bus wires
//!
//! [`BusLine`] owns the clock and data pins for the lifetime of the bus
//! master. Nothing else may touch them while a transaction runs.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};
use horologe_hal::OpenDrainPin;

/// The two open-drain wires of the bus
pub struct BusLine<SCL, SDA> {
    scl: SCL,
    sda: SDA,
}

impl<SCL: OpenDrainPin, SDA: OpenDrainPin> BusLine<SCL, SDA> {
    /// Take ownership of the clock and data pins
    pub fn new(scl: SCL, sda: SDA) -> Self {
        Self { scl, sda }
    }

    /// Give the pins back
    pub fn free(self) -> (SCL, SDA) {
        (self.scl, self.sda)
    }

    /// Let the clock float high (a slave may still hold it low)
    #[inline]
    pub fn release_clock(&mut self) {
        self.scl.release();
    }

    /// Pull the clock low
    #[inline]
    pub fn drive_clock_low(&mut self) {
        self.scl.drive_low();
    }

    /// Let the data line float high
    #[inline]
    pub fn release_data(&mut self) {
        self.sda.release();
    }

    /// Pull the data line low
    #[inline]
    pub fn drive_data_low(&mut self) {
        self.sda.drive_low();
    }

    /// Release the data line for a 1 bit, pull it low for a 0 bit
    #[inline]
    pub fn set_data(&mut self, high: bool) {
        self.sda.set_level(high);
    }

    /// Sample the clock wire
    #[inline]
    pub fn clock_is_high(&mut self) -> bool {
        self.scl.is_high()
    }

    /// Sample the data wire
    #[inline]
    pub fn data_is_high(&mut self) -> bool {
        self.sda.is_high()
    }

    /// Release both wires
    pub fn release_all(&mut self) {
        self.sda.release();
        self.scl.release();
    }

    /// Both wires read high
    pub fn is_idle(&mut self) -> bool {
        self.scl.is_high() && self.sda.is_high()
    }
}

/// Adapter for `embedded-hal` pins configured as open-drain outputs
///
/// `set_high` on an open-drain output releases the wire and `is_high`
/// reads the pad, which is exactly an [`OpenDrainPin`]. Only infallible
/// pins are accepted: a bus wire that can fail to toggle has no
/// meaningful recovery at this layer.
pub struct EhOpenDrain<P>(P);

impl<P> EhOpenDrain<P>
where
    P: OutputPin<Error = Infallible> + InputPin<Error = Infallible>,
{
    /// Wrap a pin and release it
    pub fn new(pin: P) -> Self {
        let mut pin = Self(pin);
        pin.release();
        pin
    }

    /// Give the pin back
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OpenDrainPin for EhOpenDrain<P>
where
    P: OutputPin<Error = Infallible> + InputPin<Error = Infallible>,
{
    fn release(&mut self) {
        self.0.set_high().unwrap_or_else(|e| match e {});
    }

    fn drive_low(&mut self) {
        self.0.set_low().unwrap_or_else(|e| match e {});
    }

    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or_else(|e| match e {})
    }
}
