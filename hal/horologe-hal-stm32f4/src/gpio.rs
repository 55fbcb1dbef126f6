//! Open-drain bus wires for STM32F4
//!
//! The pin must already be configured as an open-drain output with its
//! input buffer enabled, which `OutputOpenDrain` does. An external 4.7k
//! pull-up to 3.3V is expected on each wire.

use embassy_stm32::gpio::OutputOpenDrain;
use horologe_hal::OpenDrainPin;

/// One bus wire on an open-drain GPIO
pub struct OpenDrainLine<'d> {
    pin: OutputOpenDrain<'d>,
}

impl<'d> OpenDrainLine<'d> {
    /// Wrap an open-drain output
    ///
    /// The line is released immediately so the bus starts idle-high.
    pub fn new(pin: OutputOpenDrain<'d>) -> Self {
        let mut line = Self { pin };
        line.release();
        line
    }

    /// Give the pin back
    pub fn into_inner(self) -> OutputOpenDrain<'d> {
        self.pin
    }
}

impl OpenDrainPin for OpenDrainLine<'_> {
    fn release(&mut self) {
        // Output register set = N-channel off
        self.pin.set_high();
    }

    fn drive_low(&mut self) {
        self.pin.set_low();
    }

    fn is_high(&mut self) -> bool {
        // Reads the input data register, not the output latch
        self.pin.is_high()
    }
}
