//! Transaction layer
//!
//! Composes the bit-level engine into register reads and writes. Every
//! public operation ends with a STOP, so the bus is idle whenever control
//! returns to the caller.

use heapless::Vec;
use horologe_hal::i2c::{read_address, write_address, FIRST_ADDRESS, LAST_ADDRESS};
use horologe_hal::{BusError, I2cBus, OpenDrainPin, TickSource};

use super::engine::SoftI2c;

impl<SCL, SDA, T> SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    /// Bring the bus to a known idle state at start-up
    ///
    /// Releases both wires, lets them settle, then runs the recovery
    /// procedure in case a slave was left mid-byte by a reset.
    pub fn init(&mut self) {
        self.line.release_all();
        self.delay(self.timing.idle_settle_us);
        self.recover();
    }

    /// Probe every non-reserved address and collect the ones that answer
    ///
    /// Addresses are returned in ascending order. Stops early once `N`
    /// devices have been found.
    pub fn scan<const N: usize>(&mut self) -> Vec<u8, N> {
        let mut found = Vec::new();

        for address in FIRST_ADDRESS..=LAST_ADDRESS {
            if self.probe_address(address) {
                debug!("device at {=u8:#x}", address);
                if found.push(address).is_err() {
                    break;
                }
            }
        }

        found
    }

    fn probe_address(&mut self, address: u8) -> bool {
        let acked = self
            .start()
            .and_then(|()| self.write_byte(write_address(address)));
        let _ = self.stop();

        matches!(acked, Ok(true))
    }

    fn read_registers(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.start()?;
        self.write_acked(write_address(address))?;
        self.write_acked(register)?;

        // Addressing the device for read would hand it the data line
        if buf.is_empty() {
            return Ok(());
        }

        self.start()?;
        self.write_acked(read_address(address))?;

        let last = buf.len().saturating_sub(1);
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.read_byte(i < last)?;
        }

        Ok(())
    }

    fn write_registers(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), BusError> {
        self.start()?;
        self.write_acked(write_address(address))?;
        self.write_acked(register)?;

        for &byte in data {
            self.write_acked(byte)?;
        }

        Ok(())
    }
}

impl<SCL, SDA, T> I2cBus for SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    type Error = BusError;

    fn probe(&mut self, address: u8) -> bool {
        self.probe_address(address)
    }

    fn mem_read(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        let result = self.read_registers(address, register, buf);
        self.finish(result)
    }

    fn mem_write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), BusError> {
        let result = self.write_registers(address, register, data);
        self.finish(result)
    }

    fn recover_bus(&mut self) {
        self.recover();
    }
}
