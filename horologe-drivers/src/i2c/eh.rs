//! `embedded-hal` bridge
//!
//! Lets any driver written against `embedded_hal::i2c::I2c` run on the
//! software bus master.

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use horologe_hal::i2c::{read_address, write_address};
use horologe_hal::{BusError, OpenDrainPin, TickSource};

use super::engine::SoftI2c;

impl<SCL, SDA, T> ErrorType for SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    type Error = BusError;
}

impl<SCL, SDA, T> SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    fn run_operations(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), BusError> {
        // None until the first address byte goes out, then Some(is_read)
        let mut direction = None;

        for i in 0..operations.len() {
            // Keep ACKing if the next read that moves data follows directly
            let read_continues = matches!(
                operations[i + 1..].iter().find(|op| !is_empty_read(op)),
                Some(Operation::Read(_))
            );

            match &mut operations[i] {
                Operation::Write(bytes) => {
                    if direction != Some(false) {
                        self.start()?;
                        self.write_acked(write_address(address))?;
                        direction = Some(false);
                    }
                    for &byte in bytes.iter() {
                        self.write_acked(byte)?;
                    }
                }
                // Addressing for read would hand the data line to the slave
                Operation::Read(buf) if buf.is_empty() => {}
                Operation::Read(buf) => {
                    if direction != Some(true) {
                        self.start()?;
                        self.write_acked(read_address(address))?;
                        direction = Some(true);
                    }
                    let last = buf.len().saturating_sub(1);
                    for (j, slot) in buf.iter_mut().enumerate() {
                        *slot = self.read_byte(j < last || read_continues)?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn is_empty_read(op: &Operation<'_>) -> bool {
    matches!(op, Operation::Read(buf) if buf.is_empty())
}

impl<SCL, SDA, T> I2c<SevenBitAddress> for SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if operations.is_empty() {
            return Ok(());
        }

        trace!("transaction to {=u8:#x}, {=usize} ops", address, operations.len());
        let result = self.run_operations(address, operations);
        self.finish(result)
    }
}
