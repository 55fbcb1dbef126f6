//! Bit-level engine
//!
//! Generates START/STOP conditions and clocks single bytes in and out.
//! Every clock release goes through [`SoftI2c::wait_clock_high`], which
//! tolerates slave clock stretching up to the profile's timeout.
//!
//! # Bit timing
//!
//! ```text
//!          setup   stretch   high   low
//! SDA  ====X=======================X====   (data changes only while SCL is low)
//! SCL  ____/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\____
//!              ^ sample
//! ```

use horologe_hal::{BusError, BusTiming, OpenDrainPin, TickSource};

use super::line::BusLine;

/// Where the master is inside a transaction attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusState {
    /// No transaction; both lines released
    Idle,
    /// START (or repeated START) issued, clock held low
    Started,
    /// At least one byte clocked since the last START
    Transfer,
}

/// Software two-wire bus master
///
/// Owns both bus wires and the tick source. All operations block until
/// they complete or a clock-stretch timeout fires.
pub struct SoftI2c<SCL, SDA, T> {
    pub(super) line: BusLine<SCL, SDA>,
    pub(super) ticks: T,
    pub(super) timing: BusTiming,
    pub(super) state: BusState,
}

impl<SCL, SDA, T> SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    /// Create a bus master with the standard timing profile
    ///
    /// Both wires are released. Call [`SoftI2c::init`] once at start-up to
    /// also clear a bus left stuck by a previous reset.
    pub fn new(scl: SCL, sda: SDA, ticks: T) -> Self {
        Self::with_timing(scl, sda, ticks, BusTiming::STANDARD)
    }

    /// Create a bus master with a custom timing profile
    ///
    /// A profile whose settle delays come close to the stretch timeout is
    /// accepted but logged, since stretch detection gets unreliable.
    pub fn with_timing(scl: SCL, sda: SDA, ticks: T, timing: BusTiming) -> Self {
        if !timing.is_consistent() {
            warn!(
                "settle delays too close to the {=u32} us stretch timeout",
                timing.stretch_timeout_us
            );
        }

        let mut line = BusLine::new(scl, sda);
        line.release_all();
        Self {
            line,
            ticks,
            timing,
            state: BusState::Idle,
        }
    }

    /// Release the pins and tick source
    pub fn free(self) -> (SCL, SDA, T) {
        let (scl, sda) = self.line.free();
        (scl, sda, self.ticks)
    }

    /// Active timing profile
    pub fn timing(&self) -> &BusTiming {
        &self.timing
    }

    /// Current transaction state
    pub fn state(&self) -> BusState {
        self.state
    }

    /// Both wires currently read high
    pub fn is_idle(&mut self) -> bool {
        self.line.is_idle()
    }

    #[inline]
    pub(super) fn delay(&self, us: u32) {
        self.ticks.delay_us(us);
    }

    /// Release the clock and wait for it to read high
    ///
    /// A slave may hold the clock low to slow the master down; this waits
    /// out the stretch, bounded by `stretch_timeout_us`.
    pub(super) fn wait_clock_high(&mut self) -> Result<(), BusError> {
        self.line.release_clock();

        let start = self.ticks.now();
        let limit = self
            .timing
            .stretch_timeout_us
            .saturating_mul(self.ticks.ticks_per_us());

        while !self.line.clock_is_high() {
            if self.ticks.elapsed(start) > limit {
                warn!(
                    "clock held low past {=u32} us",
                    self.timing.stretch_timeout_us
                );
                return Err(BusError::ClockStretchTimeout);
            }
            core::hint::spin_loop();
        }

        Ok(())
    }

    /// Issue a START, or a repeated START inside a transaction
    ///
    /// Leaves the clock driven low and the data line driven low.
    pub(super) fn start(&mut self) -> Result<(), BusError> {
        let repeated = self.state != BusState::Idle;
        self.state = BusState::Started;

        self.line.release_data();
        if repeated {
            // Data goes high while the clock is still low
            self.delay(self.timing.setup_us);
        }
        self.wait_clock_high()?;

        if !repeated && !self.line.data_is_high() {
            warn!("data line held low before START; bus needs recovery");
        }

        self.delay(self.timing.start_hold_us);
        self.line.drive_data_low();
        self.delay(self.timing.start_hold_us);
        self.line.drive_clock_low();
        self.delay(self.timing.start_hold_us);

        Ok(())
    }

    /// Issue a STOP
    ///
    /// Always ends with both wires released by the master, even if the
    /// clock never came up. The stretch timeout is still reported so the
    /// success path can surface it.
    pub(super) fn stop(&mut self) -> Result<(), BusError> {
        self.line.drive_clock_low();
        self.delay(self.timing.low_us);
        self.line.drive_data_low();
        self.delay(self.timing.start_hold_us);

        let clock = self.wait_clock_high();

        self.delay(self.timing.start_hold_us);
        self.line.release_data();
        self.delay(self.timing.start_hold_us);

        self.state = BusState::Idle;
        clock
    }

    /// Clock one byte out, MSB first, and sample the acknowledge bit
    ///
    /// Returns `Ok(true)` if the slave pulled the data line low during the
    /// ninth clock.
    pub(super) fn write_byte(&mut self, byte: u8) -> Result<bool, BusError> {
        self.state = BusState::Transfer;

        for bit in (0..8).rev() {
            self.line.set_data(byte & (1 << bit) != 0);
            self.delay(self.timing.setup_us);
            self.wait_clock_high()?;
            self.delay(self.timing.high_us);
            self.line.drive_clock_low();
            self.delay(self.timing.low_us);
        }

        // Acknowledge slot belongs to the slave
        self.line.release_data();
        self.delay(self.timing.setup_us);
        self.wait_clock_high()?;
        let acked = !self.line.data_is_high();
        self.delay(self.timing.high_us);
        self.line.drive_clock_low();
        self.delay(self.timing.low_us);

        Ok(acked)
    }

    /// Clock one byte in, MSB first, then send ACK or NACK
    ///
    /// Pass `ack = false` for the final byte of a read so the slave stops
    /// driving the data line.
    pub(super) fn read_byte(&mut self, ack: bool) -> Result<u8, BusError> {
        self.state = BusState::Transfer;

        let mut value = 0u8;
        self.line.release_data();

        for bit in (0..8).rev() {
            self.wait_clock_high()?;
            self.delay(self.timing.setup_us);
            if self.line.data_is_high() {
                value |= 1 << bit;
            }
            self.line.drive_clock_low();
            self.delay(self.timing.low_us);
        }

        // Low = ACK, released = NACK
        self.line.set_data(!ack);
        self.delay(self.timing.setup_us);
        self.wait_clock_high()?;
        self.delay(self.timing.high_us);
        self.line.drive_clock_low();
        self.delay(self.timing.low_us);
        self.line.release_data();

        Ok(value)
    }

    /// Write a byte and turn a NACK into [`BusError::NoAck`]
    pub(super) fn write_acked(&mut self, byte: u8) -> Result<(), BusError> {
        if self.write_byte(byte)? {
            Ok(())
        } else {
            debug!("byte {=u8:#x} not acknowledged", byte);
            Err(BusError::NoAck)
        }
    }

    /// End a transaction attempt with a STOP
    ///
    /// On failure the original error wins; a second timeout from the STOP
    /// itself is dropped.
    pub(super) fn finish(&mut self, result: Result<(), BusError>) -> Result<(), BusError> {
        match result {
            Ok(()) => self.stop(),
            Err(e) => {
                let _ = self.stop();
                Err(e)
            }
        }
    }
}
