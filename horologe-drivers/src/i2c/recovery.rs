//! Stuck-bus recovery
//!
//! A slave reset mid-byte can be left driving the data line low while it
//! waits for clocks that never come. Pulsing the clock lets it finish the
//! byte and release the line; a STOP then resets every slave's state
//! machine.

use horologe_hal::i2c::RECOVERY_PULSES;
use horologe_hal::{OpenDrainPin, TickSource};

use super::engine::SoftI2c;

impl<SCL, SDA, T> SoftI2c<SCL, SDA, T>
where
    SCL: OpenDrainPin,
    SDA: OpenDrainPin,
    T: TickSource,
{
    /// Clock out a slave holding the data line, then issue a STOP
    ///
    /// Gives up after [`RECOVERY_PULSES`] clocks. Returns the number of
    /// pulses that were needed.
    pub(super) fn recover(&mut self) -> u8 {
        let half = self.timing.recovery_half_period_us;
        let mut pulses = 0;

        self.line.release_data();
        if !self.line.data_is_high() {
            debug!("data line held low, pulsing clock");

            while pulses < RECOVERY_PULSES {
                self.line.drive_clock_low();
                self.delay(half);
                self.line.release_clock();
                self.delay(half);
                pulses += 1;

                if self.line.data_is_high() {
                    break;
                }
            }

            if self.line.data_is_high() {
                debug!("data line released after {=u8} pulses", pulses);
            } else {
                warn!("data line still low after {=u8} pulses", pulses);
            }
        }

        let _ = self.stop();
        pulses
    }
}
