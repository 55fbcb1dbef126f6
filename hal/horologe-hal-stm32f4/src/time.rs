//! DWT cycle counter tick source
//!
//! The Cortex-M4 data watchpoint unit counts core clock cycles in a 32-bit
//! register that wraps roughly every 25 seconds at 168 MHz. That is far
//! longer than any bus transaction, so wrapping differences are enough.

use cortex_m::peripheral::{DCB, DWT};
use horologe_hal::TickSource;

/// Busy-wait timing from the core cycle counter
#[derive(Debug, Clone, Copy)]
pub struct DwtTicks {
    ticks_per_us: u32,
}

impl DwtTicks {
    /// Enable the cycle counter and build a tick source
    ///
    /// # Arguments
    /// - `dcb`: Debug control block, used to turn on trace
    /// - `dwt`: DWT unit whose cycle counter is enabled
    /// - `core_hz`: Core clock frequency (e.g. 168_000_000)
    pub fn new(dcb: &mut DCB, dwt: &mut DWT, core_hz: u32) -> Self {
        dcb.enable_trace();
        dwt.enable_cycle_counter();
        Self {
            ticks_per_us: (core_hz / 1_000_000).max(1),
        }
    }

    /// Core clock in MHz this source was built for
    pub fn core_mhz(&self) -> u32 {
        self.ticks_per_us
    }
}

impl TickSource for DwtTicks {
    fn now(&self) -> u32 {
        DWT::cycle_count()
    }

    fn ticks_per_us(&self) -> u32 {
        self.ticks_per_us
    }
}
