//! Monotonic tick source
//!
//! The bus engine measures every delay and timeout against a free-running
//! counter. The counter is allowed to wrap; all differences are taken with
//! wrapping arithmetic so an interval spanning the wrap point is still
//! measured correctly.

/// Free-running monotonic tick counter
pub trait TickSource {
    /// Current counter value
    fn now(&self) -> u32;

    /// Counter ticks per microsecond
    ///
    /// Must be at least 1.
    fn ticks_per_us(&self) -> u32;

    /// Ticks elapsed since `since`, correct across counter wraparound
    fn elapsed(&self, since: u32) -> u32 {
        self.now().wrapping_sub(since)
    }

    /// Whole microseconds elapsed since `since`
    fn elapsed_us(&self, since: u32) -> u32 {
        self.elapsed(since) / self.ticks_per_us().max(1)
    }

    /// Busy-wait for at least `us` microseconds
    ///
    /// Never yields; the caller is blocked for the whole delay.
    fn delay_us(&self, us: u32) {
        let ticks = us.saturating_mul(self.ticks_per_us());
        let start = self.now();
        while self.elapsed(start) < ticks {
            core::hint::spin_loop();
        }
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now(&self) -> u32 {
        T::now(self)
    }

    fn ticks_per_us(&self) -> u32 {
        T::ticks_per_us(self)
    }
}
