//! GPIO pin abstractions
//!
//! Bus wires are open-drain: a pin can only pull the line low or let go of
//! it. The external pull-up (or any other agent on the wire) decides what
//! the line actually reads once released.

/// Open-drain bus wire
///
/// Implementations must make [`OpenDrainPin::drive_low`] take effect
/// immediately. After [`OpenDrainPin::release`] the line may stay low for as
/// long as another device holds it, so callers sample the real level with
/// [`OpenDrainPin::is_high`] rather than trusting the last command.
pub trait OpenDrainPin {
    /// Stop driving the line and let the pull-up take it high
    fn release(&mut self);

    /// Pull the line low
    fn drive_low(&mut self);

    /// Sample the physical line level
    ///
    /// Takes `&mut self` because some GPIO implementations need mutable
    /// access to read the input register.
    fn is_high(&mut self) -> bool;

    /// Sample the physical line level
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }

    /// Release the line for `true`, drive it low for `false`
    fn set_level(&mut self, high: bool) {
        if high {
            self.release();
        } else {
            self.drive_low();
        }
    }
}

impl<T: OpenDrainPin + ?Sized> OpenDrainPin for &mut T {
    fn release(&mut self) {
        T::release(self)
    }

    fn drive_low(&mut self) {
        T::drive_low(self)
    }

    fn is_high(&mut self) -> bool {
        T::is_high(self)
    }
}
