//! GPIO pin abstractions
//!
//! Every line the chopper firmware drives is a plain push-pull output:
//! chopper sleep lines, the shared direction and step lines, the
//! microstep mode-select lines and the "done" line to the master.

/// Digital output pin
///
/// Writes are infallible; implementations handle the register
/// manipulation for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    ///
    /// Called from the tick interrupt, so implementations must not block.
    fn toggle(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn toggle(&mut self) {
        T::toggle(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }
}
