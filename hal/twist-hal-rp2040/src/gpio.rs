//! GPIO output lines
//!
//! Wraps `embassy_rp::gpio::Output` so it can implement the `twist-hal`
//! output trait.

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;

/// Push-pull output line
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Configure a pin as an output, starting at `initial`
    pub fn new(pin: Peri<'d, impl Pin>, initial: bool) -> Self {
        let level = if initial { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl twist_hal::OutputPin for GpioOutput<'_> {
    #[inline]
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    #[inline]
    fn set_low(&mut self) {
        self.pin.set_low();
    }

    #[inline]
    fn toggle(&mut self) {
        self.pin.toggle();
    }

    #[inline]
    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
