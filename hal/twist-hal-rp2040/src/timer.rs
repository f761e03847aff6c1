//! PWM-based tick timer
//!
//! The RP2040 has no free general-purpose timer with a compare interrupt
//! that embassy does not already own, but each PWM slice is a 16-bit
//! up-counter with an 8.4 fixed-point clock divider and a wrap interrupt.
//! Running one slice free (no output pins) at `sys_clk / (div * (top + 1))`
//! gives exactly the periodic tick the step generator needs.
//!
//! All eight slices share the `PWM_IRQ_WRAP` vector. The firmware binds the
//! handler and calls [`acknowledge_wrap`] from it.

use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::pac;
use embassy_rp::pwm::{Config, Pwm, Slice};
use embassy_rp::Peri;
use fixed::types::U12F4;

/// Largest value of the PWM counter wrap register
pub const MAX_TOP: u32 = u16::MAX as u32;

/// Largest integer part of the PWM clock divider
pub const MAX_DIVIDER: u32 = 255;

/// Divider and wrap value for one tick period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WrapSettings {
    /// Integer clock divider (1..=255)
    pub divider: u8,
    /// Counter wrap value; the slice counts `0..=top`
    pub top: u16,
}

impl WrapSettings {
    /// Timer clock cycles per wrap
    pub fn period(&self) -> u32 {
        self.divider as u32 * (self.top as u32 + 1)
    }
}

/// Split a compare period into a clock divider and wrap value
///
/// Uses the smallest integer divider that fits the period in 16 bits, so
/// the rounding error is at most one divided clock. Periods below two
/// cycles are raised to two; periods too long for the slice are clamped.
pub fn pwm_wrap_settings(compare_period: u32) -> WrapSettings {
    let period = compare_period.max(2);

    let divider = period.div_ceil(MAX_TOP + 1).clamp(1, MAX_DIVIDER);
    let top = (period / divider).saturating_sub(1).clamp(1, MAX_TOP);

    WrapSettings {
        divider: divider as u8,
        top: top as u16,
    }
}

/// Clear the wrap flag of one slice
///
/// Must be called from the `PWM_IRQ_WRAP` handler, or the interrupt fires
/// again immediately.
#[inline]
pub fn acknowledge_wrap(slice: usize) {
    pac::PWM.intr().write(|w| w.set_ch(slice, true));
}

/// Tick timer on one free-running PWM slice
///
/// `SLICE` must match the slice peripheral passed to [`Self::new`].
pub struct PwmTickTimer<'d, const SLICE: usize> {
    pwm: Pwm<'d>,
    armed: bool,
}

impl<'d, const SLICE: usize> PwmTickTimer<'d, SLICE> {
    /// Take a PWM slice; it stays stopped until configured
    pub fn new<T: Slice>(slice: Peri<'d, T>) -> Self {
        let mut config = Config::default();
        config.enable = false;

        Self {
            pwm: Pwm::new_free(slice, config),
            armed: false,
        }
    }
}

impl<const SLICE: usize> twist_hal::TickTimer for PwmTickTimer<'_, SLICE> {
    fn configure(&mut self, compare_period: u32) {
        let settings = pwm_wrap_settings(compare_period);

        // The wrap interrupt stays masked while the slice starts counting
        self.disable_interrupt();

        let mut config = Config::default();
        config.top = settings.top;
        config.divider = U12F4::from_num(settings.divider);
        config.enable = true;
        self.pwm.set_config(&config);

        interrupt::PWM_IRQ_WRAP.unpend();
        // SAFETY: the handler for PWM_IRQ_WRAP is bound by the firmware and
        // only touches state behind a critical-section mutex.
        unsafe { interrupt::PWM_IRQ_WRAP.enable() };
    }

    fn enable_interrupt(&mut self) {
        // Drop any wrap that happened while disarmed
        acknowledge_wrap(SLICE);
        pac::PWM.inte().modify(|w| w.set_ch(SLICE, true));
        self.armed = true;
    }

    fn disable_interrupt(&mut self) {
        pac::PWM.inte().modify(|w| w.set_ch(SLICE, false));
        self.armed = false;
    }

    fn interrupt_enabled(&self) -> bool {
        self.armed
    }
}
