//! Timing configuration
//!
//! All delays and periods the firmware uses, with their derivations. The
//! step counts in the choreography were tuned against these values, so
//! changing the tick rate changes how fast (not how far) the knobs turn.

use crate::chopper::MicrostepMode;

/// Clock feeding the tick timer (RP2040 system clock)
pub const TIMER_CLOCK_HZ: u32 = 125_000_000;

/// Tick interrupt rate
///
/// 16 MHz / 231, the rate the knob step counts were calibrated at. The
/// step line toggles once per tick, so the step rate is half of this.
pub const TICK_HZ: u32 = 16_000_000 / 231;

/// Time a chopper needs to leave sleep before it accepts step pulses
///
/// About 230 000 cycles at 16 MHz.
pub const SETTLE_MS: u32 = 15;

/// Debounce applied to the master's proceed edge
///
/// About 100 000 cycles at 16 MHz.
pub const DEBOUNCE_MS: u32 = 6;

/// Length of the "phase done" pulse sent back to the master
///
/// About 50 000 000 cycles at 16 MHz.
pub const DONE_PULSE_MS: u32 = 3_125;

/// Timing parameters shared by the generator, sequencer and handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Tick timer input clock in Hz
    pub timer_clock_hz: u32,
    /// Tick interrupt rate in Hz
    pub tick_hz: u32,
    /// Chopper wake-up delay in milliseconds
    pub settle_ms: u32,
    /// Proceed edge debounce in milliseconds
    pub debounce_ms: u32,
    /// Done pulse width in milliseconds
    pub done_pulse_ms: u32,
    /// Microstep resolution driven on the mode-select lines at boot
    pub microstep: MicrostepMode,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TimingConfig {
    /// Production timing
    pub const DEFAULT: Self = Self {
        timer_clock_hz: TIMER_CLOCK_HZ,
        tick_hz: TICK_HZ,
        settle_ms: SETTLE_MS,
        debounce_ms: DEBOUNCE_MS,
        done_pulse_ms: DONE_PULSE_MS,
        microstep: MicrostepMode::ThirtySecond,
    };

    /// Timer compare period in timer clock cycles
    ///
    /// Returns 0 if `tick_hz` is 0.
    pub const fn compare_period(&self) -> u32 {
        if self.tick_hz == 0 {
            return 0;
        }
        self.timer_clock_hz / self.tick_hz
    }

    /// Step pulse rate in Hz (two ticks per full pulse)
    pub const fn step_hz(&self) -> u32 {
        self.tick_hz / 2
    }

    /// Duration of a move of `steps` pulses in milliseconds, excluding the
    /// settle delay
    pub fn move_duration_ms(&self, steps: u32) -> u32 {
        let step_hz = self.step_hz();
        if step_hz == 0 {
            return 0;
        }
        ((steps as u64 * 1000) / step_hz as u64) as u32
    }
}
