//! Step pulse generator
//!
//! A periodic tick interrupt toggles the shared step line and counts
//! ticks. The main sequence arms the tick (reset counter, enable
//! interrupt), spins until the count reaches its target, then disarms.
//!
//! # Access discipline
//!
//! The counter is written by the tick handler only while armed, and reset
//! by the generator only while disarmed. Since arming and disarming are
//! the only way to start and stop ticks, the counter needs no lock: the
//! "lock" is the interrupt enable bit.

use portable_atomic::{AtomicU32, Ordering};
use twist_hal::{OutputPin, TickTimer};

use crate::config::TimingConfig;

/// Tick counter shared between the tick interrupt and the main sequence
///
/// Intended to live in a `static` so the interrupt handler can reach it.
#[derive(Debug)]
pub struct StepCounter {
    ticks: AtomicU32,
}

impl Default for StepCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StepCounter {
    /// Create a zeroed counter
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
        }
    }

    /// Tick interrupt body
    ///
    /// Counts one tick and toggles the step line. Nothing else happens
    /// here; this runs at tens of kHz and preempts the main sequence.
    #[inline]
    pub fn on_tick<P: OutputPin>(&self, step_pin: &mut P) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        step_pin.toggle();
    }

    /// Ticks counted since the last reset
    #[inline]
    pub fn count(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Only valid while the tick interrupt is disabled
    pub(crate) fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
    }
}

/// Owns the tick timer and arms it against the shared counter
pub struct StepPulseGenerator<'a, T: TickTimer> {
    counter: &'a StepCounter,
    timer: T,
    compare_period: u32,
}

impl<'a, T: TickTimer> StepPulseGenerator<'a, T> {
    /// Create a generator and configure its timer (left disarmed)
    pub fn new(counter: &'a StepCounter, timer: T, timing: &TimingConfig) -> Self {
        let mut generator = Self {
            counter,
            timer,
            compare_period: timing.compare_period(),
        };
        generator.configure();
        generator
    }

    /// Program the timer period, interrupt disabled
    pub fn configure(&mut self) {
        self.timer.configure(self.compare_period);
        self.timer.disable_interrupt();
    }

    /// Reset the counter and enable the tick interrupt
    ///
    /// The counter is reset before the interrupt is enabled so no tick of
    /// the new move is lost.
    pub fn arm(&mut self) {
        self.counter.reset();
        self.timer.enable_interrupt();
    }

    /// Disable the tick interrupt and return the final count
    pub fn disarm(&mut self) -> u32 {
        self.timer.disable_interrupt();
        self.counter.count()
    }

    /// Check whether the tick interrupt is enabled
    pub fn is_armed(&self) -> bool {
        self.timer.interrupt_enabled()
    }

    /// Ticks counted so far in the current move
    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    /// Check whether the current move has reached `target` ticks
    pub fn reached(&self, target: u32) -> bool {
        self.counter.count() >= target
    }

    /// Compare period the timer was configured with
    pub fn compare_period(&self) -> u32 {
        self.compare_period
    }
}
