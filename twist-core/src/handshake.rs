//! Handshake with the master controller
//!
//! The master releases each phase with a rising edge on the proceed line.
//! The edge handler debounces and raises [`ProceedFlag`]; the main
//! sequence lowers the flag, spins until it is raised again, runs the
//! phase and answers with a fixed-width pulse on the done line.

use embedded_hal::delay::DelayNs;
use portable_atomic::{AtomicBool, Ordering};
use twist_hal::{OutputPin, SpinWait};

/// Single-writer (edge handler), single-reader (main sequence) flag
#[derive(Debug)]
pub struct ProceedFlag {
    raised: AtomicBool,
}

impl Default for ProceedFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ProceedFlag {
    /// Create a lowered flag
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Edge handler body
    ///
    /// Blocks for the debounce time, then raises the flag. The debounce is
    /// short compared to how rarely the master toggles the line.
    pub fn on_edge<D: DelayNs>(&self, delay: &mut D, debounce_ms: u32) {
        delay.delay_ms(debounce_ms);
        self.raised.store(true, Ordering::Release);
    }

    /// Check whether an edge has been seen since the flag was lowered
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    pub(crate) fn lower(&self) {
        self.raised.store(false, Ordering::Release);
    }
}

/// Main-sequence side of the handshake
pub struct Handshake<'a, P: OutputPin, D: DelayNs, S: SpinWait> {
    flag: &'a ProceedFlag,
    done: P,
    delay: D,
    spin: S,
    pulse_ms: u32,
}

impl<'a, P: OutputPin, D: DelayNs, S: SpinWait> Handshake<'a, P, D, S> {
    /// Create the handshake with the done line driven low
    pub fn new(flag: &'a ProceedFlag, mut done: P, delay: D, spin: S, pulse_ms: u32) -> Self {
        done.set_low();
        Self {
            flag,
            done,
            delay,
            spin,
            pulse_ms,
        }
    }

    /// Block until the master sends a fresh proceed edge
    ///
    /// The flag is lowered first, so an edge that arrived before this call
    /// does not release it. There is no timeout.
    pub fn await_proceed(&mut self) {
        self.flag.lower();
        let flag = self.flag;
        self.spin.spin_until(|| flag.is_raised());
    }

    /// Pulse the done line high for the configured width
    pub fn signal_done(&mut self) {
        self.done.set_high();
        self.delay.delay_ms(self.pulse_ms);
        self.done.set_low();
    }

    /// Current level of the done line
    pub fn done_is_high(&self) -> bool {
        self.done.is_set_high()
    }
}
