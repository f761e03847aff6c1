//! Busy-wait abstraction
//!
//! The firmware has exactly two blocking points: waiting for the step
//! counter to reach its target and waiting for the master's proceed
//! edge. Both are pure spin loops with no timeout. Routing the loop body
//! through [`SpinWait`] keeps those semantics on hardware while letting a
//! test bench advance simulated time on every iteration.

/// One iteration of a busy-wait loop
pub trait SpinWait {
    /// Spend one loop iteration waiting
    fn spin(&mut self);

    /// Spin until `done` returns true
    ///
    /// There is no timeout: if the condition never becomes true this never
    /// returns.
    fn spin_until<F>(&mut self, mut done: F)
    where
        F: FnMut() -> bool,
    {
        while !done() {
            self.spin();
        }
    }
}

/// Spin on the CPU with a processor hint and nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct BusySpin;

impl SpinWait for BusySpin {
    #[inline]
    fn spin(&mut self) {
        core::hint::spin_loop();
    }
}
