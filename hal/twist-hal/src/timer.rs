//! Periodic tick timer abstraction
//!
//! The step pulse generator needs a hardware timer that fires an
//! interrupt once per compare period, counting up and auto-reloading.
//! Enabling and disabling that interrupt is how a move is armed and
//! disarmed.

/// Periodic timer that raises one interrupt per compare period
pub trait TickTimer {
    /// Program the timer for a fixed compare period
    ///
    /// The period is in timer clock cycles. The timer runs in
    /// up-counting, auto-reload mode. After this call the tick interrupt
    /// must be disabled; it is only enabled while a move is in flight.
    fn configure(&mut self, compare_period: u32);

    /// Enable the tick interrupt (arm)
    ///
    /// Implementations should discard any tick that became pending while
    /// the interrupt was disabled, so the first tick after arming belongs
    /// to the new move.
    fn enable_interrupt(&mut self);

    /// Disable the tick interrupt (disarm)
    fn disable_interrupt(&mut self);

    /// Check whether the tick interrupt is currently enabled
    fn interrupt_enabled(&self) -> bool;
}
