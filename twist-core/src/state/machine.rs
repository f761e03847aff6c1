//! State machine definition
//!
//! States carry the index of the phase they belong to. With the two-phase
//! choreography the run is:
//!
//! ```text
//! Init → AwaitProceed(0) → RunMoves(0) → SignalDone(0)
//!      → AwaitProceed(1) → RunMoves(1) → SignalDone(1) → Halt
//! ```

use super::events::Event;

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on, before the program has been accepted
    Init,
    /// Spinning on the proceed flag before a phase
    AwaitProceed(usize),
    /// Executing the moves of a phase
    RunMoves(usize),
    /// Pulsing the done line after a phase
    SignalDone(usize),
    /// Program finished; nothing further happens
    Halt,
}

impl State {
    /// Check if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Halt)
    }

    /// Process an event and return the next state
    ///
    /// Whether a finished phase is the last one is decided by the
    /// choreographer, which sends `DoneSignalled` or `ProgramFinished`.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Init, BootComplete) => AwaitProceed(0),
            (AwaitProceed(p), ProceedReceived) => RunMoves(p),
            (RunMoves(p), MovesFinished) => SignalDone(p),
            (SignalDone(p), DoneSignalled) => AwaitProceed(p + 1),
            (SignalDone(_), ProgramFinished) => Halt,

            // Default: stay in current state
            _ => self,
        }
    }
}
