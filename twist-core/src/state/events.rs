//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Pins configured and program validated
    BootComplete,
    /// Master raised the proceed line
    ProceedReceived,
    /// Last move of the current phase finished
    MovesFinished,
    /// Done pulse sent and more phases remain
    DoneSignalled,
    /// Done pulse sent for the last phase
    ProgramFinished,
}
