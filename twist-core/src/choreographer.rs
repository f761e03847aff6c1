//! Top-level driver
//!
//! Walks the [`State`] machine over a [`Program`]: wait for the master,
//! run the phase's moves through the [`MotionSequencer`], pulse the done
//! line, and move to the next phase until the program is finished.
//!
//! [`Choreographer::step`] does the work of one state (one move while
//! running) and returns a [`Step`] record so the caller can log progress
//! between blocking operations.

use embedded_hal::delay::DelayNs;
use twist_hal::{OutputPin, SpinWait, TickTimer};

use crate::config::{Program, ProgramError};
use crate::handshake::Handshake;
use crate::sequencer::{MotionSequencer, MoveReport};
use crate::state::{Event, State};

/// What a call to [`Choreographer::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Left `Init`
    Booted,
    /// Master released a phase
    Released {
        /// Phase index
        phase: usize,
    },
    /// One move executed
    Moved {
        /// Phase index
        phase: usize,
        /// Move index inside the phase
        index: usize,
        /// Observed outcome
        report: MoveReport,
    },
    /// Every move of a phase has run
    PhaseFinished {
        /// Phase index
        phase: usize,
    },
    /// Done pulse sent
    Signalled {
        /// Phase index
        phase: usize,
    },
    /// Already halted; nothing was done
    Halted,
}

/// Runs a program phase by phase
pub struct Choreographer<'a, P, T, D, S>
where
    P: OutputPin,
    T: TickTimer,
    D: DelayNs,
    S: SpinWait,
{
    program: &'a Program,
    sequencer: MotionSequencer<'a, P, T, D, S>,
    handshake: Handshake<'a, P, D, S>,
    state: State,
    next_move: usize,
}

impl<'a, P, T, D, S> Choreographer<'a, P, T, D, S>
where
    P: OutputPin,
    T: TickTimer,
    D: DelayNs,
    S: SpinWait,
{
    /// Create a choreographer for a validated program
    pub fn new(
        program: &'a Program,
        sequencer: MotionSequencer<'a, P, T, D, S>,
        handshake: Handshake<'a, P, D, S>,
    ) -> Result<Self, ProgramError> {
        program.validate()?;
        Ok(Self {
            program,
            sequencer,
            handshake,
            state: State::Init,
            next_move: 0,
        })
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// The sequencer, for inspecting line state between steps
    pub fn sequencer(&self) -> &MotionSequencer<'a, P, T, D, S> {
        &self.sequencer
    }

    /// The handshake, for inspecting the done line between steps
    pub fn handshake(&self) -> &Handshake<'a, P, D, S> {
        &self.handshake
    }

    /// Do the work of the current state and advance
    ///
    /// Blocks inside `AwaitProceed` until the master's edge and inside
    /// `RunMoves` for the duration of one move.
    pub fn step(&mut self) -> Step {
        match self.state {
            State::Init => {
                self.fire(Event::BootComplete);
                Step::Booted
            }
            State::AwaitProceed(phase) => {
                self.handshake.await_proceed();
                self.next_move = 0;
                self.fire(Event::ProceedReceived);
                Step::Released { phase }
            }
            State::RunMoves(phase) => {
                let next = self
                    .program
                    .phase(phase)
                    .and_then(|p| p.moves.get(self.next_move))
                    .copied();

                match next {
                    Some(mv) => {
                        let index = self.next_move;
                        let report = self.sequencer.execute_move(mv);
                        self.next_move += 1;
                        Step::Moved {
                            phase,
                            index,
                            report,
                        }
                    }
                    None => {
                        self.fire(Event::MovesFinished);
                        Step::PhaseFinished { phase }
                    }
                }
            }
            State::SignalDone(phase) => {
                self.handshake.signal_done();
                if phase + 1 < self.program.phase_count() {
                    self.fire(Event::DoneSignalled);
                } else {
                    self.fire(Event::ProgramFinished);
                }
                Step::Signalled { phase }
            }
            State::Halt => Step::Halted,
        }
    }

    /// Run until the program halts
    pub fn run(&mut self) {
        while !self.state.is_terminal() {
            self.step();
        }
    }

    fn fire(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }
}
