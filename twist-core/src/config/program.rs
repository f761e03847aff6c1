//! Program type definitions
//!
//! A program is an ordered list of phases; each phase is released by one
//! proceed edge from the master and acknowledged with one done pulse.
//! Everything here is immutable and lives in flash.

use core::fmt;

use crate::chopper::{Device, Direction};

/// Largest step magnitude a single move may request
///
/// Keeps the tick target (`2 * |steps|`) well inside `u32`.
pub const MAX_STEPS_PER_MOVE: u32 = 1 << 24;

/// One commanded rotation of one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Move {
    /// Chopper to wake for this move
    pub device: Device,
    /// Signed step count; the sign selects the rotation sense
    pub steps: i32,
}

impl Move {
    /// Create a move
    pub const fn new(device: Device, steps: i32) -> Self {
        Self { device, steps }
    }

    /// Rotation sense, or `None` for a zero-length move
    pub const fn direction(&self) -> Option<Direction> {
        Direction::from_steps(self.steps)
    }

    /// Number of ticks the move takes
    ///
    /// The step line toggles once per tick, so a full pulse is two ticks.
    pub const fn tick_target(&self) -> u32 {
        self.steps.unsigned_abs().saturating_mul(2)
    }
}

/// A group of moves released by one proceed edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase {
    /// Label used in logs
    pub name: &'static str,
    /// Moves executed in order
    pub moves: &'static [Move],
}

impl Phase {
    /// Create a phase
    pub const fn new(name: &'static str, moves: &'static [Move]) -> Self {
        Self { name, moves }
    }

    /// Total ticks across every move in the phase
    pub fn total_ticks(&self) -> u64 {
        self.moves.iter().map(|m| m.tick_target() as u64).sum()
    }
}

/// The complete compiled-in choreography
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Program {
    /// Phases executed in order, each gated by a handshake
    pub phases: &'static [Phase],
}

/// Reasons a program is rejected at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramError {
    /// Program has no phases
    Empty,
    /// A phase has no moves
    EmptyPhase {
        /// Index of the phase
        phase: usize,
    },
    /// A move asks for more than [`MAX_STEPS_PER_MOVE`] steps
    StepsOutOfRange {
        /// Index of the phase
        phase: usize,
        /// Index of the move inside the phase
        index: usize,
    },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Empty => write!(f, "program has no phases"),
            ProgramError::EmptyPhase { phase } => write!(f, "phase {} has no moves", phase),
            ProgramError::StepsOutOfRange { phase, index } => write!(
                f,
                "move {} of phase {} exceeds {} steps",
                index, phase, MAX_STEPS_PER_MOVE
            ),
        }
    }
}

impl Program {
    /// Create a program
    pub const fn new(phases: &'static [Phase]) -> Self {
        Self { phases }
    }

    /// Number of phases
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Look up a phase by index
    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Total number of moves across all phases
    pub fn move_count(&self) -> usize {
        self.phases.iter().map(|p| p.moves.len()).sum()
    }

    /// Total ticks across all phases
    pub fn total_ticks(&self) -> u64 {
        self.phases.iter().map(Phase::total_ticks).sum()
    }

    /// Check the program before running it
    ///
    /// Zero-length moves are accepted; they wake and sleep the chopper but
    /// issue no pulses and leave the direction line unchanged.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.phases.is_empty() {
            return Err(ProgramError::Empty);
        }

        for (phase_idx, phase) in self.phases.iter().enumerate() {
            if phase.moves.is_empty() {
                return Err(ProgramError::EmptyPhase { phase: phase_idx });
            }
            if let Some(index) = phase
                .moves
                .iter()
                .position(|m| m.steps.unsigned_abs() > MAX_STEPS_PER_MOVE)
            {
                return Err(ProgramError::StepsOutOfRange {
                    phase: phase_idx,
                    index,
                });
            }
        }

        Ok(())
    }
}
