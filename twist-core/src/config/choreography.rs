//! The compiled-in choreography
//!
//! Phase one draws "IEEE" on the Etch-a-Sketch by alternating the two
//! knobs; phase two gives the Rubik's Cube one turn. Knob step counts are
//! written in the units they were measured in and scaled by
//! [`KNOB_STEP_SCALE`] at compile time.

use super::program::{Move, Phase, Program};
use crate::chopper::Device::{self, Cube, EtchLeft as L, EtchRight as R};

/// Multiplier applied to every measured knob step count
pub const KNOB_STEP_SCALE: i32 = 10;

/// Step count for one cube turn
pub const CUBE_TURN_STEPS: i32 = 6400;

/// Knob move with its measured step count scaled
const fn knob(device: Device, steps: i32) -> Move {
    Move::new(device, steps * KNOB_STEP_SCALE)
}

/// Etch-a-Sketch strokes, in drawing order
#[rustfmt::skip]
pub static DRAW_MOVES: [Move; 49] = [
    // I
    knob(R, -334), knob(L, -323), knob(R, -762), knob(L, 323),
    knob(R, -217), knob(L, -762), knob(R, 334), knob(L, 323),
    knob(R, 821), knob(L, -264), knob(R, 206), knob(L, -235),
    // E
    knob(R, -1377), knob(L, -586), knob(R, 334), knob(L, 440),
    knob(R, 235), knob(L, -323), knob(R, 235), knob(L, 323),
    knob(R, 235), knob(L, -440), knob(R, 323), knob(L, -235),
    // E
    knob(R, -1377), knob(L, -586), knob(R, 334), knob(L, 440),
    knob(R, 235), knob(L, -323), knob(R, 235), knob(L, 323),
    knob(R, 235), knob(L, -440), knob(R, 323), knob(L, -235),
    // E, then carry the stylus off the last stroke
    knob(R, -1377), knob(L, -586), knob(R, 334), knob(L, 440),
    knob(R, 235), knob(L, -323), knob(R, 235), knob(L, 323),
    knob(R, 235), knob(L, -440), knob(R, 323), knob(L, 1597),
    knob(L, 1597),
];

/// One cube turn
pub static CUBE_MOVES: [Move; 1] = [Move::new(Cube, CUBE_TURN_STEPS)];

/// Phases in handshake order
pub static PHASES: [Phase; 2] = [
    Phase::new("etch", &DRAW_MOVES),
    Phase::new("cube", &CUBE_MOVES),
];

/// The program the firmware runs
pub static CHOREOGRAPHY: Program = Program::new(&PHASES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choreography_is_valid() {
        assert_eq!(CHOREOGRAPHY.validate(), Ok(()));
        assert_eq!(CHOREOGRAPHY.phase_count(), 2);
        assert_eq!(CHOREOGRAPHY.move_count(), 50);
    }

    #[test]
    fn test_etch_phase_uses_only_knobs() {
        assert!(DRAW_MOVES.iter().all(|m| m.device != Cube));
        assert_eq!(DRAW_MOVES[0], Move::new(R, -3340));
        assert_eq!(DRAW_MOVES[48], Move::new(L, 15970));
    }

    #[test]
    fn test_cube_phase() {
        assert_eq!(CUBE_MOVES[0].tick_target(), 12_800);
        assert_eq!(PHASES[1].total_ticks(), 12_800);

        // 6400 steps at 34 632 steps/s
        let timing = crate::config::TimingConfig::DEFAULT;
        assert_eq!(timing.move_duration_ms(CUBE_TURN_STEPS as u32), 184);
    }

    #[test]
    fn test_strokes_alternate_knobs() {
        // Every stroke but the final carry-off switches knob
        for pair in DRAW_MOVES[..48].windows(2) {
            assert_ne!(pair[0].device, pair[1].device);
        }
    }
}
