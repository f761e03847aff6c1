//! Motion sequencer
//!
//! Executes one [`Move`] to completion, blocking the caller:
//!
//! 1. Put every chopper to sleep, then wake the selected one
//! 2. Wait for it to leave sleep
//! 3. Set the direction line from the sign of the step count
//! 4. Arm the generator and spin until `2 * |steps|` ticks have elapsed
//! 5. Disarm and put every chopper to sleep again
//!
//! There is no timeout and no error path; a move that never completes
//! hangs here.

use embedded_hal::delay::DelayNs;
use twist_hal::{OutputPin, SpinWait, TickTimer};

use crate::chopper::{ChopperBank, Device, Direction};
use crate::config::{Move, TimingConfig};
use crate::generator::StepPulseGenerator;

/// Outcome of one executed move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveReport {
    /// Device that was woken
    pub device: Device,
    /// Direction driven, `None` if the line was left unchanged
    pub direction: Option<Direction>,
    /// Tick target (`2 * |steps|`)
    pub target: u32,
    /// Ticks counted when the generator was disarmed
    pub ticks: u32,
}

impl MoveReport {
    /// Ticks counted beyond the target
    pub fn overshoot(&self) -> u32 {
        self.ticks.saturating_sub(self.target)
    }
}

/// Drives the chopper bank and step generator one move at a time
pub struct MotionSequencer<'a, P, T, D, S>
where
    P: OutputPin,
    T: TickTimer,
    D: DelayNs,
    S: SpinWait,
{
    choppers: ChopperBank<P>,
    generator: StepPulseGenerator<'a, T>,
    delay: D,
    spin: S,
    settle_ms: u32,
}

impl<'a, P, T, D, S> MotionSequencer<'a, P, T, D, S>
where
    P: OutputPin,
    T: TickTimer,
    D: DelayNs,
    S: SpinWait,
{
    /// Create a sequencer
    pub fn new(
        choppers: ChopperBank<P>,
        generator: StepPulseGenerator<'a, T>,
        delay: D,
        spin: S,
        timing: &TimingConfig,
    ) -> Self {
        Self {
            choppers,
            generator,
            delay,
            spin,
            settle_ms: timing.settle_ms,
        }
    }

    /// Execute one move, blocking until its last tick
    pub fn execute_move(&mut self, mv: Move) -> MoveReport {
        self.choppers.sleep_all();
        self.choppers.wake(mv.device);
        self.delay.delay_ms(self.settle_ms);

        let direction = mv.direction();
        if let Some(dir) = direction {
            self.choppers.set_direction(dir);
        }

        let target = mv.tick_target();
        self.generator.arm();
        let generator = &self.generator;
        self.spin.spin_until(|| generator.reached(target));
        let ticks = self.generator.disarm();

        self.choppers.sleep_all();

        MoveReport {
            device: mv.device,
            direction,
            target,
            ticks,
        }
    }

    /// Chopper bank, for inspecting line state between moves
    pub fn choppers(&self) -> &ChopperBank<P> {
        &self.choppers
    }

    /// Step generator, for inspecting arm state between moves
    pub fn generator(&self) -> &StepPulseGenerator<'a, T> {
        &self.generator
    }
}
