//! Twist - Stepper Chopper Firmware
//!
//! Turns the Etch-a-Sketch knobs and the Rubik's Cube turner through a
//! compiled-in choreography, one phase per handshake with the master
//! controller.
//!
//! # Execution model
//!
//! - `main` runs in thread mode and never yields: it spins on the proceed
//!   flag, then spins on the step counter move by move.
//! - `PWM_IRQ_WRAP` (priority P1) is the step tick.
//! - The proceed edge task runs on an interrupt executor (`SWI_IRQ_1`,
//!   priority P2) and raises the proceed flag.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use twist_core::chopper::{apply_microstep, ChopperBank};
use twist_core::choreographer::{Choreographer, Step};
use twist_core::config::{Program, TimingConfig, CHOREOGRAPHY};
use twist_core::generator::StepPulseGenerator;
use twist_core::handshake::Handshake;
use twist_core::sequencer::MotionSequencer;
use twist_hal::BusySpin;
use twist_hal_rp2040::timer::{pwm_wrap_settings, PwmTickTimer};

use crate::board::{Board, TICK_SLICE};

mod board;
mod tasks;
mod tick;

/// Executor for the proceed edge task
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Twist firmware starting...");

    let board = Board::new(embassy_rp::init(Default::default()));
    let timing = TimingConfig::DEFAULT;
    info!("Peripherals initialized");

    // Mode-select lines are driven once and never touched again
    let _mode_lines = apply_microstep(timing.microstep, board.mode);
    info!(
        "Microstepping 1/{}, tick {} Hz ({} steps/s), compare period {} cycles",
        timing.microstep.divisor(),
        timing.tick_hz,
        timing.step_hz(),
        timing.compare_period()
    );

    // Tick interrupt above the edge task so steps keep flowing during debounce
    interrupt::PWM_IRQ_WRAP.set_priority(Priority::P1);
    tick::install_step_line(board.step);
    let timer = PwmTickTimer::<TICK_SLICE>::new(board.tick_slice);
    let generator = StepPulseGenerator::new(&tick::STEP_COUNTER, timer, &timing);
    info!(
        "Tick timer configured, disarmed: {}",
        pwm_wrap_settings(generator.compare_period())
    );

    let choppers = ChopperBank::new(board.sleep, board.dir);
    let sequencer = MotionSequencer::new(choppers, generator, Delay, BusySpin, &timing);
    let handshake = Handshake::new(
        &tasks::PROCEED,
        board.done,
        Delay,
        BusySpin,
        timing.done_pulse_ms,
    );

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner.spawn(unwrap!(tasks::proceed_task(board.proceed, timing.debounce_ms)));

    let mut choreographer = match Choreographer::new(&CHOREOGRAPHY, sequencer, handshake) {
        Ok(choreographer) => choreographer,
        Err(e) => {
            error!("Choreography rejected: {}", e);
            park();
        }
    };
    info!(
        "Choreography loaded: {} phases, {} moves, {} ticks",
        CHOREOGRAPHY.phase_count(),
        CHOREOGRAPHY.move_count(),
        CHOREOGRAPHY.total_ticks()
    );
    for phase in CHOREOGRAPHY.phases {
        let ms: u32 = phase
            .moves
            .iter()
            .map(|m| timing.settle_ms + timing.move_duration_ms(m.steps.unsigned_abs()))
            .sum();
        info!("  {}: {} moves, ~{} ms", phase.name, phase.moves.len(), ms);
    }

    loop {
        match choreographer.step() {
            Step::Booted => info!("Waiting for master"),
            Step::Released { phase } => {
                info!("Phase {} ({}) released", phase, phase_name(&CHOREOGRAPHY, phase))
            }
            Step::Moved {
                phase,
                index,
                report,
            } => {
                debug!(
                    "Move {}.{}: {} {} ticks (target {})",
                    phase, index, report.device, report.ticks, report.target
                );
                if report.overshoot() > 1 {
                    warn!("Move {}.{} overshot by {} ticks", phase, index, report.overshoot());
                }
            }
            Step::PhaseFinished { phase } => info!("Phase {} moves finished", phase),
            Step::Signalled { phase } => info!("Phase {} done pulse sent", phase),
            Step::Halted => break,
        }
    }

    info!("Choreography complete, halting");
    park()
}

fn phase_name(program: &Program, phase: usize) -> &'static str {
    program.phase(phase).map(|p| p.name).unwrap_or("?")
}

/// Terminal state: nothing further happens
fn park() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
