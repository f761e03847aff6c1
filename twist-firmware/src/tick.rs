//! Step tick interrupt
//!
//! The PWM wrap interrupt is the step generator's tick. Its handler
//! acknowledges the wrap, counts one tick and toggles the step line, and
//! does nothing else. The step line lives behind a critical-section mutex
//! because the handler and `main` both need to reach it (once, at boot).

use core::cell::RefCell;

use embassy_rp::interrupt;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use twist_core::generator::StepCounter;
use twist_hal_rp2040::gpio::GpioOutput;
use twist_hal_rp2040::timer::acknowledge_wrap;

use crate::board::TICK_SLICE;

/// Ticks in the current move
pub static STEP_COUNTER: StepCounter = StepCounter::new();

/// Step line, installed once at boot
static STEP_LINE: Mutex<CriticalSectionRawMutex, RefCell<Option<GpioOutput<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Hand the step line to the tick interrupt
///
/// Must be called before the first move is armed. Until then the handler
/// only acknowledges the wrap: nothing is counted, so an armed move would
/// never reach its target.
pub fn install_step_line(line: GpioOutput<'static>) {
    STEP_LINE.lock(|cell| {
        cell.replace(Some(line));
    });
}

#[interrupt]
fn PWM_IRQ_WRAP() {
    acknowledge_wrap(TICK_SLICE);
    STEP_LINE.lock(|cell| {
        if let Some(line) = cell.borrow_mut().as_mut() {
            STEP_COUNTER.on_tick(line);
        }
    });
}
