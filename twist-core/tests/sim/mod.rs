//! Simulated bench for host tests
//!
//! Every line, the tick timer and the delay provider record into one shared
//! [`Bench`]. The bench's [`SimSpin`] stands in for the passage of time
//! inside busy-waits: each spin fires one tick while the timer is armed,
//! and delivers a queued proceed edge while it is disarmed.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use twist_core::chopper::{ChopperBank, Device};
use twist_core::choreographer::Choreographer;
use twist_core::config::{Program, ProgramError, TimingConfig};
use twist_core::generator::{StepCounter, StepPulseGenerator};
use twist_core::handshake::{Handshake, ProceedFlag};
use twist_core::sequencer::MotionSequencer;
use twist_hal::{OutputPin, SpinWait, TickTimer};

/// Output lines on the bench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Sleep(Device),
    Dir,
    Step,
    Done,
}

impl Line {
    const COUNT: usize = Device::COUNT + 3;

    fn index(self) -> usize {
        match self {
            Line::Sleep(device) => device.index(),
            Line::Dir => Device::COUNT,
            Line::Step => Device::COUNT + 1,
            Line::Done => Device::COUNT + 2,
        }
    }
}

/// Recorded bench activity, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    High(Line),
    Low(Line),
    Armed,
    Disarmed,
    Delay { ms: u32 },
    Edge,
}

#[derive(Debug, Default)]
pub struct Bench {
    pub trace: Vec<Trace>,
    levels: [bool; Line::COUNT],
    pub armed: bool,
    pub period: Option<u32>,
    /// Step line toggles since power-on
    pub step_toggles: u32,
    /// Step line toggles counted per armed interval
    pub toggles_per_move: Vec<u32>,
    toggles_at_arm: u32,
    pub spins: u64,
    pub spin_budget: Option<u64>,
    pub queued_edges: u32,
    pub elapsed_ns: u64,
}

pub type Shared = Rc<RefCell<Bench>>;

impl Bench {
    pub fn shared() -> Shared {
        Rc::new(RefCell::new(Bench::default()))
    }

    pub fn level(&self, line: Line) -> bool {
        self.levels[line.index()]
    }

    /// Number of times `event` was recorded
    pub fn count(&self, event: Trace) -> usize {
        self.trace.iter().filter(|t| **t == event).count()
    }

    /// Position of the first `event` at or after `from`
    pub fn position_from(&self, from: usize, event: Trace) -> Option<usize> {
        self.trace[from..]
            .iter()
            .position(|t| *t == event)
            .map(|i| i + from)
    }

    /// Allow `extra` more spins before the bench panics
    pub fn limit_spins(&mut self, extra: u64) {
        self.spin_budget = Some(self.spins + extra);
    }

    fn drive(&mut self, line: Line, high: bool) {
        self.levels[line.index()] = high;
        self.trace.push(if high {
            Trace::High(line)
        } else {
            Trace::Low(line)
        });
    }
}

pub struct SimPin {
    line: Line,
    bench: Shared,
}

impl SimPin {
    pub fn new(bench: &Shared, line: Line) -> Self {
        Self {
            line,
            bench: bench.clone(),
        }
    }
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        self.bench.borrow_mut().drive(self.line, true);
    }

    fn set_low(&mut self) {
        self.bench.borrow_mut().drive(self.line, false);
    }

    fn toggle(&mut self) {
        let mut bench = self.bench.borrow_mut();
        let index = self.line.index();
        bench.levels[index] = !bench.levels[index];
        if self.line == Line::Step {
            bench.step_toggles += 1;
        }
    }

    fn is_set_high(&self) -> bool {
        self.bench.borrow().level(self.line)
    }
}

pub struct SimTimer {
    bench: Shared,
}

impl SimTimer {
    pub fn new(bench: &Shared) -> Self {
        Self {
            bench: bench.clone(),
        }
    }
}

impl TickTimer for SimTimer {
    fn configure(&mut self, compare_period: u32) {
        self.bench.borrow_mut().period = Some(compare_period);
    }

    fn enable_interrupt(&mut self) {
        let mut bench = self.bench.borrow_mut();
        bench.armed = true;
        bench.toggles_at_arm = bench.step_toggles;
        bench.trace.push(Trace::Armed);
    }

    fn disable_interrupt(&mut self) {
        let mut bench = self.bench.borrow_mut();
        if bench.armed {
            let toggles = bench.step_toggles - bench.toggles_at_arm;
            bench.toggles_per_move.push(toggles);
        }
        bench.armed = false;
        bench.trace.push(Trace::Disarmed);
    }

    fn interrupt_enabled(&self) -> bool {
        self.bench.borrow().armed
    }
}

pub struct SimDelay {
    bench: Shared,
}

impl SimDelay {
    pub fn new(bench: &Shared) -> Self {
        Self {
            bench: bench.clone(),
        }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bench.borrow_mut().elapsed_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut bench = self.bench.borrow_mut();
        bench.elapsed_ns += ms as u64 * 1_000_000;
        bench.trace.push(Trace::Delay { ms });
    }
}

/// Busy-wait body that plays the part of both interrupts
pub struct SimSpin<'a> {
    bench: Shared,
    counter: &'a StepCounter,
    flag: &'a ProceedFlag,
    step: SimPin,
    delay: SimDelay,
    debounce_ms: u32,
}

impl<'a> SimSpin<'a> {
    pub fn new(
        bench: &Shared,
        counter: &'a StepCounter,
        flag: &'a ProceedFlag,
        timing: &TimingConfig,
    ) -> Self {
        Self {
            bench: bench.clone(),
            counter,
            flag,
            step: SimPin::new(bench, Line::Step),
            delay: SimDelay::new(bench),
            debounce_ms: timing.debounce_ms,
        }
    }
}

impl SpinWait for SimSpin<'_> {
    fn spin(&mut self) {
        let (tick, edge) = {
            let mut bench = self.bench.borrow_mut();
            bench.spins += 1;
            if let Some(budget) = bench.spin_budget {
                if bench.spins > budget {
                    drop(bench);
                    panic!("spin budget exhausted");
                }
            }
            let edge = !bench.armed && bench.queued_edges > 0;
            if edge {
                bench.queued_edges -= 1;
                bench.trace.push(Trace::Edge);
            }
            (bench.armed, edge)
        };

        if tick {
            self.counter.on_tick(&mut self.step);
        }
        if edge {
            self.flag.on_edge(&mut self.delay, self.debounce_ms);
        }
    }
}

pub type SimSequencer<'a> = MotionSequencer<'a, SimPin, SimTimer, SimDelay, SimSpin<'a>>;
pub type SimHandshake<'a> = Handshake<'a, SimPin, SimDelay, SimSpin<'a>>;
pub type SimChoreographer<'a> = Choreographer<'a, SimPin, SimTimer, SimDelay, SimSpin<'a>>;

pub fn sequencer<'a>(
    bench: &Shared,
    counter: &'a StepCounter,
    flag: &'a ProceedFlag,
    timing: &TimingConfig,
) -> SimSequencer<'a> {
    let choppers = ChopperBank::new(
        Device::ALL.map(|d| SimPin::new(bench, Line::Sleep(d))),
        SimPin::new(bench, Line::Dir),
    );
    let generator = StepPulseGenerator::new(counter, SimTimer::new(bench), timing);
    MotionSequencer::new(
        choppers,
        generator,
        SimDelay::new(bench),
        SimSpin::new(bench, counter, flag, timing),
        timing,
    )
}

pub fn handshake<'a>(
    bench: &Shared,
    counter: &'a StepCounter,
    flag: &'a ProceedFlag,
    timing: &TimingConfig,
) -> SimHandshake<'a> {
    Handshake::new(
        flag,
        SimPin::new(bench, Line::Done),
        SimDelay::new(bench),
        SimSpin::new(bench, counter, flag, timing),
        timing.done_pulse_ms,
    )
}

pub fn choreographer<'a>(
    bench: &Shared,
    counter: &'a StepCounter,
    flag: &'a ProceedFlag,
    program: &'a Program,
    timing: &TimingConfig,
) -> Result<SimChoreographer<'a>, ProgramError> {
    Choreographer::new(
        program,
        sequencer(bench, counter, flag, timing),
        handshake(bench, counter, flag, timing),
    )
}
