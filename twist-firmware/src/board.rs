//! Board pin map
//!
//! ```text
//! GPIO2  M0      (all choppers)     GPIO7  nSLP  Etch-a-Sketch left
//! GPIO3  M1      (all choppers)     GPIO8  nSLP  Etch-a-Sketch right
//! GPIO4  M2      (all choppers)     GPIO9  nSLP  Rubik's Cube
//! GPIO5  DIR     (all choppers)     GPIO10 master proceed in (pull-down)
//! GPIO6  STEP    (all choppers)     GPIO11 done out to master
//! ```
//!
//! PWM slice 0 runs free as the tick timer; its pins stay GPIO.

use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::PWM_SLICE0;
use embassy_rp::{Peri, Peripherals};
use twist_core::chopper::Device;
use twist_hal_rp2040::gpio::GpioOutput;

/// PWM slice used for the tick; must match [`Board::tick_slice`]
pub const TICK_SLICE: usize = 0;

/// Every peripheral the firmware uses, configured
pub struct Board {
    /// Microstep mode-select lines M0, M1, M2
    pub mode: [GpioOutput<'static>; 3],
    /// Shared direction line
    pub dir: GpioOutput<'static>,
    /// Shared step line, toggled from the tick interrupt
    pub step: GpioOutput<'static>,
    /// Sleep lines in [`Device::index`] order
    pub sleep: [GpioOutput<'static>; Device::COUNT],
    /// Proceed input from the master
    pub proceed: Input<'static>,
    /// Done output to the master
    pub done: GpioOutput<'static>,
    /// PWM slice for the tick timer
    pub tick_slice: Peri<'static, PWM_SLICE0>,
}

impl Board {
    /// Claim and configure the pins; every output starts low
    pub fn new(p: Peripherals) -> Self {
        Self {
            mode: [
                GpioOutput::new(p.PIN_2, false),
                GpioOutput::new(p.PIN_3, false),
                GpioOutput::new(p.PIN_4, false),
            ],
            dir: GpioOutput::new(p.PIN_5, false),
            step: GpioOutput::new(p.PIN_6, false),
            sleep: [
                GpioOutput::new(p.PIN_7, false),
                GpioOutput::new(p.PIN_8, false),
                GpioOutput::new(p.PIN_9, false),
            ],
            proceed: Input::new(p.PIN_10, Pull::Down),
            done: GpioOutput::new(p.PIN_11, false),
            tick_slice: p.PWM_SLICE0,
        }
    }
}
