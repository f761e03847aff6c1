//! Chopper bank
//!
//! Three stepper chopper drivers share one step line, one direction line
//! and three microstep mode-select lines. Each has its own active-low
//! sleep input; driving that line high wakes the chopper. Only an awake
//! chopper responds to step pulses, which is how a single step line
//! drives exactly one device at a time.

use twist_hal::OutputPin;

/// Physical device driven by a chopper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Device {
    /// Etch-a-Sketch left (horizontal) knob
    EtchLeft,
    /// Etch-a-Sketch right (vertical) knob
    EtchRight,
    /// Rubik's Cube turner
    Cube,
}

impl Device {
    /// Number of devices
    pub const COUNT: usize = 3;

    /// Every device, in sleep-line order
    pub const ALL: [Device; Device::COUNT] = [Device::EtchLeft, Device::EtchRight, Device::Cube];

    /// Index of this device's sleep line
    pub const fn index(self) -> usize {
        match self {
            Device::EtchLeft => 0,
            Device::EtchRight => 1,
            Device::Cube => 2,
        }
    }
}

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise rotation (direction line low)
    Clockwise,
    /// Counter-clockwise rotation (direction line high)
    CounterClockwise,
}

impl Direction {
    /// Direction selected by the sign of a step count
    ///
    /// Positive counts turn counter-clockwise, negative counts clockwise.
    /// Zero selects nothing and the direction line is left as it was.
    pub const fn from_steps(steps: i32) -> Option<Self> {
        if steps > 0 {
            Some(Direction::CounterClockwise)
        } else if steps < 0 {
            Some(Direction::Clockwise)
        } else {
            None
        }
    }

    /// Level of the direction line for this direction
    pub const fn line_level(self) -> bool {
        matches!(self, Direction::CounterClockwise)
    }
}

/// Sleep and direction lines for every chopper
pub struct ChopperBank<P: OutputPin> {
    /// Sleep lines indexed by [`Device::index`], high = awake
    sleep: [P; Device::COUNT],
    /// Shared direction line
    dir: P,
}

impl<P: OutputPin> ChopperBank<P> {
    /// Take ownership of the lines and put every chopper to sleep
    pub fn new(sleep: [P; Device::COUNT], dir: P) -> Self {
        let mut bank = Self { sleep, dir };
        bank.sleep_all();
        bank
    }

    /// Wake one chopper
    ///
    /// Does not touch the other sleep lines; callers that need mutual
    /// exclusion call [`Self::sleep_all`] first.
    pub fn wake(&mut self, device: Device) {
        self.sleep[device.index()].set_high();
    }

    /// Put every chopper to sleep
    pub fn sleep_all(&mut self) {
        for line in self.sleep.iter_mut() {
            line.set_low();
        }
    }

    /// Check whether a chopper is awake
    pub fn is_awake(&self, device: Device) -> bool {
        self.sleep[device.index()].is_set_high()
    }

    /// Check that no chopper is awake
    pub fn all_asleep(&self) -> bool {
        Device::ALL.iter().all(|d| !self.is_awake(*d))
    }

    /// Drive the shared direction line
    pub fn set_direction(&mut self, dir: Direction) {
        self.dir.set_state(dir.line_level());
    }

    /// Current level of the direction line
    pub fn direction(&self) -> Direction {
        if self.dir.is_set_high() {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

/// Microstep resolution
///
/// Encoded on the M0/M1/M2 mode-select lines shared by all choppers
/// (DRV8825 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MicrostepMode {
    Full,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    #[default]
    ThirtySecond,
}

impl MicrostepMode {
    /// Levels for the M0, M1 and M2 lines
    pub const fn levels(self) -> [bool; 3] {
        match self {
            MicrostepMode::Full => [false, false, false],
            MicrostepMode::Half => [true, false, false],
            MicrostepMode::Quarter => [false, true, false],
            MicrostepMode::Eighth => [true, true, false],
            MicrostepMode::Sixteenth => [false, false, true],
            // 101, 110 and 111 all select 1/32
            MicrostepMode::ThirtySecond => [true, true, true],
        }
    }

    /// Microsteps per full step
    pub const fn divisor(self) -> u16 {
        match self {
            MicrostepMode::Full => 1,
            MicrostepMode::Half => 2,
            MicrostepMode::Quarter => 4,
            MicrostepMode::Eighth => 8,
            MicrostepMode::Sixteenth => 16,
            MicrostepMode::ThirtySecond => 32,
        }
    }
}

/// Drive the mode-select lines once at boot
///
/// The lines are never changed at runtime, so they are consumed here and
/// returned only for the caller to keep alive.
pub fn apply_microstep<P: OutputPin>(mode: MicrostepMode, mut lines: [P; 3]) -> [P; 3] {
    for (line, level) in lines.iter_mut().zip(mode.levels()) {
        line.set_state(level);
    }
    lines
}
