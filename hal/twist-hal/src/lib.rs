//! Twist Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the chopper logic is written
//! against. Chip-specific crates implement them for real silicon, and the
//! core crate's test bench implements them in simulation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (twist-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twist-core (generator, sequencer, ...) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twist-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  twist-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output lines (sleep, direction, step, done)
//! - [`timer::TickTimer`] - Periodic tick interrupt source
//! - [`spin::SpinWait`] - Body of a busy-wait loop
//!
//! Blocking delays use `embedded_hal::delay::DelayNs` directly.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spin;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spin::{BusySpin, SpinWait};
pub use timer::TickTimer;
