//! RP2040-specific HAL for the chopper firmware
//!
//! Implements the `twist-hal` traits on top of `embassy-rp`:
//!
//! - GPIO output lines
//! - PWM-slice based periodic tick timer (wrap interrupt)

#![no_std]

pub mod gpio;
pub mod timer;

// Re-export shared traits from twist-hal for convenience
pub use twist_hal::{OutputPin, TickTimer};
