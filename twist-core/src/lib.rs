//! Board-agnostic core logic for the chopper firmware
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller:
//!
//! - Timing constants and the compiled-in choreography
//! - Step pulse generator (tick counter and arm/disarm)
//! - Handshake layer (proceed flag and "done" pulse)
//! - Chopper bank (sleep lines, direction line, microstep mode)
//! - Motion sequencer (one blocking move at a time)
//! - Top-level state machine and the choreographer that drives it
//!
//! Shared state ([`generator::StepCounter`], [`handshake::ProceedFlag`])
//! is designed to live in `static`s so interrupt handlers can reach it,
//! but it is only mutated through the operations defined here.

#![no_std]
#![deny(unsafe_code)]

pub mod chopper;
pub mod choreographer;
pub mod config;
pub mod generator;
pub mod handshake;
pub mod sequencer;
pub mod state;
