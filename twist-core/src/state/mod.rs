//! Top-level state machine
//!
//! The firmware runs one linear sequence: wait for the master, run a
//! phase, report done, repeat, halt. The machine is explicit, finite and
//! has no transition out of `Halt`.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
