//! Configuration
//!
//! Timing constants and the compiled-in program. There is no runtime
//! configuration: everything here is fixed at build time.

pub mod choreography;
pub mod program;
pub mod timing;

pub use choreography::CHOREOGRAPHY;
pub use program::{Move, Phase, Program, ProgramError, MAX_STEPS_PER_MOVE};
pub use timing::TimingConfig;
