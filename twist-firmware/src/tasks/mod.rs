//! Embassy async tasks
//!
//! Only the proceed edge handling is a task; the choreography itself runs
//! blocking in `main`.

pub mod proceed;

pub use proceed::{proceed_task, PROCEED};
