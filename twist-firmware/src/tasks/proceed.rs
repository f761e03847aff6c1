//! Master proceed edge task
//!
//! Runs on the high-priority interrupt executor so it preempts the main
//! sequence, which never yields. Each rising edge on the proceed line is
//! debounced (blocking, like an edge interrupt would) and raises the
//! shared proceed flag. The tick interrupt has higher priority still and
//! keeps stepping through the debounce.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Delay;
use twist_core::handshake::ProceedFlag;

/// Set by this task, consumed by the main sequence
pub static PROCEED: ProceedFlag = ProceedFlag::new();

/// Proceed edge task
#[embassy_executor::task]
pub async fn proceed_task(mut line: Input<'static>, debounce_ms: u32) {
    info!("Proceed task started");

    let mut delay = Delay;

    loop {
        line.wait_for_rising_edge().await;
        PROCEED.on_edge(&mut delay, debounce_ms);
    }
}
