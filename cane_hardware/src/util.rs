use std::time::{Duration, Instant};

use crate::error::{HwError, Result};

/// Inverse of the core's echo conversion, used by the simulated ranger:
/// distance in centimeters to a round-trip echo time in microseconds.
pub fn cm_to_echo_micros(cm: f32) -> u32 {
    ((cm * 2.0) / 0.0343).round() as u32
}

/// Poll `read_level` until it returns `target` or the timeout expires.
/// Sleeps in small intervals to avoid CPU spinning.
pub fn wait_for_level(
    mut read_level: impl FnMut() -> bool,
    target: bool,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;
    while read_level() != target {
        if Instant::now() >= deadline {
            return Err(HwError::EchoTimeout);
        }
        if !poll_interval.is_zero() {
            std::thread::sleep(poll_interval);
        }
    }
    Ok(())
}
