//! Unit conversion and shared haptic helpers.

use cane_traits::{Clock, Haptic};

/// Speed of sound used for echo conversion, in centimeters per microsecond.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Convert an ultrasonic echo round-trip time to distance in centimeters.
/// Halved because the pulse travels to the target and back.
#[inline]
pub fn echo_to_cm(micros: u32) -> f32 {
    (micros as f32 * SPEED_OF_SOUND_CM_PER_US) / 2.0
}

/// Drive the haptic actuator high for `ms`, best-effort.
///
/// Actuator failures are logged and absorbed; a cane that cannot buzz
/// must still keep polling.
pub fn pulse<H, C>(haptic: &mut H, clock: &C, ms: u64)
where
    H: Haptic + ?Sized,
    C: Clock + ?Sized,
{
    if let Err(e) = haptic.set_high() {
        tracing::warn!(error = %e, "haptic set_high failed");
        return;
    }
    clock.sleep_ms(ms);
    if let Err(e) = haptic.set_low() {
        tracing::warn!(error = %e, "haptic set_low failed");
    }
}

/// Two pulses of `ms` each with a half-length gap, the cancellation
/// acknowledgment pattern.
pub fn double_pulse<H, C>(haptic: &mut H, clock: &C, ms: u64)
where
    H: Haptic + ?Sized,
    C: Clock + ?Sized,
{
    pulse(haptic, clock, ms);
    clock.sleep_ms(ms / 2);
    pulse(haptic, clock, ms);
}
