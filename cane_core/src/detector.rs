//! Fall detection: magnitude-delta trigger and the confirm/cancel machine.
//!
//! The detector owns the previous-magnitude baseline (the only state that
//! persists across cycles) and runs the detect -> confirm -> cancel state
//! machine. The cancel window deliberately blocks the rest of the polling
//! cycle; only the cancel button is serviced while it is open.

use cane_traits::{Accelerometer, Button, Clock, Haptic};

use crate::config::DetectorCfg;
use crate::motion::{AccelSample, MotionSampler};
use crate::util::{double_pulse, pulse};

/// Detector states. `Suspected` is transient within a single poll; the
/// field reflects where the most recent poll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallState {
    Idle,
    Suspected,
    Confirmed,
    Canceled,
}

/// Outcome of one detection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallPoll {
    /// No trigger, or a sensor glitch skipped the cycle.
    Quiet,
    /// Window elapsed with no cancellation; dispatch exactly one alert.
    Confirmed,
    /// User pressed cancel inside the window; no alert.
    Canceled,
}

pub struct FallDetector {
    cfg: DetectorCfg,
    /// Magnitude of the most recently processed sample; never stale by
    /// more than one cycle.
    prev_magnitude: f32,
    state: FallState,
}

impl FallDetector {
    pub fn new(cfg: DetectorCfg) -> Self {
        Self {
            cfg,
            prev_magnitude: 0.0,
            state: FallState::Idle,
        }
    }

    /// The comparison baseline: magnitude of the previous sample.
    pub fn prev_magnitude(&self) -> f32 {
        self.prev_magnitude
    }

    /// State at the end of the most recent poll.
    pub fn state(&self) -> FallState {
        self.state
    }

    /// Feed one sample through the delta signal; returns whether the
    /// trigger threshold was crossed.
    ///
    /// The baseline updates unconditionally on every processed sample,
    /// trigger or not: the comparison is always against the immediately
    /// preceding sample, never a rolling average.
    pub fn observe(&mut self, sample: &AccelSample) -> bool {
        let magnitude = sample.magnitude();
        let delta = (magnitude - self.prev_magnitude).abs();
        self.prev_magnitude = magnitude;
        tracing::trace!(magnitude, delta, "fall signal");
        delta > self.cfg.delta_threshold_g
    }

    /// One full detection cycle: sample, delta check, and on a trigger the
    /// acknowledgment pulse plus the blocking cancel window.
    ///
    /// A sensor read failure is logged and yields `Quiet` with the state
    /// and baseline untouched for that cycle.
    pub fn poll<A, H, B, C>(
        &mut self,
        sampler: &mut MotionSampler<A>,
        haptic: &mut H,
        cancel: &mut B,
        clock: &C,
    ) -> FallPoll
    where
        A: Accelerometer,
        H: Haptic + ?Sized,
        B: Button + ?Sized,
        C: Clock + ?Sized,
    {
        self.state = FallState::Idle;
        let sample = match sampler.sample() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "accelerometer read failed; no transition this cycle");
                return FallPoll::Quiet;
            }
        };
        if !self.observe(&sample) {
            return FallPoll::Quiet;
        }

        self.state = FallState::Suspected;
        tracing::info!("fall suspected; opening cancel window");
        // "Fall noticed" acknowledgment, then the cancel window.
        pulse(haptic, clock, self.cfg.ack_pulse_ms);
        self.confirm_window(haptic, cancel, clock)
    }

    /// Poll the cancel button in fixed sub-intervals until the window
    /// elapses or the user cancels.
    fn confirm_window<H, B, C>(&mut self, haptic: &mut H, cancel: &mut B, clock: &C) -> FallPoll
    where
        H: Haptic + ?Sized,
        B: Button + ?Sized,
        C: Clock + ?Sized,
    {
        let steps = self.cfg.cancel_window_ms / self.cfg.cancel_poll_ms.max(1);
        for _ in 0..steps {
            match cancel.is_pressed() {
                Ok(true) => {
                    tracing::info!("alert canceled by user");
                    double_pulse(haptic, clock, self.cfg.cancel_ack_pulse_ms);
                    self.state = FallState::Canceled;
                    return FallPoll::Canceled;
                }
                Ok(false) => {}
                // An unreadable button cannot cancel; keep waiting.
                Err(e) => tracing::warn!(error = %e, "cancel button read failed"),
            }
            clock.sleep_ms(self.cfg.cancel_poll_ms);
        }
        self.state = FallState::Confirmed;
        tracing::warn!("fall confirmed; no cancellation within window");
        FallPoll::Confirmed
    }
}
