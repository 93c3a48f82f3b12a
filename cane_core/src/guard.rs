//! Distance guard: obstacle and pit ranging with haptic feedback.
//!
//! Two independent channels, purely reactive per cycle; no state carried
//! between cycles. Echo waits are bounded by the configured timeout so a
//! stuck sensor line skips its channel instead of stalling the loop.

use std::time::Duration;

use cane_traits::{Clock, Haptic, Ranger};

use crate::config::GuardCfg;
use crate::hw_error::map_hw_error;
use crate::util::{echo_to_cm, pulse};

/// Per-cycle readings and alert flags, for logs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceReport {
    pub obstacle_cm: Option<f32>,
    pub obstacle_alert: bool,
    pub pit_cm: Option<f32>,
    pub pit_alert: bool,
}

pub struct DistanceGuard<RA: Ranger, RB: Ranger> {
    obstacle: RA,
    pit: RB,
    cfg: GuardCfg,
    echo_timeout: Duration,
}

impl<RA: Ranger, RB: Ranger> DistanceGuard<RA, RB> {
    pub fn new(obstacle: RA, pit: RB, cfg: GuardCfg, echo_timeout: Duration) -> Self {
        Self {
            obstacle,
            pit,
            cfg,
            echo_timeout,
        }
    }

    /// Check both channels in order (obstacle, then pit) and pulse the
    /// haptic actuator for any reading strictly below its band.
    pub fn poll<H, C>(&mut self, haptic: &mut H, clock: &C) -> DistanceReport
    where
        H: Haptic + ?Sized,
        C: Clock + ?Sized,
    {
        let mut report = DistanceReport::default();

        match self.obstacle.echo_micros(self.echo_timeout) {
            Ok(us) => {
                let cm = echo_to_cm(us);
                report.obstacle_cm = Some(cm);
                if cm < self.cfg.obstacle_cm {
                    tracing::debug!(cm, "obstacle in range");
                    pulse(haptic, clock, self.cfg.obstacle_pulse_ms);
                    report.obstacle_alert = true;
                }
            }
            Err(e) => {
                tracing::warn!(error = %map_hw_error(&*e), channel = "obstacle", "ranging failed; skipping channel this cycle");
            }
        }

        match self.pit.echo_micros(self.echo_timeout) {
            Ok(us) => {
                let cm = echo_to_cm(us);
                report.pit_cm = Some(cm);
                if cm < self.cfg.pit_cm {
                    tracing::debug!(cm, "drop-off in range");
                    pulse(haptic, clock, self.cfg.pit_pulse_ms);
                    report.pit_alert = true;
                }
            }
            Err(e) => {
                tracing::warn!(error = %map_hw_error(&*e), channel = "pit", "ranging failed; skipping channel this cycle");
            }
        }

        report
    }
}
