//! Runtime configuration types for the cane controller.
//!
//! These are the runtime structs consumed by the core components. They are
//! separate from the TOML-deserialized schema in `cane_config`; see
//! `conversions` for the mapping.

/// Distance guard thresholds and haptic pulse lengths.
#[derive(Debug, Clone)]
pub struct GuardCfg {
    /// Obstacle channel alert band: readings strictly below this trigger.
    pub obstacle_cm: f32,
    /// Haptic pulse length for an obstacle alert.
    pub obstacle_pulse_ms: u64,
    /// Pit (drop-off) channel alert band, strict `<` as well.
    pub pit_cm: f32,
    /// Haptic pulse length for a pit alert.
    pub pit_pulse_ms: u64,
}

impl Default for GuardCfg {
    fn default() -> Self {
        Self {
            obstacle_cm: 30.0,
            obstacle_pulse_ms: 200,
            pit_cm: 10.0,
            pit_pulse_ms: 500,
        }
    }
}

/// Fall detector trigger and cancel-window timing.
#[derive(Debug, Clone)]
pub struct DetectorCfg {
    /// Magnitude-delta trigger threshold in g.
    pub delta_threshold_g: f32,
    /// "Fall noticed" acknowledgment pulse on entering the suspected state.
    pub ack_pulse_ms: u64,
    /// Each pulse of the double-pulse cancellation acknowledgment.
    pub cancel_ack_pulse_ms: u64,
    /// Total cancel window after the acknowledgment pulse.
    pub cancel_window_ms: u64,
    /// Button polling sub-interval within the cancel window.
    pub cancel_poll_ms: u64,
}

impl Default for DetectorCfg {
    fn default() -> Self {
        Self {
            delta_threshold_g: 1.2,
            ack_pulse_ms: 1_000,
            cancel_ack_pulse_ms: 200,
            cancel_window_ms: 10_000,
            cancel_poll_ms: 100,
        }
    }
}

/// Main loop cadence.
#[derive(Debug, Clone)]
pub struct CadenceCfg {
    /// Fixed sleep between polling cycles.
    pub cycle_sleep_ms: u64,
    /// Pause after a manual (button-triggered) alert before resuming polling.
    pub post_alert_pause_ms: u64,
}

impl Default for CadenceCfg {
    fn default() -> Self {
        Self {
            cycle_sleep_ms: 100,
            post_alert_pause_ms: 2_000,
        }
    }
}

/// Bounded waits for everything that can stall the loop.
#[derive(Debug, Clone)]
pub struct Timeouts {
    /// Max wait for a ranging echo per channel per cycle (ms).
    pub echo_ms: u64,
    /// Max duration of a geolocation GET or SMS POST (ms).
    pub http_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            echo_ms: 30,
            http_ms: 5_000,
        }
    }
}
