//! Mapping from the TOML-deserialized schema (`cane_config`) to the
//! runtime config structs consumed by the core.

use crate::config::{CadenceCfg, DetectorCfg, GuardCfg, Timeouts};

impl From<&cane_config::Guard> for GuardCfg {
    fn from(g: &cane_config::Guard) -> Self {
        Self {
            obstacle_cm: g.obstacle_cm,
            obstacle_pulse_ms: g.obstacle_pulse_ms,
            pit_cm: g.pit_cm,
            pit_pulse_ms: g.pit_pulse_ms,
        }
    }
}

impl From<&cane_config::Detector> for DetectorCfg {
    fn from(d: &cane_config::Detector) -> Self {
        Self {
            delta_threshold_g: d.delta_threshold_g,
            ack_pulse_ms: d.ack_pulse_ms,
            cancel_ack_pulse_ms: d.cancel_ack_pulse_ms,
            cancel_window_ms: d.cancel_window_ms,
            cancel_poll_ms: d.cancel_poll_ms,
        }
    }
}

impl From<&cane_config::Cadence> for CadenceCfg {
    fn from(c: &cane_config::Cadence) -> Self {
        Self {
            cycle_sleep_ms: c.cycle_sleep_ms,
            post_alert_pause_ms: c.post_alert_pause_ms,
        }
    }
}

impl From<&cane_config::Timeouts> for Timeouts {
    fn from(t: &cane_config::Timeouts) -> Self {
        Self {
            echo_ms: t.echo_ms,
            http_ms: t.http_ms,
        }
    }
}
