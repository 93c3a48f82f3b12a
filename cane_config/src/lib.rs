#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the cane controller.
//!
//! `Config` and sub-structs are deserialized from TOML and validated.
//! Every section has defaults matching the device constants, so an empty
//! file (or no file at all) yields a runnable simulation configuration.
use serde::Deserialize;

/// GPIO pin assignments; only required when building with real hardware.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Pins {
    pub trig_obstacle: u8,
    pub echo_obstacle: u8,
    pub trig_pit: u8,
    pub echo_pit: u8,
    pub haptic: u8,
    pub button: u8,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Guard {
    /// Obstacle channel alert threshold (strict `<`), centimeters.
    pub obstacle_cm: f32,
    pub obstacle_pulse_ms: u64,
    /// Pit/drop-off channel alert threshold (strict `<`), centimeters.
    pub pit_cm: f32,
    pub pit_pulse_ms: u64,
}

impl Default for Guard {
    fn default() -> Self {
        Self {
            obstacle_cm: 30.0,
            obstacle_pulse_ms: 200,
            pit_cm: 10.0,
            pit_pulse_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Detector {
    /// Magnitude-delta trigger threshold in g. Tunable here, fixed at runtime.
    pub delta_threshold_g: f32,
    pub ack_pulse_ms: u64,
    pub cancel_ack_pulse_ms: u64,
    /// Cancel window opened after the acknowledgment pulse.
    pub cancel_window_ms: u64,
    /// Button polling sub-interval inside the window.
    pub cancel_poll_ms: u64,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            delta_threshold_g: 1.2,
            ack_pulse_ms: 1000,
            cancel_ack_pulse_ms: 200,
            cancel_window_ms: 10_000,
            cancel_poll_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Cadence {
    pub cycle_sleep_ms: u64,
    pub post_alert_pause_ms: u64,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            cycle_sleep_ms: 100,
            post_alert_pause_ms: 2000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Timeouts {
    /// Max wait for a ranging echo per channel (ms).
    pub echo_ms: u64,
    /// Max duration of a geolocation GET or SMS POST (ms).
    pub http_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            echo_ms: 30,
            http_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ButtonCfg {
    /// Treat low level as pressed when true.
    pub active_low: bool,
}

impl Default for ButtonCfg {
    fn default() -> Self {
        Self { active_low: true }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Geo {
    /// Geolocation endpoint returning a JSON object with numeric lat/lon.
    pub url: String,
}

impl Default for Geo {
    fn default() -> Self {
        Self {
            url: "http://ip-api.com/json".to_string(),
        }
    }
}

/// SMS gateway credentials; alerts are simulated (logged) when absent.
#[derive(Debug, Deserialize, Clone)]
pub struct Sms {
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pins: Option<Pins>,
    pub guard: Guard,
    pub detector: Detector,
    pub cadence: Cadence,
    pub timeouts: Timeouts,
    pub button: ButtonCfg,
    pub geo: Geo,
    pub sms: Option<Sms>,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Guard
        if !(self.guard.obstacle_cm.is_finite() && self.guard.obstacle_cm > 0.0) {
            eyre::bail!("guard.obstacle_cm must be finite and > 0");
        }
        if !(self.guard.pit_cm.is_finite() && self.guard.pit_cm > 0.0) {
            eyre::bail!("guard.pit_cm must be finite and > 0");
        }
        if self.guard.obstacle_pulse_ms == 0 || self.guard.pit_pulse_ms == 0 {
            eyre::bail!("guard pulse lengths must be >= 1 ms");
        }

        // Detector
        if !(self.detector.delta_threshold_g.is_finite() && self.detector.delta_threshold_g > 0.0) {
            eyre::bail!("detector.delta_threshold_g must be finite and > 0");
        }
        if self.detector.cancel_poll_ms == 0 {
            eyre::bail!("detector.cancel_poll_ms must be >= 1");
        }
        if self.detector.cancel_window_ms < self.detector.cancel_poll_ms {
            eyre::bail!("detector.cancel_window_ms must cover at least one poll interval");
        }
        if self.detector.ack_pulse_ms == 0 || self.detector.cancel_ack_pulse_ms == 0 {
            eyre::bail!("detector pulse lengths must be >= 1 ms");
        }

        // Cadence
        if self.cadence.cycle_sleep_ms == 0 {
            eyre::bail!("cadence.cycle_sleep_ms must be >= 1");
        }

        // Timeouts
        if self.timeouts.echo_ms == 0 {
            eyre::bail!("timeouts.echo_ms must be >= 1");
        }
        if self.timeouts.http_ms == 0 {
            eyre::bail!("timeouts.http_ms must be >= 1");
        }

        // Geo
        if self.geo.url.is_empty() {
            eyre::bail!("geo.url must not be empty");
        }

        // Sms: all-or-nothing credentials
        if let Some(sms) = &self.sms
            && (sms.account_sid.is_empty()
                || sms.auth_token.is_empty()
                || sms.from.is_empty()
                || sms.to.is_empty())
        {
            eyre::bail!("sms requires account_sid, auth_token, from, and to");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of: never, daily, hourly");
        }

        Ok(())
    }
}
