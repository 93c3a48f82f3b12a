//! Human-readable error descriptions and structured JSON error formatting.

use std::error::Error as _;

use cane_core::error::{BuildError, CaneError};

/// Map an eyre::Report to a human-readable explanation with likely causes
/// and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/cane_config.toml for a sample."
            ),
        };
    }

    if let Some(ce) = err.downcast_ref::<CaneError>() {
        if matches!(ce, CaneError::Timeout) {
            return "What happened: A sensor did not respond within its timeout.\nLikely causes: Ranging echo line stuck low/high, or accelerometer bus wiring.\nHow to fix: Check [pins] and wiring, or raise timeouts.echo_ms in the config.".to_string();
        }
        return format!(
            "What happened: {ce}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
        );
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("[pins]") {
        return "What happened: The hardware backend needs pin assignments.\nLikely causes: Missing [pins] section in the config.\nHow to fix: Add [pins] with trig/echo pairs, haptic, and button pins.".to_string();
    }

    if lower.contains("sms") {
        return "What happened: The SMS gateway could not be initialized.\nLikely causes: Missing or invalid [sms] credentials, or no network.\nHow to fix: Check the [sms] section; without it, alerts are logged instead of sent.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 2 for rejected configuration, 3 for sensor timeouts,
/// 1 for everything else.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 2;
    }
    if matches!(err.downcast_ref::<CaneError>(), Some(CaneError::Timeout)) {
        return 3;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = if err.downcast_ref::<BuildError>().is_some() {
        "InvalidConfig"
    } else if matches!(err.downcast_ref::<CaneError>(), Some(CaneError::Timeout)) {
        "Timeout"
    } else {
        "Error"
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
