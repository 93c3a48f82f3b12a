//! Emergency alert formatting and best-effort dispatch.

use std::time::Duration;

use cane_traits::SmsTransport;

use crate::locate::Coordinate;

/// Base of the map link embedded when a coordinate is available.
pub const MAPS_URL: &str = "https://www.google.com/maps?q=";

/// Build the outbound message body for the given resolution outcome.
pub fn format_alert(coordinate: Option<Coordinate>) -> String {
    match coordinate {
        Some(c) => format!("Fall Detected! Location: {MAPS_URL}{},{}", c.lat, c.lon),
        None => "Fall Detected! Location unavailable.".to_string(),
    }
}

pub struct AlertDispatcher<S: SmsTransport> {
    sms: S,
    send_timeout: Duration,
}

impl<S: SmsTransport> AlertDispatcher<S> {
    pub fn new(sms: S, send_timeout: Duration) -> Self {
        Self { sms, send_timeout }
    }

    /// Format and send one alert. Best-effort: transport failures are
    /// logged and swallowed, never retried or propagated.
    pub fn dispatch(&mut self, coordinate: Option<Coordinate>) {
        let body = format_alert(coordinate);
        match self.sms.send(&body, self.send_timeout) {
            Ok(()) => tracing::info!("alert dispatched"),
            Err(e) => tracing::warn!(error = %e, "alert send failed; continuing"),
        }
    }
}
