//! Best-effort location resolution: GPS fix first, IP geolocation second.
//!
//! Every failure is typed (`LocateError`), logged locally, and treated as
//! "advance to the next source"; nothing here is fatal.

use std::time::Duration;

use cane_traits::{GpsFeed, HttpTransport};

use crate::error::LocateError;

/// Decimal-degree coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Prefix identifying the fix sentence we parse.
pub const FIX_PREFIX: &str = "$GPGGA";

/// Field index of latitude within the fix sentence; hemisphere follows,
/// then longitude and its hemisphere.
const LAT_FIELD: usize = 2;

/// Parse one GGA fix sentence into decimal degrees.
///
/// Lines without the fix prefix, or with empty coordinate fields (receiver
/// alive but no solution yet), are `NoData`; unparsable fields are
/// `Malformed`.
pub fn parse_fix_sentence(line: &str) -> Result<Coordinate, LocateError> {
    let line = line.trim();
    if !line.starts_with(FIX_PREFIX) {
        return Err(LocateError::NoData);
    }
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= LAT_FIELD + 3 {
        return Err(LocateError::Malformed("truncated fix sentence".into()));
    }
    let (lat_raw, lat_hemi) = (fields[LAT_FIELD], fields[LAT_FIELD + 1]);
    let (lon_raw, lon_hemi) = (fields[LAT_FIELD + 2], fields[LAT_FIELD + 3]);
    if lat_raw.is_empty() || lon_raw.is_empty() {
        return Err(LocateError::NoData);
    }
    Ok(Coordinate {
        lat: ddmm_to_degrees(lat_raw, lat_hemi)?,
        lon: ddmm_to_degrees(lon_raw, lon_hemi)?,
    })
}

/// `ddmm.mmmm` plus hemisphere letter to signed decimal degrees.
fn ddmm_to_degrees(value: &str, hemisphere: &str) -> Result<f64, LocateError> {
    let v: f64 = value
        .parse()
        .map_err(|_| LocateError::Malformed(format!("bad coordinate field: {value}")))?;
    let degrees = (v / 100.0).trunc();
    let minutes = v - degrees * 100.0;
    let coord = degrees + minutes / 60.0;
    Ok(match hemisphere {
        "S" | "W" => -coord,
        _ => coord,
    })
}

pub struct LocationResolver<G: GpsFeed, T: HttpTransport> {
    gps: G,
    http: T,
    geo_url: String,
    http_timeout: Duration,
}

impl<G: GpsFeed, T: HttpTransport> LocationResolver<G, T> {
    pub fn new(gps: G, http: T, geo_url: impl Into<String>, http_timeout: Duration) -> Self {
        Self {
            gps,
            http,
            geo_url: geo_url.into(),
            http_timeout,
        }
    }

    /// Fallback chain, strict order, first success wins. `None` means the
    /// caller must fall back to a text-only alert.
    pub fn resolve(&mut self) -> Option<Coordinate> {
        match self.gps_fix() {
            Ok(c) => {
                tracing::debug!(lat = c.lat, lon = c.lon, "gps fix");
                return Some(c);
            }
            Err(e) => tracing::debug!(error = %e, "no gps fix; trying ip geolocation"),
        }
        match self.ip_lookup() {
            Ok(c) => {
                tracing::debug!(lat = c.lat, lon = c.lon, "ip geolocation");
                Some(c)
            }
            Err(e) => {
                tracing::warn!(error = %e, "location unavailable");
                None
            }
        }
    }

    /// Primary source: one buffered line from the serial receiver.
    pub fn gps_fix(&mut self) -> Result<Coordinate, LocateError> {
        if !self.gps.has_data() {
            return Err(LocateError::NoData);
        }
        let line = self
            .gps
            .read_line()
            .map_err(|e| LocateError::Transport(e.to_string()))?;
        parse_fix_sentence(&line)
    }

    /// Fallback source: geolocation service returning JSON `lat`/`lon`.
    pub fn ip_lookup(&mut self) -> Result<Coordinate, LocateError> {
        let body = self
            .http
            .get(&self.geo_url, self.http_timeout)
            .map_err(|e| LocateError::Transport(e.to_string()))?;
        let doc: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| LocateError::Malformed(e.to_string()))?;
        let lat = doc
            .get("lat")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| LocateError::Malformed("response missing numeric lat".into()))?;
        let lon = doc
            .get("lon")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| LocateError::Malformed("response missing numeric lon".into()))?;
        Ok(Coordinate { lat, lon })
    }
}
