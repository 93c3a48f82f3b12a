pub mod clock;

pub use clock::{Clock, MonotonicClock};

use std::time::Duration;

/// One ultrasonic ranging channel.
///
/// A single call triggers a measurement pulse and returns the echo
/// round-trip time in microseconds. Implementations must bound the echo
/// wait by `timeout` so a stuck line cannot stall the control loop.
pub trait Ranger {
    fn echo_micros(
        &mut self,
        timeout: Duration,
    ) -> Result<u32, Box<dyn std::error::Error + Send + Sync>>;
}

/// Three-axis accelerometer returning raw signed 16-bit counts `[x, y, z]`.
///
/// Any one-time wake/init sequence belongs in the implementation's
/// constructor, not here.
pub trait Accelerometer {
    fn read_axes(&mut self) -> Result<[i16; 3], Box<dyn std::error::Error + Send + Sync>>;
}

/// Haptic actuator as a bare digital output; pulse timing is the caller's job.
pub trait Haptic {
    fn set_high(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn set_low(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Cancel/emergency push button, sampled fresh on every call.
///
/// Implementations translate electrical polarity (active-low inputs) so
/// `true` always means "pressed".
pub trait Button {
    fn is_pressed(&mut self) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Serial GPS feed delivering raw NMEA lines.
pub trait GpsFeed {
    /// Whether at least one buffered line is available without blocking.
    fn has_data(&mut self) -> bool;
    /// Read one line; may be partial or malformed, the parser decides.
    fn read_line(&mut self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Minimal HTTP GET used by the geolocation fallback.
///
/// Returns the response body on a successful status; any transport or
/// non-success status surfaces as an error.
pub trait HttpTransport {
    fn get(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Outbound SMS transport; the message body is already fully formatted.
pub trait SmsTransport {
    fn send(
        &mut self,
        body: &str,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

// The SMS transport is chosen at runtime (real gateway when credentials
// are configured, simulated otherwise), so boxed transports must satisfy
// the trait too.
impl<T: SmsTransport + ?Sized> SmsTransport for Box<T> {
    fn send(
        &mut self,
        body: &str,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).send(body, timeout)
    }
}
