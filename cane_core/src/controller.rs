//! The main control loop: fixed-cadence polling over all subsystems.
//!
//! One thread, no parallelism. Within a cycle the order is fixed:
//! obstacle check, pit check, emergency button, fall detection. Each cycle
//! completes fully before the next begins; the only cancelable wait is the
//! fall-confirmation window, via the button, inside the detector.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cane_traits::clock::{Clock, MonotonicClock};
use cane_traits::{Accelerometer, Button, GpsFeed, Haptic, HttpTransport, Ranger, SmsTransport};

use crate::alert::AlertDispatcher;
use crate::config::{CadenceCfg, DetectorCfg, GuardCfg, Timeouts};
use crate::detector::{FallDetector, FallPoll};
use crate::error::{BuildError, Result};
use crate::guard::{DistanceGuard, DistanceReport};
use crate::hw_error::map_hw_error;
use crate::locate::LocationResolver;
use crate::motion::MotionSampler;

/// What one polling cycle did, for logs and tests.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub distances: DistanceReport,
    pub manual_alert: bool,
    pub fall: FallPoll,
}

/// Long-lived controller owning every subsystem and hardware handle.
/// Constructed once at startup via [`build_controller`].
pub struct Controller<RA, RB, A, G, T, S, H, B>
where
    RA: Ranger,
    RB: Ranger,
    A: Accelerometer,
    G: GpsFeed,
    T: HttpTransport,
    S: SmsTransport,
    H: Haptic,
    B: Button,
{
    guard: DistanceGuard<RA, RB>,
    sampler: MotionSampler<A>,
    detector: FallDetector,
    resolver: LocationResolver<G, T>,
    dispatcher: AlertDispatcher<S>,
    haptic: H,
    button: B,
    clock: Arc<dyn Clock + Send + Sync>,
    cadence: CadenceCfg,
}

impl<RA, RB, A, G, T, S, H, B> core::fmt::Debug for Controller<RA, RB, A, G, T, S, H, B>
where
    RA: Ranger,
    RB: Ranger,
    A: Accelerometer,
    G: GpsFeed,
    T: HttpTransport,
    S: SmsTransport,
    H: Haptic,
    B: Button,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("prev_magnitude_g", &self.detector.prev_magnitude())
            .field("cycle_sleep_ms", &self.cadence.cycle_sleep_ms)
            .finish()
    }
}

impl<RA, RB, A, G, T, S, H, B> Controller<RA, RB, A, G, T, S, H, B>
where
    RA: Ranger,
    RB: Ranger,
    A: Accelerometer,
    G: GpsFeed,
    T: HttpTransport,
    S: SmsTransport,
    H: Haptic,
    B: Button,
{
    /// One polling cycle in the fixed order; does not include the
    /// inter-cycle sleep.
    pub fn run_cycle(&mut self) -> CycleReport {
        let distances = self.guard.poll(&mut self.haptic, &*self.clock);
        let manual_alert = self.check_emergency_button();
        let fall = self.detector.poll(
            &mut self.sampler,
            &mut self.haptic,
            &mut self.button,
            &*self.clock,
        );
        if matches!(fall, FallPoll::Confirmed) {
            let coordinate = self.resolver.resolve();
            self.dispatcher.dispatch(coordinate);
        }
        CycleReport {
            distances,
            manual_alert,
            fall,
        }
    }

    /// Manual trigger: resolve and dispatch independently of fall logic,
    /// then pause briefly so one press does not fire repeatedly.
    fn check_emergency_button(&mut self) -> bool {
        match self.button.is_pressed() {
            Ok(true) => {
                tracing::info!("emergency button pressed; dispatching alert");
                let coordinate = self.resolver.resolve();
                self.dispatcher.dispatch(coordinate);
                self.clock.sleep_ms(self.cadence.post_alert_pause_ms);
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!(error = %map_hw_error(&*e), "emergency button read failed");
                false
            }
        }
    }

    /// Run until the shutdown flag flips.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        self.run_for(u64::MAX, shutdown);
    }

    /// Run at most `cycles` cycles, checking the shutdown flag between
    /// cycles, with the fixed inter-cycle sleep.
    pub fn run_for(&mut self, cycles: u64, shutdown: &AtomicBool) {
        tracing::info!("control loop start");
        let mut done: u64 = 0;
        while done < cycles && !shutdown.load(Ordering::Relaxed) {
            self.run_cycle();
            self.clock.sleep_ms(self.cadence.cycle_sleep_ms);
            done += 1;
        }
        tracing::info!(cycles = done, "control loop stopped");
    }
}

/// Validate configuration and assemble a [`Controller`].
///
/// This is the single source of truth for construction-time validation;
/// invalid knobs are rejected here rather than surfacing as surprising
/// runtime behavior.
#[allow(clippy::too_many_arguments)]
pub fn build_controller<RA, RB, A, G, T, S, H, B>(
    obstacle: RA,
    pit: RB,
    accel: A,
    gps: G,
    http: T,
    sms: S,
    haptic: H,
    button: B,
    guard: GuardCfg,
    detector: DetectorCfg,
    cadence: CadenceCfg,
    timeouts: Timeouts,
    geo_url: impl Into<String>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
) -> Result<Controller<RA, RB, A, G, T, S, H, B>>
where
    RA: Ranger,
    RB: Ranger,
    A: Accelerometer,
    G: GpsFeed,
    T: HttpTransport,
    S: SmsTransport,
    H: Haptic,
    B: Button,
{
    if !(detector.delta_threshold_g.is_finite() && detector.delta_threshold_g > 0.0) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "delta_threshold_g must be finite and > 0",
        )));
    }
    if detector.cancel_poll_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "cancel_poll_ms must be >= 1",
        )));
    }
    if detector.cancel_window_ms < detector.cancel_poll_ms {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "cancel_window_ms must cover at least one poll interval",
        )));
    }
    if guard.obstacle_cm <= 0.0 || guard.pit_cm <= 0.0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "distance thresholds must be > 0",
        )));
    }
    if cadence.cycle_sleep_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "cycle_sleep_ms must be >= 1",
        )));
    }
    if timeouts.echo_ms == 0 || timeouts.http_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "timeouts must be >= 1 ms",
        )));
    }

    let clock = clock.unwrap_or_else(|| Arc::new(MonotonicClock::new()));
    Ok(Controller {
        guard: DistanceGuard::new(
            obstacle,
            pit,
            guard,
            Duration::from_millis(timeouts.echo_ms),
        ),
        sampler: MotionSampler::new(accel),
        detector: FallDetector::new(detector),
        resolver: LocationResolver::new(gps, http, geo_url, Duration::from_millis(timeouts.http_ms)),
        dispatcher: AlertDispatcher::new(sms, Duration::from_millis(timeouts.http_ms)),
        haptic,
        button,
        clock,
        cadence,
    })
}
