//! Command implementations: hardware assembly and the polling loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eyre::WrapErr;

use cane_config::Config;
use cane_core::alert::AlertDispatcher;
use cane_core::controller::build_controller;
use cane_core::format_alert;
use cane_core::locate::LocationResolver;
use cane_hardware::net::BlockingHttp;
use cane_traits::SmsTransport;

/// Real gateway when credentials are configured, simulated (logging)
/// transport otherwise.
fn sms_transport(cfg: &Config) -> eyre::Result<Box<dyn SmsTransport>> {
    match &cfg.sms {
        Some(s) => {
            let gateway =
                cane_hardware::net::TwilioSms::new(&s.account_sid, &s.auth_token, &s.from, &s.to)
                    .wrap_err("init sms gateway")?;
            Ok(Box::new(gateway))
        }
        None => {
            tracing::info!("no [sms] section; alerts will be logged, not sent");
            Ok(Box::new(cane_hardware::SimulatedSms::default()))
        }
    }
}

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
fn gps_feed(_cfg: &Config) -> eyre::Result<cane_hardware::SimulatedGps> {
    Ok(cane_hardware::SimulatedGps::default())
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
fn gps_feed(_cfg: &Config) -> eyre::Result<cane_hardware::serial::SerialGps> {
    cane_hardware::serial::SerialGps::new(9600).wrap_err("open gps uart")
}

/// Assemble a controller on the simulated backend.
#[cfg(not(all(feature = "hardware", target_os = "linux")))]
fn assemble(
    cfg: &Config,
) -> eyre::Result<
    cane_core::Controller<
        cane_hardware::SimulatedRanger,
        cane_hardware::SimulatedRanger,
        cane_hardware::SimulatedAccelerometer,
        cane_hardware::SimulatedGps,
        BlockingHttp,
        Box<dyn SmsTransport>,
        cane_hardware::SimulatedHaptic,
        cane_hardware::SimulatedButton,
    >,
> {
    use cane_hardware::{
        SimulatedAccelerometer, SimulatedButton, SimulatedHaptic, SimulatedRanger,
    };
    tracing::info!("simulated hardware backend");
    let controller = build_controller(
        SimulatedRanger::default(),
        SimulatedRanger::default(),
        SimulatedAccelerometer::default(),
        gps_feed(cfg)?,
        BlockingHttp::new().wrap_err("init http client")?,
        sms_transport(cfg)?,
        SimulatedHaptic::default(),
        SimulatedButton::default(),
        (&cfg.guard).into(),
        (&cfg.detector).into(),
        (&cfg.cadence).into(),
        (&cfg.timeouts).into(),
        cfg.geo.url.clone(),
        None,
    )?;
    Ok(controller)
}

/// Assemble a controller on the GPIO hardware backend.
#[cfg(all(feature = "hardware", target_os = "linux"))]
fn assemble(
    cfg: &Config,
) -> eyre::Result<
    cane_core::Controller<
        cane_hardware::gpio::UltrasonicRanger,
        cane_hardware::gpio::UltrasonicRanger,
        cane_hardware::mpu6050::Mpu6050,
        cane_hardware::serial::SerialGps,
        BlockingHttp,
        Box<dyn SmsTransport>,
        cane_hardware::gpio::GpioHaptic,
        cane_hardware::gpio::GpioButton,
    >,
> {
    use cane_hardware::gpio::{GpioButton, GpioHaptic, UltrasonicRanger};
    use cane_hardware::mpu6050::Mpu6050;

    let pins = cfg
        .pins
        .as_ref()
        .ok_or_else(|| eyre::eyre!("[pins] section required with the hardware backend"))?;
    tracing::info!("gpio hardware backend");
    let controller = build_controller(
        UltrasonicRanger::new(pins.trig_obstacle, pins.echo_obstacle)
            .wrap_err("open obstacle ranger")?,
        UltrasonicRanger::new(pins.trig_pit, pins.echo_pit).wrap_err("open pit ranger")?,
        Mpu6050::new().wrap_err("open accelerometer")?,
        gps_feed(cfg)?,
        BlockingHttp::new().wrap_err("init http client")?,
        sms_transport(cfg)?,
        GpioHaptic::new(pins.haptic).wrap_err("open haptic pin")?,
        GpioButton::new(pins.button, cfg.button.active_low).wrap_err("open button pin")?,
        (&cfg.guard).into(),
        (&cfg.detector).into(),
        (&cfg.cadence).into(),
        (&cfg.timeouts).into(),
        cfg.geo.url.clone(),
        None,
    )?;
    Ok(controller)
}

pub fn run_loop(cfg: &Config, cycles: Option<u64>) -> eyre::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .wrap_err("install ctrl-c handler")?;

    let mut controller = assemble(cfg)?;
    match cycles {
        Some(n) => controller.run_for(n, &shutdown),
        None => controller.run(&shutdown),
    }
    Ok(())
}

pub fn self_check(cfg: &Config) -> eyre::Result<()> {
    let mut controller = assemble(cfg)?;
    let report = controller.run_cycle();
    println!("cycle report: {report:?}");
    println!("self-check ok");
    Ok(())
}

pub fn locate_once(cfg: &Config) -> eyre::Result<()> {
    let mut resolver = LocationResolver::new(
        gps_feed(cfg)?,
        BlockingHttp::new().wrap_err("init http client")?,
        cfg.geo.url.clone(),
        Duration::from_millis(cfg.timeouts.http_ms),
    );
    match resolver.resolve() {
        Some(c) => println!("{},{}", c.lat, c.lon),
        None => println!("location unavailable"),
    }
    Ok(())
}

pub fn test_alert(cfg: &Config, send: bool) -> eyre::Result<()> {
    let mut resolver = LocationResolver::new(
        gps_feed(cfg)?,
        BlockingHttp::new().wrap_err("init http client")?,
        cfg.geo.url.clone(),
        Duration::from_millis(cfg.timeouts.http_ms),
    );
    let coordinate = resolver.resolve();
    println!("{}", format_alert(coordinate));
    if send {
        let mut dispatcher = AlertDispatcher::new(
            sms_transport(cfg)?,
            Duration::from_millis(cfg.timeouts.http_ms),
        );
        dispatcher.dispatch(coordinate);
    }
    Ok(())
}
