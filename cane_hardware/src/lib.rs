//! Hardware adapters for the cane controller.
//!
//! Simulated implementations are always available and drive the default
//! (desktop) build; the `hardware` feature adds the real Raspberry Pi
//! peripherals. Network transports live in `net`.

pub mod error;
pub mod net;
pub mod util;

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod gpio;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod mpu6050;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod serial;

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use cane_traits::{Accelerometer, Button, GpsFeed, Haptic, Ranger, SmsTransport};

use crate::error::HwError;
use crate::util::cm_to_echo_micros;

/// Simulated ranging channel with an adjustable target distance.
pub struct SimulatedRanger {
    cm: Rc<Cell<f32>>,
}

impl SimulatedRanger {
    pub fn new(cm: f32) -> Self {
        SimulatedRanger {
            cm: Rc::new(Cell::new(cm)),
        }
    }

    /// Shared knob for tests and demos to move the simulated target.
    pub fn distance_handle(&self) -> Rc<Cell<f32>> {
        self.cm.clone()
    }
}

impl Default for SimulatedRanger {
    fn default() -> Self {
        // Far enough that neither band triggers.
        Self::new(100.0)
    }
}

impl Ranger for SimulatedRanger {
    fn echo_micros(
        &mut self,
        _timeout: Duration,
    ) -> Result<u32, Box<dyn std::error::Error + Send + Sync>> {
        let us = cm_to_echo_micros(self.cm.get());
        tracing::trace!(us, "simulated echo");
        Ok(us)
    }
}

/// Simulated accelerometer with an adjustable raw axis vector.
pub struct SimulatedAccelerometer {
    axes: Rc<Cell<[i16; 3]>>,
}

impl SimulatedAccelerometer {
    pub fn new(axes: [i16; 3]) -> Self {
        SimulatedAccelerometer {
            axes: Rc::new(Cell::new(axes)),
        }
    }

    pub fn axes_handle(&self) -> Rc<Cell<[i16; 3]>> {
        self.axes.clone()
    }
}

impl Default for SimulatedAccelerometer {
    fn default() -> Self {
        // At rest: 1 g on z.
        Self::new([0, 0, 16384])
    }
}

impl Accelerometer for SimulatedAccelerometer {
    fn read_axes(&mut self) -> Result<[i16; 3], Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.axes.get())
    }
}

/// Simulated haptic actuator; records its current level.
#[derive(Default)]
pub struct SimulatedHaptic {
    active: Rc<Cell<bool>>,
}

impl SimulatedHaptic {
    pub fn active_handle(&self) -> Rc<Cell<bool>> {
        self.active.clone()
    }
}

impl Haptic for SimulatedHaptic {
    fn set_high(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.active.set(true);
        tracing::debug!("haptic on (simulated)");
        Ok(())
    }
    fn set_low(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.active.set(false);
        tracing::debug!("haptic off (simulated)");
        Ok(())
    }
}

/// Simulated button with a shared pressed flag.
#[derive(Default)]
pub struct SimulatedButton {
    pressed: Rc<Cell<bool>>,
}

impl SimulatedButton {
    pub fn pressed_handle(&self) -> Rc<Cell<bool>> {
        self.pressed.clone()
    }
}

impl Button for SimulatedButton {
    fn is_pressed(&mut self) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.pressed.get())
    }
}

/// Simulated GPS feed replaying queued NMEA lines.
#[derive(Default)]
pub struct SimulatedGps {
    lines: VecDeque<String>,
}

impl SimulatedGps {
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }
}

impl GpsFeed for SimulatedGps {
    fn has_data(&mut self) -> bool {
        !self.lines.is_empty()
    }
    fn read_line(&mut self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.lines
            .pop_front()
            .ok_or_else(|| HwError::Serial("no buffered line".to_string()).into())
    }
}

/// Simulated SMS transport; records sent bodies instead of sending.
#[derive(Default)]
pub struct SimulatedSms {
    sent: Vec<String>,
}

impl SimulatedSms {
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
}

impl SmsTransport for SimulatedSms {
    fn send(
        &mut self,
        body: &str,
        _timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(body, "sms send (simulated)");
        self.sent.push(body.to_string());
        Ok(())
    }
}
