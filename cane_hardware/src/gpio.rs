//! Raspberry Pi GPIO peripherals: HC-SR04 ranging, haptic output, button.

use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, InputPin, OutputPin};

use cane_traits::{Button, Haptic, Ranger};

use crate::error::{HwError, Result};
use crate::util::wait_for_level;

/// HC-SR04 ultrasonic channel: trigger pulse, bounded echo measurement.
pub struct UltrasonicRanger {
    trig: OutputPin,
    echo: InputPin,
}

impl UltrasonicRanger {
    pub fn new(trig_pin: u8, echo_pin: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut trig = gpio
            .get(trig_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_output();
        trig.set_low();
        let echo = gpio
            .get(echo_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input();
        Ok(Self { trig, echo })
    }
}

impl Ranger for UltrasonicRanger {
    fn echo_micros(
        &mut self,
        timeout: Duration,
    ) -> std::result::Result<u32, Box<dyn std::error::Error + Send + Sync>> {
        // 10 us trigger pulse
        self.trig.set_low();
        std::thread::sleep(Duration::from_micros(2));
        self.trig.set_high();
        std::thread::sleep(Duration::from_micros(10));
        self.trig.set_low();

        let poll = Duration::from_micros(5);
        // Rising edge, then the high period is the round-trip time.
        wait_for_level(|| self.echo.is_high(), true, timeout, poll)?;
        let start = Instant::now();
        wait_for_level(|| self.echo.is_high(), false, timeout, poll)?;
        let us = start.elapsed().as_micros().min(u128::from(u32::MAX)) as u32;
        tracing::trace!(us, "echo measured");
        Ok(us)
    }
}

/// Haptic actuator on a single output pin.
pub struct GpioHaptic {
    pin: OutputPin,
}

impl GpioHaptic {
    pub fn new(pin: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut pin = gpio
            .get(pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_output();
        pin.set_low();
        Ok(Self { pin })
    }
}

impl Haptic for GpioHaptic {
    fn set_high(&mut self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.pin.set_high();
        Ok(())
    }
    fn set_low(&mut self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.pin.set_low();
        Ok(())
    }
}

/// Cancel/emergency button input; polarity translated here.
pub struct GpioButton {
    pin: InputPin,
    active_low: bool,
}

impl GpioButton {
    pub fn new(pin: u8, active_low: bool) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let pin = gpio
            .get(pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input_pullup();
        Ok(Self { pin, active_low })
    }
}

impl Button for GpioButton {
    fn is_pressed(&mut self) -> std::result::Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        })
    }
}
