//! Acceleration sampling: raw axis counts to a 3-axis sample in g.

use cane_traits::Accelerometer;
use eyre::WrapErr;

use crate::error::Result;
use crate::hw_error::map_hw_error;

/// Sensitivity divisor for the ±2 g range: raw counts per g.
pub const LSB_PER_G: f32 = 16384.0;

/// One immutable 3-axis acceleration sample, unit g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    /// Euclidean magnitude of the acceleration vector.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Wraps the raw accelerometer bus into per-cycle `AccelSample`s.
pub struct MotionSampler<A: Accelerometer> {
    dev: A,
}

impl<A: Accelerometer> MotionSampler<A> {
    pub fn new(dev: A) -> Self {
        Self { dev }
    }

    /// Read all three axes and convert to g.
    ///
    /// A hardware-read failure is recoverable: the caller treats it as
    /// "no sample this cycle".
    pub fn sample(&mut self) -> Result<AccelSample> {
        let [x, y, z] = self
            .dev
            .read_axes()
            .map_err(|e| eyre::Report::new(map_hw_error(&*e)))
            .wrap_err("reading accelerometer")?;
        Ok(AccelSample {
            x: x as f32 / LSB_PER_G,
            y: y as f32 / LSB_PER_G,
            z: z as f32 / LSB_PER_G,
        })
    }
}
