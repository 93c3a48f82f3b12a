//! MPU-6050 accelerometer over I2C.

use rppal::i2c::I2c;

use cane_traits::Accelerometer;

use crate::error::{HwError, Result};

const MPU_ADDR: u16 = 0x68;
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_XOUT_H: u8 = 0x3B;

pub struct Mpu6050 {
    i2c: I2c,
}

impl Mpu6050 {
    /// Open the bus and wake the sensor out of sleep mode.
    pub fn new() -> Result<Self> {
        let mut i2c = I2c::new().map_err(|e| HwError::I2c(e.to_string()))?;
        i2c.set_slave_address(MPU_ADDR)
            .map_err(|e| HwError::I2c(e.to_string()))?;
        i2c.write(&[REG_PWR_MGMT_1, 0x00])
            .map_err(|e| HwError::I2c(e.to_string()))?;
        Ok(Self { i2c })
    }
}

impl Accelerometer for Mpu6050 {
    fn read_axes(
        &mut self,
    ) -> std::result::Result<[i16; 3], Box<dyn std::error::Error + Send + Sync>> {
        // Six consecutive registers: XOUT_H/L, YOUT_H/L, ZOUT_H/L.
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(&[REG_ACCEL_XOUT_H], &mut buf)
            .map_err(|e| HwError::I2c(e.to_string()))?;
        Ok([
            i16::from_be_bytes([buf[0], buf[1]]),
            i16::from_be_bytes([buf[2], buf[3]]),
            i16::from_be_bytes([buf[4], buf[5]]),
        ])
    }
}
