//! UART GPS receiver feed.

use std::time::Duration;

use rppal::uart::{Parity, Uart};

use cane_traits::GpsFeed;

use crate::error::{HwError, Result};

/// Maximum NMEA sentence length we accept before giving up on a line.
const MAX_LINE_BYTES: usize = 128;

pub struct SerialGps {
    uart: Uart,
}

impl SerialGps {
    pub fn new(baud_rate: u32) -> Result<Self> {
        let mut uart =
            Uart::new(baud_rate, Parity::None, 8, 1).map_err(|e| HwError::Serial(e.to_string()))?;
        // Per-byte read timeout keeps read_line bounded.
        uart.set_read_mode(1, Duration::from_millis(50))
            .map_err(|e| HwError::Serial(e.to_string()))?;
        Ok(Self { uart })
    }
}

impl GpsFeed for SerialGps {
    fn has_data(&mut self) -> bool {
        self.uart.input_len().map(|n| n > 0).unwrap_or(false)
    }

    fn read_line(&mut self) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        while line.len() < MAX_LINE_BYTES {
            let n = self
                .uart
                .read(&mut byte)
                .map_err(|e| HwError::Serial(e.to_string()))?;
            if n == 0 || byte[0] == b'\n' {
                break;
            }
            line.push(byte[0]);
        }
        Ok(String::from_utf8_lossy(&line)
            .trim_end_matches('\r')
            .to_string())
    }
}
