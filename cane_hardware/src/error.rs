use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("gpio error: {0}")]
    Gpio(String),
    #[error("i2c error: {0}")]
    I2c(String),
    #[error("serial error: {0}")]
    Serial(String),
    #[error("echo timeout")]
    EchoTimeout,
    #[error("sensor timeout")]
    Timeout,
    #[error("http status {0}")]
    Status(u16),
    #[error("http transport: {0}")]
    Http(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
