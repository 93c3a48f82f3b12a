use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CaneError {
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("hardware fault: {0}")]
    HardwareFault(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("timeout waiting for sensor")]
    Timeout,
}

/// Why a location source yielded nothing. The resolver logs these and
/// advances to the next source; tests assert on the cause.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("no position data available")]
    NoData,
    #[error("malformed position data: {0}")]
    Malformed(String),
    #[error("location transport: {0}")]
    Transport(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
