//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "cane", version, about = "Assistive cane controller CLI")]
pub struct Cli {
    /// Path to config TOML; built-in defaults apply when the file is absent
    #[arg(long, value_name = "FILE", default_value = "etc/cane_config.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins,
    /// then this flag, then the config's logging.level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the polling loop (obstacle, pit, emergency button, fall detection)
    Run {
        /// Stop after this many cycles instead of running until ctrl-c
        #[arg(long, value_name = "N")]
        cycles: Option<u64>,
    },
    /// Quick health check: one full polling cycle on the active backend
    SelfCheck,
    /// Resolve the current position once (GPS, then IP fallback) and print it
    Locate,
    /// Print the alert message that would be sent; --send dispatches it
    TestAlert {
        /// Actually send via the configured SMS transport
        #[arg(long, action = ArgAction::SetTrue)]
        send: bool,
    },
}
