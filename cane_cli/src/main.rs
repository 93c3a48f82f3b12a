mod cli;
mod error_fmt;
mod run;

use std::fs;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cane_config::Config;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};

fn main() {
    let exit = match real_main() {
        Ok(()) => 0,
        Err(err) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", error_fmt::format_error_json(&err));
            } else {
                eprintln!("Error: {}", error_fmt::humanize(&err));
            }
            error_fmt::exit_code_for_error(&err)
        }
    };
    std::process::exit(exit);
}

fn real_main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let (cfg, cfg_found) = load_config(&cli.config)?;
    init_tracing(&cli, &cfg)?;
    if !cfg_found {
        tracing::info!(path = %cli.config.display(), "config file not found; using defaults");
    }
    cfg.validate()?;

    match cli.cmd {
        Commands::Run { cycles } => run::run_loop(&cfg, cycles),
        Commands::SelfCheck => run::self_check(&cfg),
        Commands::Locate => run::locate_once(&cfg),
        Commands::TestAlert { send } => run::test_alert(&cfg, send),
    }
}

fn load_config(path: &Path) -> eyre::Result<(Config, bool)> {
    if path.exists() {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("read config {}", path.display()))?;
        let cfg = toml::from_str::<Config>(&text)
            .map_err(|e| eyre::eyre!("parse config {}: {e}", path.display()))?;
        Ok((cfg, true))
    } else {
        Ok((Config::default(), false))
    }
}

fn init_tracing(cli: &Cli, cfg: &Config) -> eyre::Result<()> {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins, then --log-level, then the config, then "info".
    let level = cli
        .log_level
        .clone()
        .or_else(|| cfg.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .wrap_err("invalid log level")?;

    let file_layer = match &cfg.logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .map(|s| s.to_os_string())
                .unwrap_or_else(|| "cane.log".into());
            let appender = match cfg.logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if cli.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    Ok(())
}
