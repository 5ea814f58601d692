#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cli;
mod error_fmt;
mod replay;

use clap::Parser;
use cli::{Cli, Commands, DEFAULT_CONFIG, FILE_GUARD, JSON_MODE};
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use holdwatch_config::{Config, Rotation};
use holdwatch_core::HoldwatchError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        let json = JSON_MODE.get().copied().unwrap_or(false);
        tracing::error!(error = %err, "command failed");
        if json {
            println!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    init_tracing(cli.json, cli.log_level.as_deref(), &cfg)?;

    match cli.cmd {
        Commands::Replay {
            feed,
            email,
            export,
            interval_ms,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            {
                let flag = shutdown.clone();
                if let Err(e) = ctrlc::set_handler(move || {
                    flag.store(true, Ordering::Release);
                }) {
                    tracing::warn!(error = %e, "failed to install Ctrl-C handler");
                }
            }
            let summary = replay::run_replay(
                &cfg,
                &feed,
                &email,
                export.as_deref(),
                Duration::from_millis(interval_ms),
                shutdown,
                cli.json,
            )?;
            if cli.json {
                println!("{}", summary.to_json());
            }
            tracing::info!(
                snapshots = summary.snapshots,
                hold_events = summary.hold_events,
                "replay complete"
            );
        }
        Commands::Export { logs, out } => {
            let path = replay::run_export(&cfg, &logs, &out)?;
            if cli.json {
                println!("{}", serde_json::json!({ "export": path.display().to_string() }));
            } else {
                println!("Exported {}", path.display());
            }
        }
        Commands::SelfCheck => {
            self_check(&cfg)?;
            println!("ok");
        }
    }
    Ok(())
}

/// Explicit `--config` must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> eyre::Result<Config> {
    let path: PathBuf = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    holdwatch_config::load_path(&path)
        .map_err(|e| HoldwatchError::Config(format!("{e:#}")).into())
}

fn init_tracing(json: bool, level: Option<&str>, cfg: &Config) -> eyre::Result<()> {
    let level = level
        .or(cfg.logging.level.as_deref())
        .unwrap_or("info")
        .to_ascii_lowercase();
    if !holdwatch_config::LOG_LEVELS.contains(&level.as_str()) {
        return Err(HoldwatchError::Config(format!(
            "log level must be one of error|warn|info|debug|trace, got '{level}'"
        ))
        .into());
    }
    // RUST_LOG wins over --log-level / [logging] level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let console = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).with_target(false).boxed()
    };

    let file = match cfg.logging.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name().ok_or_else(|| {
                HoldwatchError::Config(format!(
                    "logging.file '{}' has no file name",
                    path.display()
                ))
            })?;
            let appender = match cfg.logging.rotation {
                Rotation::Never => tracing_appender::rolling::never(dir, name),
                Rotation::Daily => tracing_appender::rolling::daily(dir, name),
                Rotation::Hourly => tracing_appender::rolling::hourly(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| eyre::eyre!("init tracing: {e}"))?;
    Ok(())
}

/// Config is valid and a sample record flows through store and dashboard.
fn self_check(cfg: &Config) -> eyre::Result<()> {
    let store = Arc::new(holdwatch_store::MemoryStore::new());
    let mut dash = holdwatch_core::Dashboard::builder()
        .with_store(store.clone())
        .with_paths((&cfg.store).into())
        .with_window((&cfg.window).into())
        .build()?;
    let sample = serde_json::json!({
        "Sensor": "self-check",
        "Temperature": 0.0,
        "Decimal Index": 0,
        "Hold Active": false,
        "Battery": 100
    });
    store
        .set(&cfg.store.sensor_path, sample)
        .map_err(HoldwatchError::from)?;
    dash.process_pending();
    if dash.stats().snapshots != 1 {
        eyre::bail!("self-check record was not delivered");
    }
    dash.close();
    tracing::info!(
        sensor = %cfg.store.sensor_path,
        logs = %cfg.store.logs_path,
        "self-check passed"
    );
    Ok(())
}
