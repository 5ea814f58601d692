//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Config file used when `--config` is not given. Missing means defaults.
pub const DEFAULT_CONFIG: &str = "etc/holdwatch.toml";

#[derive(Parser, Debug)]
#[command(name = "holdwatch", version, about = "Temperature hold monitor")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging] level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive a dashboard from a JSON-lines feed of sensor records
    Replay {
        /// File with one sensor record (JSON object) per line
        #[arg(long, value_name = "FILE")]
        feed: PathBuf,
        /// Account to sign in with
        #[arg(long, value_name = "EMAIL", default_value = "operator@localhost")]
        email: String,
        /// Write the CSV export into this directory when done
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
        /// Delay between published records
        #[arg(long, value_name = "MS", default_value_t = 0)]
        interval_ms: u64,
    },
    /// Convert a JSON dump of the logs path into the CSV export
    Export {
        /// JSON object keyed by record id, as stored under the logs path
        #[arg(long, value_name = "FILE")]
        logs: PathBuf,
        /// Output directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
    /// Validate the config and exercise the in-memory store
    SelfCheck,
}
