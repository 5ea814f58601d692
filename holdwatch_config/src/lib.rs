#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the hold monitoring dashboard.
//!
//! - `Config` and its sections are deserialized from TOML; every section and
//!   field has a default, so an empty file is a valid config.
//! - `Config::validate` rejects values the dashboard cannot run with.
use serde::Deserialize;
use serde::de::Deserializer;
use std::path::Path;

/// Log levels accepted by `[logging] level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Largest accepted chart window; the window is rendered in full on every update.
pub const MAX_WINDOW_CAPACITY: usize = 10_000;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreCfg {
    /// Path holding the latest sensor snapshot.
    pub sensor_path: String,
    /// Path under which hold events are appended.
    pub logs_path: String,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            sensor_path: "Yog".to_string(),
            logs_path: "logs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WindowCfg {
    /// Number of most recent readings kept for the chart.
    pub capacity: usize,
    /// Axis minimum used while the window is empty.
    pub floor: f64,
    /// Axis maximum used while the window is empty.
    pub ceiling: f64,
    /// Always fold floor and ceiling into the axis range, not only when empty.
    pub widen_to_bounds: bool,
}

impl Default for WindowCfg {
    fn default() -> Self {
        Self {
            capacity: 20,
            floor: 0.0,
            ceiling: 30.0,
            widen_to_bounds: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportCfg {
    /// File name prefix; the export is written as `<prefix>-<YYYY-MM-DD>.csv`.
    pub file_prefix: String,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self {
            file_prefix: "temperature-logs".to_string(),
        }
    }
}

/// Log rotation policy for the optional log file.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Never,
    Daily,
    Hourly,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Accepts "never" | "daily" | "hourly" (default: never)
    #[serde(deserialize_with = "de_rotation")]
    pub rotation: Rotation,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardCfg {
    /// How long the notification loop waits before re-checking for shutdown.
    pub poll_ms: u64,
}

impl Default for DashboardCfg {
    fn default() -> Self {
        Self { poll_ms: 50 }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub store: StoreCfg,
    pub window: WindowCfg,
    pub export: ExportCfg,
    pub logging: Logging,
    pub dashboard: DashboardCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_path(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {}: {}", path.display(), e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {}: {}", path.display(), e))?;
    cfg.validate()?;
    Ok(cfg)
}

// Case-insensitive rotation names; serde's rename_all alone would reject "Daily".
fn de_rotation<'de, D>(deserializer: D) -> Result<Rotation, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("never") => Ok(Rotation::Never),
        Some("daily") => Ok(Rotation::Daily),
        Some("hourly") => Ok(Rotation::Hourly),
        Some(other) => Err(serde::de::Error::custom(format!(
            "unknown rotation '{other}', expected never|daily|hourly"
        ))),
    }
}

fn check_path(name: &str, p: &str) -> eyre::Result<()> {
    let trimmed = p.trim_matches('/');
    if trimmed.is_empty() {
        eyre::bail!("{name} must not be empty");
    }
    if trimmed.split('/').any(str::is_empty) {
        eyre::bail!("{name} must not contain empty segments");
    }
    if p.chars().any(|c| matches!(c, '.' | '#' | '$' | '[' | ']')) {
        eyre::bail!("{name} must not contain any of . # $ [ ]");
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Store
        check_path("store.sensor_path", &self.store.sensor_path)?;
        check_path("store.logs_path", &self.store.logs_path)?;
        if self.store.sensor_path.trim_matches('/') == self.store.logs_path.trim_matches('/') {
            eyre::bail!("store.sensor_path and store.logs_path must differ");
        }

        // Window
        if self.window.capacity == 0 {
            eyre::bail!("window.capacity must be >= 1");
        }
        if self.window.capacity > MAX_WINDOW_CAPACITY {
            eyre::bail!("window.capacity is unreasonably large (>{MAX_WINDOW_CAPACITY})");
        }
        if !self.window.floor.is_finite() || !self.window.ceiling.is_finite() {
            eyre::bail!("window.floor and window.ceiling must be finite");
        }
        if self.window.floor >= self.window.ceiling {
            eyre::bail!("window.floor must be < window.ceiling");
        }

        // Export
        let prefix = self.export.file_prefix.as_str();
        if prefix.trim().is_empty() {
            eyre::bail!("export.file_prefix must not be empty");
        }
        if prefix.contains(['/', '\\']) {
            eyre::bail!("export.file_prefix must be a file name, not a path");
        }

        // Logging
        if let Some(level) = &self.logging.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace");
        }
        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            eyre::bail!("logging.file must not be empty when set");
        }

        // Dashboard
        if self.dashboard.poll_ms == 0 {
            eyre::bail!("dashboard.poll_ms must be >= 1");
        }
        if self.dashboard.poll_ms > 60_000 {
            eyre::bail!("dashboard.poll_ms is unreasonably large (>60s)");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.store.sensor_path, "Yog");
        assert_eq!(cfg.store.logs_path, "logs");
        assert_eq!(cfg.window.capacity, 20);
        assert_eq!(cfg.window.floor, 0.0);
        assert_eq!(cfg.window.ceiling, 30.0);
        assert!(!cfg.window.widen_to_bounds);
        assert_eq!(cfg.export.file_prefix, "temperature-logs");
        assert_eq!(cfg.logging.rotation, Rotation::Never);
        assert_eq!(cfg.dashboard.poll_ms, 50);
        cfg.validate().unwrap();
    }

    #[test]
    fn rotation_is_case_insensitive() {
        let cfg = load_toml("[logging]\nrotation = \"Daily\"\n").unwrap();
        assert_eq!(cfg.logging.rotation, Rotation::Daily);
    }

    #[test]
    fn unknown_rotation_is_a_parse_error() {
        let err = load_toml("[logging]\nrotation = \"weekly\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown rotation"));
    }
}
