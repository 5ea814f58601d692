//! Runtime configuration types for the dashboard.
//!
//! These are the plain structs the core works with. They are separate from
//! the TOML-deserialized config in `holdwatch_config`.

use std::time::Duration;

/// Chart window sizing and axis defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCfg {
    /// Most recent samples kept (clamped to at least 1).
    pub capacity: usize,
    /// Axis minimum reported while the window is empty.
    pub floor: f64,
    /// Axis maximum reported while the window is empty.
    pub ceiling: f64,
    /// Fold floor/ceiling into the range even when samples are present.
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

/// Store locations the dashboard reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub sensor: String,
    pub logs: String,
}

impl Default for StorePaths {
    fn default() -> Self {
        Self {
            sensor: "Yog".to_string(),
            logs: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCfg {
    pub file_prefix: String,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self {
            file_prefix: "temperature-logs".to_string(),
        }
    }
}

/// Notification loop pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopCfg {
    /// Max wait for a notification before re-checking the shutdown flag.
    pub poll: Duration,
}

impl Default for LoopCfg {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(50),
        }
    }
}
