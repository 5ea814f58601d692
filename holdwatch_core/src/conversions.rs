//! `From` implementations bridging `holdwatch_config` types to `holdwatch_core` types.

use crate::config::{ExportCfg, LoopCfg, StorePaths, WindowCfg};
use std::time::Duration;

// ── WindowCfg ────────────────────────────────────────────────────────────────

impl From<&holdwatch_config::WindowCfg> for WindowCfg {
    fn from(c: &holdwatch_config::WindowCfg) -> Self {
        Self {
            capacity: c.capacity,
            floor: c.floor,
            ceiling: c.ceiling,
            widen_to_bounds: c.widen_to_bounds,
        }
    }
}

// ── StorePaths ───────────────────────────────────────────────────────────────

impl From<&holdwatch_config::StoreCfg> for StorePaths {
    fn from(c: &holdwatch_config::StoreCfg) -> Self {
        Self {
            sensor: c.sensor_path.clone(),
            logs: c.logs_path.clone(),
        }
    }
}

// ── ExportCfg ────────────────────────────────────────────────────────────────

impl From<&holdwatch_config::ExportCfg> for ExportCfg {
    fn from(c: &holdwatch_config::ExportCfg) -> Self {
        Self {
            file_prefix: c.file_prefix.clone(),
        }
    }
}

// ── LoopCfg ──────────────────────────────────────────────────────────────────

impl From<&holdwatch_config::DashboardCfg> for LoopCfg {
    fn from(c: &holdwatch_config::DashboardCfg) -> Self {
        Self {
            poll: Duration::from_millis(c.poll_ms.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_agree_with_config_crate() {
        let cfg = holdwatch_config::Config::default();
        assert_eq!(WindowCfg::from(&cfg.window), WindowCfg::default());
        assert_eq!(StorePaths::from(&cfg.store), StorePaths::default());
        assert_eq!(ExportCfg::from(&cfg.export), ExportCfg::default());
        assert_eq!(LoopCfg::from(&cfg.dashboard), LoopCfg::default());
    }
}
