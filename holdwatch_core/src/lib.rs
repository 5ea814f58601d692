#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core hold-monitoring logic (store-agnostic).
//!
//! All collaborator interactions go through `holdwatch_traits::DataStore`,
//! `holdwatch_traits::AuthProvider` and `holdwatch_traits::WallClock`.
//!
//! ## Architecture
//!
//! - **Records**: wire form of sensor and log records (`record` module)
//! - **Edge logging**: one log entry per rising edge of the hold flag (`edge`)
//! - **Chart window**: last N samples and the axis range (`window`)
//! - **Export**: CSV rendering of the hold log (`export`)
//! - **View**: subscriptions, notification loop and state (`dashboard`)

pub mod config;
pub mod conversions;
pub mod dashboard;
pub mod display;
pub mod edge;
pub mod error;
pub mod export;
pub mod mocks;
pub mod record;
pub mod subscription;
pub mod types;
pub mod window;

pub use config::{ExportCfg, LoopCfg, StorePaths, WindowCfg};
pub use dashboard::{Dashboard, DashboardBuilder, DashboardStats, Notification, SensorView};
pub use edge::HoldEdgeLogger;
pub use error::{BuildError, HoldwatchError};
pub use export::{CSV_HEADER, export_file_name, to_csv, write_export};
pub use record::{decode_log_entries, decode_snapshot, log_record};
pub use subscription::Subscription;
pub use types::{HoldLogEntry, SamplePoint, SensorSnapshot};
pub use window::{ChartRange, SampleWindow, range};
