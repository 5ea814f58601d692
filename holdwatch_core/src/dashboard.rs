//! The dashboard view: owns both store subscriptions, the hold-edge logger and
//! the chart window for as long as the view lives.
//!
//! Store callbacks only forward raw values into a channel. All state changes
//! happen on whichever thread drains it (`process_pending` / `run`), so the
//! logger and window are never touched concurrently.

use crate::config::{StorePaths, WindowCfg};
use crate::edge::HoldEdgeLogger;
use crate::error::{BuildError, HoldwatchError, Result};
use crate::export::{to_csv, write_export};
use crate::record::{decode_log_entries, decode_snapshot, log_record};
use crate::subscription::Subscription;
use crate::types::{HoldLogEntry, SamplePoint, SensorSnapshot};
use crate::window::{ChartRange, SampleWindow};
use crossbeam_channel as xch;
use holdwatch_traits::{AuthProvider, DataStore, LocalClock, Session, WallClock};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

type SharedClock = Arc<dyn WallClock + Send + Sync>;

/// A raw change delivered by one of the two subscriptions.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Sensor(Option<Value>),
    Logs(Option<Value>),
}

/// What the status cards should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorView<'a> {
    /// No snapshot received yet.
    Loading,
    Ready(&'a SensorSnapshot),
}

/// Counters for the lifetime of one dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub snapshots: u64,
    pub dropped_records: u64,
    pub hold_events: u64,
    pub failed_appends: u64,
}

pub struct Dashboard {
    store: Arc<dyn DataStore>,
    clock: SharedClock,
    session: Option<Session>,
    paths: StorePaths,
    logger: HoldEdgeLogger<SharedClock>,
    window: SampleWindow,
    latest: Option<SensorSnapshot>,
    logs: Vec<HoldLogEntry>,
    stats: DashboardStats,
    rx: xch::Receiver<Notification>,
    sensor_sub: Subscription,
    logs_sub: Subscription,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("session", &self.session)
            .field("paths", &self.paths)
            .field("samples", &self.window.len())
            .field("logs", &self.logs.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Apply one notification.
    pub fn handle(&mut self, notification: Notification) {
        match notification {
            Notification::Sensor(v) => self.on_sensor(v),
            Notification::Logs(v) => self.on_logs(v),
        }
    }

    /// Apply every queued notification, including ones queued while draining.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(n) = self.rx.try_recv() {
            self.handle(n);
            handled += 1;
        }
        handled
    }

    /// Block on notifications until `shutdown` is raised, then drain what is
    /// left and return. `poll` bounds how long a raised flag goes unnoticed.
    pub fn run(&mut self, shutdown: &AtomicBool, poll: Duration) -> usize {
        let mut handled = 0;
        loop {
            if shutdown.load(Ordering::Acquire) {
                handled += self.process_pending();
                tracing::debug!(handled, "dashboard loop received shutdown signal");
                break;
            }
            match self.rx.recv_timeout(poll) {
                Ok(n) => {
                    self.handle(n);
                    handled += 1;
                }
                Err(xch::RecvTimeoutError::Timeout) => {}
                Err(xch::RecvTimeoutError::Disconnected) => {
                    tracing::debug!("all subscriptions released, leaving dashboard loop");
                    break;
                }
            }
        }
        handled
    }

    fn on_sensor(&mut self, value: Option<Value>) {
        let Some(value) = value else {
            tracing::debug!(path = %self.paths.sensor, "sensor path empty; still loading");
            return;
        };
        let snapshot = match decode_snapshot(&value) {
            Ok(s) => s,
            Err(e) => {
                self.stats.dropped_records += 1;
                tracing::warn!(path = %self.paths.sensor, error = %e, "dropping sensor record");
                return;
            }
        };
        self.stats.snapshots += 1;
        tracing::debug!(
            sensor = %snapshot.sensor_type,
            temperature = snapshot.temperature,
            hold = snapshot.hold_active,
            battery = snapshot.battery,
            "sensor snapshot"
        );

        if let Some(entry) = self.logger.observe(&snapshot) {
            self.persist(entry);
        }
        self.window.push(SamplePoint::new(
            self.clock.time_string(),
            snapshot.temperature,
        ));
        self.latest = Some(snapshot);
    }

    fn persist(&mut self, entry: HoldLogEntry) {
        self.stats.hold_events += 1;
        match self.store.append(&self.paths.logs, log_record(&entry)) {
            Ok(id) => tracing::debug!(%id, path = %self.paths.logs, "hold event appended"),
            Err(e) => {
                // A lost entry is tolerated; the edge state has already advanced.
                self.stats.failed_appends += 1;
                tracing::warn!(path = %self.paths.logs, error = %e, "failed to append hold event");
            }
        }
    }

    fn on_logs(&mut self, value: Option<Value>) {
        match value {
            Some(v) => {
                self.logs = decode_log_entries(&v);
                tracing::debug!(entries = self.logs.len(), "hold log updated");
            }
            None => tracing::debug!(path = %self.paths.logs, "logs path empty"),
        }
    }

    pub fn view(&self) -> SensorView<'_> {
        match &self.latest {
            Some(s) => SensorView::Ready(s),
            None => SensorView::Loading,
        }
    }

    /// Hold log in display order (newest first).
    pub fn logs(&self) -> &[HoldLogEntry] {
        &self.logs
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn chart_range(&self) -> ChartRange {
        self.window.range()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// CSV text of the log in display order.
    pub fn export_csv(&self) -> std::result::Result<String, HoldwatchError> {
        to_csv(&self.logs)
    }

    /// Write the CSV export into `dir`, dated with today's date.
    pub fn export_to(&self, dir: &Path, prefix: &str) -> std::result::Result<PathBuf, HoldwatchError> {
        write_export(dir, prefix, self.clock.now().date(), &self.logs)
    }

    /// Sign out through `auth`. On failure the dashboard stays as it is.
    pub fn sign_out(&mut self, auth: &dyn AuthProvider) -> bool {
        match auth.sign_out() {
            Ok(()) => {
                if let Some(s) = self.session.take() {
                    tracing::info!(email = %s.email, "signed out");
                }
                self.close();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to sign out; staying on dashboard");
                false
            }
        }
    }

    /// Release both subscriptions. Safe to call more than once.
    pub fn close(&mut self) {
        self.sensor_sub.stop();
        self.logs_sub.stop();
    }

    pub fn is_open(&self) -> bool {
        self.sensor_sub.is_active() || self.logs_sub.is_active()
    }
}

/// Builder for `Dashboard`. Only the store is required.
#[derive(Default)]
pub struct DashboardBuilder {
    store: Option<Arc<dyn DataStore>>,
    clock: Option<SharedClock>,
    session: Option<Session>,
    paths: Option<StorePaths>,
    window: Option<WindowCfg>,
}

impl DashboardBuilder {
    pub fn with_store(mut self, store: Arc<dyn DataStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: impl WallClock + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn with_paths(mut self, paths: StorePaths) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_window(mut self, window: WindowCfg) -> Self {
        self.window = Some(window);
        self
    }

    /// Subscribe to the sensor and logs paths and return the live view.
    pub fn build(self) -> Result<Dashboard> {
        let store = self
            .store
            .ok_or_else(|| eyre::Report::new(BuildError::MissingStore))?;
        let paths = self.paths.unwrap_or_default();
        if paths.sensor.trim_matches('/') == paths.logs.trim_matches('/') {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "sensor and logs paths must differ",
            )));
        }
        let clock: SharedClock = self.clock.unwrap_or_else(|| Arc::new(LocalClock::new()));
        let window = SampleWindow::new(self.window.unwrap_or_default());

        let (tx, rx) = xch::unbounded();
        let sensor_tx = tx.clone();
        let sensor_sub = Subscription::start(
            store.clone(),
            &paths.sensor,
            Arc::new(move |v: Option<Value>| {
                if sensor_tx.send(Notification::Sensor(v)).is_err() {
                    tracing::trace!("dashboard gone, dropping sensor notification");
                }
            }),
        )
        .map_err(HoldwatchError::from)?;
        let logs_sub = Subscription::start(
            store.clone(),
            &paths.logs,
            Arc::new(move |v: Option<Value>| {
                if tx.send(Notification::Logs(v)).is_err() {
                    tracing::trace!("dashboard gone, dropping logs notification");
                }
            }),
        )
        .map_err(HoldwatchError::from)?;

        if let Some(s) = &self.session {
            tracing::info!(email = %s.email, sensor = %paths.sensor, logs = %paths.logs, "dashboard opened");
        }

        Ok(Dashboard {
            store,
            logger: HoldEdgeLogger::new(clock.clone()),
            clock,
            session: self.session,
            paths,
            window,
            latest: None,
            logs: Vec::new(),
            stats: DashboardStats::default(),
            rx,
            sensor_sub,
            logs_sub,
        })
    }
}
