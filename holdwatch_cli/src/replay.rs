//! `replay` and `export` commands: drive a dashboard from a recorded feed.

use holdwatch_core::display::{render_chart_summary, render_log_table, render_status};
use holdwatch_core::{
    Dashboard, ExportCfg, HoldwatchError, LoopCfg, StorePaths, WindowCfg, decode_log_entries,
    write_export,
};
use holdwatch_store::{LocalAuth, MemoryStore};
use holdwatch_traits::{AuthProvider, Credentials, LocalClock, WallClock};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Outcome of one replay, printed as a JSON line in `--json` mode.
#[derive(Debug)]
pub struct ReplaySummary {
    pub published: usize,
    pub skipped_lines: usize,
    pub snapshots: u64,
    pub dropped_records: u64,
    pub hold_events: u64,
    pub failed_appends: u64,
    pub logs: usize,
    pub range: (f64, f64),
    pub export: Option<PathBuf>,
    pub signed_out: bool,
}

impl ReplaySummary {
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "timestamp": chrono::Utc::now().timestamp(),
            "published": self.published,
            "skipped_lines": self.skipped_lines,
            "snapshots": self.snapshots,
            "dropped_records": self.dropped_records,
            "hold_events": self.hold_events,
            "failed_appends": self.failed_appends,
            "logs": self.logs,
            "range": [self.range.0, self.range.1],
            "export": self.export.as_ref().map(|p| p.display().to_string()),
            "signed_out": self.signed_out,
        })
    }
}

/// Parse a JSON-lines feed. Blank lines and `#` comments are ignored; lines
/// that are not valid JSON are skipped with a warning.
pub fn parse_feed(text: &str) -> (Vec<Value>, usize) {
    let mut values = Vec::new();
    let mut skipped = 0;
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(v) => values.push(v),
            Err(e) => {
                skipped += 1;
                tracing::warn!(line = idx + 1, error = %e, "skipping unparseable feed line");
            }
        }
    }
    (values, skipped)
}

pub fn run_replay(
    cfg: &holdwatch_config::Config,
    feed: &Path,
    email: &str,
    export_dir: Option<&Path>,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
    json: bool,
) -> eyre::Result<ReplaySummary> {
    let text = std::fs::read_to_string(feed)
        .map_err(|e| HoldwatchError::Io(format!("read feed {}: {e}", feed.display())))?;
    let (records, skipped_lines) = parse_feed(&text);
    tracing::info!(feed = %feed.display(), records = records.len(), skipped_lines, "feed loaded");

    let auth = LocalAuth::permissive();
    let session = auth
        .sign_in(&Credentials {
            email: email.to_string(),
            password: String::new(),
        })
        .map_err(HoldwatchError::from)?;
    tracing::info!(user = %session.user_id, "signed in");

    let paths: StorePaths = (&cfg.store).into();
    let window: WindowCfg = (&cfg.window).into();
    let export: ExportCfg = (&cfg.export).into();
    let pacing: LoopCfg = (&cfg.dashboard).into();

    let store = Arc::new(MemoryStore::new());
    let mut dash = Dashboard::builder()
        .with_store(store.clone())
        .with_session(Some(session))
        .with_paths(paths.clone())
        .with_window(window)
        .build()?;

    let feeder = {
        let store = store.clone();
        let shutdown = shutdown.clone();
        let sensor_path = paths.sensor.clone();
        std::thread::Builder::new()
            .name("holdwatch-feed".into())
            .spawn(move || -> Result<usize, HoldwatchError> {
                let mut sent = 0;
                let mut outcome = Ok(());
                for record in records {
                    if shutdown.load(Ordering::Relaxed) {
                        tracing::info!(sent, "replay interrupted");
                        break;
                    }
                    if let Err(e) = store.set(&sensor_path, record) {
                        outcome = Err(e);
                        break;
                    }
                    sent += 1;
                    if !interval.is_zero() {
                        std::thread::sleep(interval);
                    }
                }
                // The dashboard loop exits on this flag, so raise it on every path.
                shutdown.store(true, Ordering::Release);
                outcome?;
                Ok(sent)
            })
            .map_err(|e| HoldwatchError::Io(format!("spawn feed thread: {e}")))?
    };

    let handled = dash.run(&shutdown, pacing.poll);
    let sent = feeder
        .join()
        .map_err(|_| HoldwatchError::Io("feed thread panicked".to_string()))??;
    tracing::debug!(handled, sent, "replay drained");

    if !json {
        println!("{}", render_status(dash.view()));
        println!("{}", render_chart_summary(dash.window()));
        println!("{}", render_log_table(dash.logs()));
    }

    let export_path = match export_dir {
        Some(dir) => {
            let path = dash.export_to(dir, &export.file_prefix)?;
            if !json {
                println!("Exported {}", path.display());
            }
            Some(path)
        }
        None => None,
    };

    let stats = dash.stats();
    let logs = dash.logs().len();
    let range = dash.chart_range().as_tuple();
    let signed_out = dash.sign_out(&auth);

    Ok(ReplaySummary {
        published: sent,
        skipped_lines,
        snapshots: stats.snapshots,
        dropped_records: stats.dropped_records,
        hold_events: stats.hold_events,
        failed_appends: stats.failed_appends,
        logs,
        range,
        export: export_path,
        signed_out,
    })
}

/// Write the CSV export for a JSON dump of the logs path.
pub fn run_export(cfg: &holdwatch_config::Config, logs: &Path, out: &Path) -> eyre::Result<PathBuf> {
    let text = std::fs::read_to_string(logs)
        .map_err(|e| HoldwatchError::Io(format!("read logs {}: {e}", logs.display())))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| HoldwatchError::Decode(format!("{}: {e}", logs.display())))?;
    let entries = decode_log_entries(&value);
    let date = LocalClock::new().now().date();
    let path = write_export(out, &cfg.export.file_prefix, date, &entries)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_skips_blank_comment_and_bad_lines() {
        let text = "# header\n{\"Temperature\": 1}\n\nnot json\n{\"Temperature\": 2}\n";
        let (values, skipped) = parse_feed(text);
        assert_eq!(values.len(), 2);
        assert_eq!(skipped, 1);
    }
}
