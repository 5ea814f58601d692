//! CSV export of the hold log.
//!
//! Header:
//! Date,Time,Sensor Type,Temperature (°C),Decimal Index
//!
//! Rows follow display order (newest first), are joined by `\n` with no
//! trailing newline, and fields are written verbatim (no quoting).

use crate::error::HoldwatchError;
use crate::types::HoldLogEntry;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 5] = [
    "Date",
    "Time",
    "Sensor Type",
    "Temperature (°C)",
    "Decimal Index",
];

/// Render `entries` as CSV text.
pub fn to_csv(entries: &[HoldLogEntry]) -> Result<String, HoldwatchError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    let export_err = |e: csv::Error| HoldwatchError::Export(e.to_string());

    wtr.write_record(CSV_HEADER).map_err(export_err)?;
    for e in entries {
        let temperature = e.temperature.to_string();
        let decimal_index = e.decimal_index.to_string();
        wtr.write_record([
            e.date.as_str(),
            e.time.as_str(),
            e.sensor_type.as_str(),
            temperature.as_str(),
            decimal_index.as_str(),
        ])
        .map_err(export_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| HoldwatchError::Export(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| HoldwatchError::Export(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// `<prefix>-<YYYY-MM-DD>.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export into `dir`, returning the file path.
pub fn write_export(
    dir: &Path,
    prefix: &str,
    date: NaiveDate,
    entries: &[HoldLogEntry],
) -> Result<PathBuf, HoldwatchError> {
    let text = to_csv(entries)?;
    let path = dir.join(export_file_name(prefix, date));
    std::fs::write(&path, text)
        .map_err(|e| HoldwatchError::Io(format!("write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = entries.len(), "hold log exported");
    Ok(path)
}
