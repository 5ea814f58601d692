//! Plain-text rendering of the status cards, chart summary and hold log.

use crate::dashboard::SensorView;
use crate::types::HoldLogEntry;
use crate::window::SampleWindow;

/// Temperature with the sensor's own precision, e.g. `24.50°C`.
pub fn format_temperature(temperature: f64, decimals: u32) -> String {
    // Cap precision; the decimal index comes straight off the wire.
    let decimals = decimals.min(10) as usize;
    format!("{temperature:.decimals$}°C")
}

#[inline]
pub fn hold_label(active: bool) -> &'static str {
    if active { "ON" } else { "OFF" }
}

pub fn render_status(view: SensorView<'_>) -> String {
    match view {
        SensorView::Loading => "Loading sensor data...".to_string(),
        SensorView::Ready(s) => format!(
            "Sensor: {} | Temperature: {} | Decimal Index: {} | Hold: {} | Battery: {}%",
            s.sensor_type,
            format_temperature(s.temperature, s.decimal_precision),
            s.decimal_precision,
            hold_label(s.hold_active),
            s.battery
        ),
    }
}

pub fn render_chart_summary(window: &SampleWindow) -> String {
    let (Some(first), Some(latest)) = (window.first(), window.latest()) else {
        return "Waiting for temperature data...".to_string();
    };
    let range = window.range();
    format!(
        "Live data (last {} readings) | range {:.1}°C..{:.1}°C | current {:.1}°C | first {} | latest {}",
        window.len(),
        range.min,
        range.max,
        latest.temperature,
        first.timestamp,
        latest.timestamp
    )
}

pub fn render_log_table(entries: &[HoldLogEntry]) -> String {
    if entries.is_empty() {
        return "No hold events logged yet".to_string();
    }
    let mut out = format!(
        "{:<10}  {:<8}  {:<12}  {:>12}  {}\n",
        "Date", "Time", "Sensor Type", "Temperature", "Decimal Index"
    );
    for e in entries {
        out.push_str(&format!(
            "{:<10}  {:<8}  {:<12}  {:>12}  {}\n",
            e.date,
            e.time,
            e.sensor_type,
            format_temperature(e.temperature, 2),
            e.decimal_index
        ));
    }
    out.push_str(&format!("Total logs: {}", entries.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SamplePoint, SensorSnapshot};

    #[test]
    fn temperature_uses_decimal_index() {
        assert_eq!(format_temperature(24.456, 2), "24.46°C");
        assert_eq!(format_temperature(24.456, 0), "24°C");
    }

    #[test]
    fn status_shows_loading_until_first_snapshot() {
        assert_eq!(render_status(SensorView::Loading), "Loading sensor data...");
        let s = SensorSnapshot {
            sensor_type: "PT100".into(),
            temperature: 24.5,
            decimal_precision: 1,
            hold_active: true,
            battery: 80,
        };
        let line = render_status(SensorView::Ready(&s));
        assert!(line.contains("24.5°C"));
        assert!(line.contains("Hold: ON"));
        assert!(line.contains("Battery: 80%"));
    }

    #[test]
    fn chart_summary_reports_window() {
        let mut w = SampleWindow::with_capacity(5);
        assert_eq!(render_chart_summary(&w), "Waiting for temperature data...");
        w.push(SamplePoint::new("10:00:00", 20.0));
        w.push(SamplePoint::new("10:00:01", 22.0));
        let line = render_chart_summary(&w);
        assert!(line.contains("last 2 readings"));
        assert!(line.contains("20.0°C..22.0°C"));
        assert!(line.contains("first 10:00:00"));
    }

    #[test]
    fn log_table_counts_rows() {
        assert_eq!(render_log_table(&[]), "No hold events logged yet");
        let e = HoldLogEntry {
            id: "k1".into(),
            date: "2024-03-09".into(),
            time: "07:05:03".into(),
            sensor_type: "PT100".into(),
            temperature: 24.5,
            decimal_index: 1,
        };
        let table = render_log_table(&[e]);
        assert!(table.contains("24.50°C"));
        assert!(table.ends_with("Total logs: 1"));
    }
}
