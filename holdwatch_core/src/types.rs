//! Dashboard data model.

use chrono::NaiveDateTime;

/// Latest reading published by the sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSnapshot {
    pub sensor_type: String,
    pub temperature: f64,
    /// Decimal places to show for `temperature`.
    pub decimal_precision: u32,
    pub hold_active: bool,
    /// Battery charge in percent.
    pub battery: u8,
}

/// One persisted hold event. `id` is empty until the store assigns a key.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldLogEntry {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    pub sensor_type: String,
    pub temperature: f64,
    pub decimal_index: u32,
}

impl HoldLogEntry {
    /// Stamp a snapshot's sensor fields with the given wall-clock instant.
    pub fn from_snapshot(snapshot: &SensorSnapshot, at: NaiveDateTime) -> Self {
        Self {
            id: String::new(),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M:%S").to_string(),
            sensor_type: snapshot.sensor_type.clone(),
            temperature: snapshot.temperature,
            decimal_index: snapshot.decimal_precision,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A chart sample. Lives only in the sliding window.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoint {
    pub timestamp: String,
    pub temperature: f64,
}

impl SamplePoint {
    pub fn new(timestamp: impl Into<String>, temperature: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature,
        }
    }
}
