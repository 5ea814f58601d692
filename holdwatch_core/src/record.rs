//! Wire form of store records.
//!
//! Sensor path value:
//! {"Sensor": "PT100", "Temperature": 24.5, "Decimal Index": 1, "Hold Active": false, "Battery": 87}
//!
//! Logs path value (keyed by store-generated id):
//! {"<id>": {"date": "2024-03-09", "time": "07:05:03", "sensorType": "PT100",
//!           "temperature": 24.5, "decimalIndex": 1}, ...}
//!
//! Records missing `Temperature` or `Hold Active` are rejected rather than
//! defaulted; the other sensor fields fall back to empty/zero.

use crate::error::HoldwatchError;
use crate::types::{HoldLogEntry, SensorSnapshot};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct SensorRecord {
    #[serde(rename = "Sensor", default, deserialize_with = "de_lenient_string")]
    sensor: String,
    #[serde(rename = "Temperature")]
    temperature: f64,
    #[serde(rename = "Decimal Index", default, deserialize_with = "de_lenient_u32")]
    decimal_index: u32,
    #[serde(rename = "Hold Active")]
    hold_active: bool,
    #[serde(rename = "Battery", default, deserialize_with = "de_lenient_u8")]
    battery: u8,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogRecord {
    date: String,
    time: String,
    #[serde(default, deserialize_with = "de_lenient_string")]
    sensor_type: String,
    temperature: f64,
    #[serde(default, deserialize_with = "de_lenient_u32")]
    decimal_index: u32,
}

// Display-only fields never reject a record: numbers may arrive as integers,
// floats or numeric strings, and anything else falls back to zero.
fn lenient_number(v: Option<Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|x| x.is_finite())
}

fn de_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Option::deserialize(deserializer)?;
    Ok(lenient_number(v)
        .map(|x| x.round().clamp(0.0, f64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}

fn de_lenient_u8<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Option::deserialize(deserializer)?;
    Ok(lenient_number(v)
        .map(|x| x.round().clamp(0.0, f64::from(u8::MAX)) as u8)
        .unwrap_or(0))
}

// Numbers and booleans are shown as written; objects, arrays and null are blank.
fn de_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Decode the value at the sensor path.
pub fn decode_snapshot(value: &Value) -> Result<SensorSnapshot, HoldwatchError> {
    let rec = SensorRecord::deserialize(value).map_err(|e| HoldwatchError::Decode(e.to_string()))?;
    Ok(SensorSnapshot {
        sensor_type: rec.sensor,
        temperature: rec.temperature,
        decimal_precision: rec.decimal_index,
        hold_active: rec.hold_active,
        battery: rec.battery,
    })
}

fn decode_log_entry(id: String, value: &Value) -> Option<HoldLogEntry> {
    match LogRecord::deserialize(value) {
        Ok(rec) => Some(HoldLogEntry {
            id,
            date: rec.date,
            time: rec.time,
            sensor_type: rec.sensor_type,
            temperature: rec.temperature,
            decimal_index: rec.decimal_index,
        }),
        Err(e) => {
            tracing::warn!(%id, error = %e, "skipping malformed log record");
            None
        }
    }
}

/// Decode the value at the logs path into display order (newest first).
///
/// The store delivers children oldest first; objects are keyed by generated
/// id, arrays (dense integer keys) use the index as id.
pub fn decode_log_entries(value: &Value) -> Vec<HoldLogEntry> {
    let mut entries: Vec<HoldLogEntry> = match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(id, rec)| decode_log_entry(id.clone(), rec))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, rec)| !rec.is_null())
            .filter_map(|(idx, rec)| decode_log_entry(idx.to_string(), rec))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(kind = value_kind(other), "logs path is not a collection; ignoring");
            Vec::new()
        }
    };
    entries.reverse();
    entries
}

/// Record appended under the logs path for a new hold event. The id is not
/// part of the record; the store assigns it as the child key.
pub fn log_record(entry: &HoldLogEntry) -> Map<String, Value> {
    let rec = LogRecord {
        date: entry.date.clone(),
        time: entry.time.clone(),
        sensor_type: entry.sensor_type.clone(),
        temperature: entry.temperature,
        decimal_index: entry.decimal_index,
    };
    match serde_json::to_value(rec) {
        Ok(Value::Object(m)) => m,
        other => {
            tracing::warn!(?other, "log record did not serialize to an object");
            Map::new()
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_sensor_record() {
        let v = json!({
            "Sensor": "PT100",
            "Temperature": 24.5,
            "Decimal Index": 1,
            "Hold Active": true,
            "Battery": 87,
            "date": "2024-03-09",
            "time": "07:05:03"
        });
        let s = decode_snapshot(&v).unwrap();
        assert_eq!(s.sensor_type, "PT100");
        assert_eq!(s.temperature, 24.5);
        assert_eq!(s.decimal_precision, 1);
        assert!(s.hold_active);
        assert_eq!(s.battery, 87);
    }

    #[test]
    fn optional_sensor_fields_default() {
        let v = json!({ "Temperature": 21, "Hold Active": false, "Battery": null });
        let s = decode_snapshot(&v).unwrap();
        assert_eq!(s.sensor_type, "");
        assert_eq!(s.temperature, 21.0);
        assert_eq!(s.decimal_precision, 0);
        assert_eq!(s.battery, 0);
    }

    #[test]
    fn numeric_fields_are_clamped() {
        let v = json!({ "Temperature": 1.0, "Hold Active": false, "Battery": 300, "Decimal Index": -2 });
        let s = decode_snapshot(&v).unwrap();
        assert_eq!(s.battery, 255);
        assert_eq!(s.decimal_precision, 0);
    }

    #[test]
    fn mistyped_display_fields_fall_back_without_dropping_the_record() {
        let v = json!({ "Sensor": "PT100", "Temperature": 24.5, "Hold Active": true, "Battery": "87" });
        let s = decode_snapshot(&v).unwrap();
        assert_eq!(s.battery, 87);
        assert!(s.hold_active);

        let v = json!({ "Sensor": 100, "Temperature": 24.5, "Decimal Index": "1", "Hold Active": true });
        let s = decode_snapshot(&v).unwrap();
        assert_eq!(s.sensor_type, "100");
        assert_eq!(s.decimal_precision, 1);

        let v = json!({
            "Sensor": { "name": "PT100" },
            "Temperature": 24.5,
            "Decimal Index": [1],
            "Hold Active": false,
            "Battery": "full"
        });
        let s = decode_snapshot(&v).unwrap();
        assert_eq!(s.sensor_type, "");
        assert_eq!(s.decimal_precision, 0);
        assert_eq!(s.battery, 0);
    }

    #[test]
    fn missing_hold_or_temperature_is_rejected() {
        assert!(decode_snapshot(&json!({ "Temperature": 20.0 })).is_err());
        assert!(decode_snapshot(&json!({ "Hold Active": true })).is_err());
        assert!(decode_snapshot(&json!({ "Temperature": null, "Hold Active": true })).is_err());
        assert!(decode_snapshot(&json!({ "Temperature": "hot", "Hold Active": true })).is_err());
        assert!(decode_snapshot(&json!(42)).is_err());
    }

    #[test]
    fn log_entries_come_back_newest_first() {
        let v = json!({
            "k0001": { "date": "2024-03-09", "time": "07:00:00", "sensorType": "PT100", "temperature": 20.0, "decimalIndex": 1 },
            "k0002": { "date": "2024-03-09", "time": "08:00:00", "sensorType": "PT100", "temperature": 21.5, "decimalIndex": 1 },
            "k0003": { "date": "2024-03-09", "time": "09:00:00", "sensorType": "PT100", "temperature": 22.0, "decimalIndex": 2 }
        });
        let entries = decode_log_entries(&v);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["k0003", "k0002", "k0001"]);
        assert_eq!(entries[0].decimal_index, 2);
    }

    #[test]
    fn malformed_log_records_are_skipped_individually() {
        let v = json!({
            "a": { "date": "2024-03-09", "time": "07:00:00", "sensorType": "PT100", "temperature": 20.0, "decimalIndex": 1 },
            "b": { "date": "2024-03-09" },
            "c": "garbage"
        });
        let entries = decode_log_entries(&v);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "a");
    }

    #[test]
    fn array_shaped_logs_use_index_ids() {
        let v = json!([
            null,
            { "date": "2024-03-09", "time": "07:00:00", "sensorType": "K", "temperature": 1.0, "decimalIndex": 0 },
            { "date": "2024-03-09", "time": "07:00:05", "sensorType": "K", "temperature": 2.0, "decimalIndex": 0 }
        ]);
        let entries = decode_log_entries(&v);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn scalar_logs_value_yields_nothing() {
        assert!(decode_log_entries(&json!("nope")).is_empty());
        assert!(decode_log_entries(&Value::Null).is_empty());
    }

    #[test]
    fn log_record_uses_wire_field_names() {
        let entry = HoldLogEntry {
            id: "ignored".into(),
            date: "2024-03-09".into(),
            time: "07:05:03".into(),
            sensor_type: "PT100".into(),
            temperature: 25.0,
            decimal_index: 2,
        };
        let rec = log_record(&entry);
        let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
        assert_eq!(keys, ["date", "decimalIndex", "sensorType", "temperature", "time"]);
        assert_eq!(rec["temperature"], 25.0);
    }

    #[test]
    fn log_entries_tolerate_mistyped_display_fields() {
        let v = json!({
            "a": { "date": "2024-03-09", "time": "07:00:00", "sensorType": 7, "temperature": 20.0, "decimalIndex": "2" }
        });
        let entries = decode_log_entries(&v);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sensor_type, "7");
        assert_eq!(entries[0].decimal_index, 2);
    }

    #[test]
    fn log_record_round_trips_through_decode() {
        let entry = HoldLogEntry {
            id: String::new(),
            date: "2024-03-09".into(),
            time: "07:05:03".into(),
            sensor_type: "PT100".into(),
            temperature: 24.5,
            decimal_index: 1,
        };
        let rec = Value::Object(log_record(&entry));
        assert_eq!(rec["sensorType"], "PT100");
        assert_eq!(rec["decimalIndex"], 1);
        let back = decode_log_entries(&json!({ "x": rec }));
        assert_eq!(back, vec![entry.with_id("x")]);
    }
}
