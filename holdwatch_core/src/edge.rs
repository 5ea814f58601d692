//! Rising-edge detector over the sensor's hold flag.
//!
//! `observe` is a pure decision over (previous hold state, new snapshot); it
//! never touches the store. The caller persists whatever entry comes back.

use crate::types::{HoldLogEntry, SensorSnapshot};
use holdwatch_traits::WallClock;

pub struct HoldEdgeLogger<C> {
    clock: C,
    previous_hold: bool,
}

impl<C: WallClock> HoldEdgeLogger<C> {
    /// Starts with the hold flag considered released, so a sensor that is
    /// already held at startup produces an entry on its first observation.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            previous_hold: false,
        }
    }

    /// Feed one snapshot; returns an entry only on a false→true transition.
    pub fn observe(&mut self, snapshot: &SensorSnapshot) -> Option<HoldLogEntry> {
        let rising = snapshot.hold_active && !self.previous_hold;
        self.previous_hold = snapshot.hold_active;
        if !rising {
            return None;
        }
        let entry = HoldLogEntry::from_snapshot(snapshot, self.clock.now());
        tracing::info!(
            sensor = %entry.sensor_type,
            temperature = entry.temperature,
            date = %entry.date,
            time = %entry.time,
            "hold engaged"
        );
        Some(entry)
    }

    pub fn previous_hold(&self) -> bool {
        self.previous_hold
    }

    /// Forget the last observed state.
    pub fn reset(&mut self) {
        self.previous_hold = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use holdwatch_traits::ManualClock;

    fn snapshot(hold: bool) -> SensorSnapshot {
        SensorSnapshot {
            sensor_type: "PT100".into(),
            temperature: 24.5,
            decimal_precision: 1,
            hold_active: hold,
            battery: 90,
        }
    }

    fn clock() -> ManualClock {
        ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(7, 5, 3)
                .unwrap(),
        )
    }

    #[test]
    fn emits_on_rising_edges_only() {
        let mut logger = HoldEdgeLogger::new(clock());
        let fired: Vec<usize> = [false, true, true, false, true]
            .into_iter()
            .enumerate()
            .filter_map(|(i, h)| logger.observe(&snapshot(h)).map(|_| i))
            .collect();
        assert_eq!(fired, [1, 4]);
    }

    #[test]
    fn held_at_startup_fires_once() {
        let mut logger = HoldEdgeLogger::new(clock());
        assert!(logger.observe(&snapshot(true)).is_some());
        assert!(logger.observe(&snapshot(true)).is_none());
        assert!(logger.previous_hold());
    }

    #[test]
    fn entry_carries_clock_and_sensor_fields() {
        let clock = clock();
        let mut logger = HoldEdgeLogger::new(clock.clone());
        clock.advance(TimeDelta::seconds(57));
        let entry = logger.observe(&snapshot(true)).unwrap();
        assert_eq!(entry.id, "");
        assert_eq!(entry.date, "2024-03-09");
        assert_eq!(entry.time, "07:06:00");
        assert_eq!(entry.sensor_type, "PT100");
        assert_eq!(entry.temperature, 24.5);
        assert_eq!(entry.decimal_index, 1);
    }

    #[test]
    fn reset_rearms_the_edge() {
        let mut logger = HoldEdgeLogger::new(clock());
        assert!(logger.observe(&snapshot(true)).is_some());
        logger.reset();
        assert!(!logger.previous_hold());
        assert!(logger.observe(&snapshot(true)).is_some());
    }
}
