use chrono::{Local, NaiveDateTime, TimeDelta};
use std::sync::{Arc, Mutex};

/// Wall-clock abstraction used to stamp hold events and chart samples.
///
/// - now(): returns the local wall-clock date and time
/// - date_string(): ISO calendar date, `YYYY-MM-DD`
/// - time_string(): 24h time of day, `HH:MM:SS`
pub trait WallClock {
    fn now(&self) -> NaiveDateTime;

    fn date_string(&self) -> String {
        self.now().format("%Y-%m-%d").to_string()
    }

    fn time_string(&self) -> String {
        self.now().format("%H:%M:%S").to_string()
    }
}

impl<T: WallClock + ?Sized> WallClock for Arc<T> {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<T: WallClock + ?Sized> WallClock for Box<T> {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Default clock backed by the host's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl LocalClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl WallClock for LocalClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Deterministic clock whose time only moves when told to.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and hand another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    at: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            at: Arc::new(Mutex::new(at)),
        }
    }

    /// Advance the clock by the given delta (saturating at the chrono range).
    pub fn advance(&self, d: TimeDelta) {
        if let Ok(mut at) = self.at.lock()
            && let Some(next) = at.checked_add_signed(d)
        {
            *at = next;
        }
    }

    /// Set the absolute instant.
    pub fn set(&self, at: NaiveDateTime) {
        if let Ok(mut cur) = self.at.lock() {
            *cur = at;
        }
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.at
            .lock()
            .map(|g| *g)
            .unwrap_or(NaiveDateTime::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn manual_clock_formats_date_and_time() {
        let clock = ManualClock::new(at(7, 5, 3));
        assert_eq!(clock.date_string(), "2024-03-09");
        assert_eq!(clock.time_string(), "07:05:03");
    }

    #[test]
    fn clones_share_the_same_instant() {
        let clock = ManualClock::new(at(23, 59, 59));
        let handle = clock.clone();
        handle.advance(TimeDelta::seconds(2));
        assert_eq!(clock.date_string(), "2024-03-10");
        assert_eq!(clock.time_string(), "00:00:01");
    }

    #[test]
    fn arc_dyn_clock_delegates() {
        let clock: Arc<dyn WallClock + Send + Sync> = Arc::new(ManualClock::new(at(12, 0, 0)));
        assert_eq!(clock.time_string(), "12:00:00");
    }
}
