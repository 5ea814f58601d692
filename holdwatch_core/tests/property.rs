use chrono::NaiveDate;
use holdwatch_core::{HoldEdgeLogger, SampleWindow, SamplePoint, SensorSnapshot, WindowCfg, range};
use holdwatch_traits::ManualClock;
use proptest::prelude::*;

fn snapshot(hold: bool) -> SensorSnapshot {
    SensorSnapshot {
        sensor_type: "PT100".into(),
        temperature: 21.0,
        decimal_precision: 1,
        hold_active: hold,
        battery: 50,
    }
}

fn clock() -> ManualClock {
    ManualClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default(),
    )
}

proptest! {
    #[test]
    fn one_entry_per_rising_edge(holds in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut logger = HoldEdgeLogger::new(clock());
        let emitted: Vec<usize> = holds
            .iter()
            .enumerate()
            .filter_map(|(i, &h)| logger.observe(&snapshot(h)).map(|_| i))
            .collect();

        let expected: Vec<usize> = (0..holds.len())
            .filter(|&i| holds[i] && (i == 0 || !holds[i - 1]))
            .collect();
        prop_assert_eq!(emitted, expected);
        prop_assert_eq!(logger.previous_hold(), holds.last().copied().unwrap_or(false));
    }

    #[test]
    fn window_keeps_last_n_in_order(
        temps in prop::collection::vec(-50.0f64..150.0, 0..100),
        capacity in 1usize..30,
    ) {
        let mut window = SampleWindow::with_capacity(capacity);
        for (i, &t) in temps.iter().enumerate() {
            let snapshot = window.push(SamplePoint::new(i.to_string(), t));
            prop_assert!(snapshot.len() <= capacity);
            prop_assert_eq!(snapshot.last().map(|p| p.temperature), Some(t));
        }
        let kept: Vec<f64> = window.samples().iter().map(|p| p.temperature).collect();
        let start = temps.len().saturating_sub(capacity);
        prop_assert_eq!(kept, temps[start..].to_vec());
    }

    #[test]
    fn range_brackets_every_sample(temps in prop::collection::vec(-50.0f64..150.0, 1..50)) {
        let points: Vec<SamplePoint> = temps.iter().map(|&t| SamplePoint::new("", t)).collect();
        let r = range(&points, &WindowCfg::default());
        prop_assert!(r.min <= r.max);
        prop_assert!(r.span() > 0.0);
        for t in temps {
            prop_assert!(r.min <= t && t <= r.max);
            let n = r.normalize(t);
            prop_assert!((0.0..=1.0).contains(&n));
        }
    }
}
