//! Bounded sliding window of chart samples and the derived axis range.

use crate::config::WindowCfg;
use crate::types::SamplePoint;

/// Vertical axis bounds for the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRange {
    pub min: f64,
    pub max: f64,
}

impl ChartRange {
    /// `max - min`, with a degenerate range reported as 1 so callers can divide by it.
    #[inline]
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }

    /// Position of `temperature` within the range, 0.0 at `min` and 1.0 at `max`.
    #[inline]
    pub fn normalize(&self, temperature: f64) -> f64 {
        (temperature - self.min) / self.span()
    }

    #[inline]
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Axis range over `samples`.
///
/// An empty sequence reports `(floor, ceiling)`. With `widen_to_bounds` the
/// floor and ceiling are always included, so the range only ever grows past them.
pub fn range(samples: &[SamplePoint], cfg: &WindowCfg) -> ChartRange {
    if samples.is_empty() {
        return ChartRange {
            min: cfg.floor,
            max: cfg.ceiling,
        };
    }
    let (mut min, mut max) = if cfg.widen_to_bounds {
        (cfg.floor, cfg.ceiling)
    } else {
        (f64::INFINITY, f64::NEG_INFINITY)
    };
    for p in samples {
        min = min.min(p.temperature);
        max = max.max(p.temperature);
    }
    ChartRange { min, max }
}

/// Fixed-capacity FIFO of the most recent samples, oldest first.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Vec<SamplePoint>,
    cfg: WindowCfg,
}

impl SampleWindow {
    pub fn new(cfg: WindowCfg) -> Self {
        let cfg = WindowCfg {
            capacity: cfg.capacity.max(1),
            ..cfg
        };
        Self {
            samples: Vec::with_capacity(cfg.capacity + 1),
            cfg,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(WindowCfg {
            capacity,
            ..WindowCfg::default()
        })
    }

    /// Append a sample, evict the oldest beyond capacity, and return a copy of
    /// the window. Non-finite temperatures are dropped and leave the window as is.
    pub fn push(&mut self, point: SamplePoint) -> Vec<SamplePoint> {
        if !point.temperature.is_finite() {
            tracing::debug!(temperature = point.temperature, "ignoring non-finite sample");
            return self.samples.clone();
        }
        self.samples.push(point);
        if self.samples.len() > self.cfg.capacity {
            let excess = self.samples.len() - self.cfg.capacity;
            self.samples.drain(..excess);
        }
        self.samples.clone()
    }

    pub fn range(&self) -> ChartRange {
        range(&self.samples, &self.cfg)
    }

    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.samples.first()
    }

    pub fn latest(&self) -> Option<&SamplePoint> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cfg.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(WindowCfg::default())
    }
}
