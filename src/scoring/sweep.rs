//! One-metric sensitivity sweep.
//!
//! Holds three metrics fixed and evaluates the score across the fourth
//! metric's UI range. The TUI draws this as a line with the current input
//! marked; `bsd sweep` prints it as a table.

use crate::domain::{BankMetrics, MetricKind, StabilityStatus};
use crate::scoring::scorer::{classify, score};

/// Default number of grid points across a metric's range.
pub const DEFAULT_SWEEP_POINTS: usize = 101;
/// Upper bound on grid points; finer grids add nothing at a 0.1 slider step.
pub const MAX_SWEEP_POINTS: usize = 10_001;

#[derive(Debug, Clone)]
pub struct Sensitivity {
    pub metric: MetricKind,
    /// `(metric value, score)` pairs, ascending in metric value.
    pub curve: Vec<(f64, f64)>,
    /// `(metric value, score)` for the unmodified input.
    pub current: (f64, f64),
}

impl Sensitivity {
    /// Score range across the curve and the current point.
    pub fn score_bounds(&self) -> (f64, f64) {
        let mut lo = self.current.1;
        let mut hi = self.current.1;
        for &(_, y) in &self.curve {
            lo = lo.min(y);
            hi = hi.max(y);
        }
        (lo, hi)
    }

    /// Sub-ranges of the sweep where the status changes.
    ///
    /// Each entry is `(first metric value, status)`; consecutive points with the
    /// same status are merged.
    pub fn status_bands(&self) -> Vec<(f64, StabilityStatus)> {
        let mut bands: Vec<(f64, StabilityStatus)> = Vec::new();
        for &(x, y) in &self.curve {
            let status = classify(y);
            match bands.last() {
                Some((_, last)) if *last == status => {}
                _ => bands.push((x, status)),
            }
        }
        bands
    }
}

/// Sweep `metric` across its UI range in `n` evenly spaced points.
///
/// `n` is clamped to `2..=MAX_SWEEP_POINTS`.
pub fn sensitivity(metrics: &BankMetrics, metric: MetricKind, n: usize) -> Sensitivity {
    let n = n.clamp(2, MAX_SWEEP_POINTS);
    let bounds = metric.bounds();
    let mut curve = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = bounds.min + u * (bounds.max - bounds.min);
        curve.push((x, score(&metrics.with(metric, x))));
    }

    let x_now = metrics.get(metric);
    Sensitivity {
        metric,
        curve,
        current: (x_now, score(metrics)),
    }
}
