//! Reporting utilities: metric summaries, recommendations, and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - the CLI and the TUI show the same wording

use serde::{Deserialize, Serialize};

use crate::domain::{BankMetrics, MetricKind};
use crate::scoring::{AT_RISK_THRESHOLD, STABLE_THRESHOLD};

pub mod format;

pub use format::*;

/// How urgent a recommendation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
}

/// Qualitative advice for the given score, addressed to `bank_name`.
pub fn recommend(bank_name: &str, score: f64) -> Recommendation {
    if score < AT_RISK_THRESHOLD {
        Recommendation {
            severity: Severity::Critical,
            message: format!(
                "{bank_name} is in a critical condition. Immediate intervention is required."
            ),
        }
    } else if score < STABLE_THRESHOLD {
        Recommendation {
            severity: Severity::Warning,
            message: format!("{bank_name} shows moderate risk. Focus on improving key metrics."),
        }
    } else {
        Recommendation {
            severity: Severity::Success,
            message: format!("{bank_name} is performing well. Keep up the good work!"),
        }
    }
}

/// One tile of the metrics summary.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub metric: MetricKind,
    pub value: f64,
    pub hint: &'static str,
}

impl MetricSummary {
    pub fn value_label(&self) -> String {
        format!("{:.1}%", self.value)
    }
}

pub fn summarize(metrics: &BankMetrics) -> Vec<MetricSummary> {
    MetricKind::ALL
        .into_iter()
        .map(|metric| MetricSummary {
            metric,
            value: metrics.get(metric),
            hint: metric.hint(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_tracks_thresholds() {
        assert_eq!(recommend("Acme", 49.99).severity, Severity::Critical);
        assert_eq!(recommend("Acme", 50.0).severity, Severity::Warning);
        assert_eq!(recommend("Acme", 74.99).severity, Severity::Warning);
        assert_eq!(recommend("Acme", 75.0).severity, Severity::Success);
    }

    #[test]
    fn recommendation_names_the_bank() {
        let r = recommend("Acme", 10.0);
        assert_eq!(
            r.message,
            "Acme is in a critical condition. Immediate intervention is required."
        );
        let r = recommend("Acme", 90.0);
        assert_eq!(r.message, "Acme is performing well. Keep up the good work!");
    }

    #[test]
    fn summary_has_one_tile_per_metric() {
        let tiles = summarize(&BankMetrics::default());
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].value_label(), "10.0%");
        assert_eq!(tiles[2].hint, "75%-85% ideal");
        assert_eq!(tiles[3].metric, MetricKind::NetInterestMargin);
    }
}
