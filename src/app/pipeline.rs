//! Shared assessment pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> clamp to UI ranges -> score -> recommend
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::{debug, warn};

use crate::domain::{BankMetrics, DashboardConfig, MetricKind, StabilityResult};
use crate::error::AppError;
use crate::report::{MetricSummary, Recommendation, recommend, summarize};
use crate::scoring::assess_stability;

/// A metric value that was pulled into its UI range before scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub metric: MetricKind,
    pub requested: f64,
    pub applied: f64,
}

/// All computed outputs of a single assessment.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub bank_name: String,
    /// Metrics as scored (after clamping).
    pub metrics: BankMetrics,
    pub result: StabilityResult,
    pub recommendation: Recommendation,
    pub summary: Vec<MetricSummary>,
    pub adjustments: Vec<Adjustment>,
}

/// Execute the full assessment and return the computed outputs.
pub fn assess(config: &DashboardConfig) -> Result<Assessment, AppError> {
    // 1) + 2) Reject non-finite values, clamp to UI ranges.
    let (metrics, adjustments) = validate_inputs(&config.metrics)?;

    // 3) Score and classify.
    let result = assess_stability(&metrics);
    let bank_name = config.display_bank_name().to_string();
    debug!(bank = %bank_name, score = result.score, status = %result.status, "assessment computed");

    // 4) Presentation-ready pieces.
    let recommendation = recommend(&bank_name, result.score);
    let summary = summarize(&metrics);

    Ok(Assessment {
        bank_name,
        metrics,
        result,
        recommendation,
        summary,
        adjustments,
    })
}

/// Reject values the scorer can't meaningfully use, then clamp to UI ranges
/// the way a slider would, logging a `warn!` per adjusted value.
///
/// Shared by every entry point, including the TUI's initial slider positions.
pub fn validate_inputs(metrics: &BankMetrics) -> Result<(BankMetrics, Vec<Adjustment>), AppError> {
    if let Some((metric, value)) = metrics.first_non_finite() {
        return Err(AppError::input(format!(
            "{} must be a finite number (got {value}).",
            metric.display_name()
        )));
    }

    let (clamped, adjustments) = clamp_to_bounds(metrics);
    for adj in &adjustments {
        warn!(
            metric = adj.metric.short_name(),
            requested = adj.requested,
            applied = adj.applied,
            "input outside allowed range; clamped"
        );
    }
    Ok((clamped, adjustments))
}

/// Clamp each metric to its UI range, reporting what changed.
pub fn clamp_to_bounds(metrics: &BankMetrics) -> (BankMetrics, Vec<Adjustment>) {
    let mut out = *metrics;
    let mut adjustments = Vec::new();
    for metric in MetricKind::ALL {
        let requested = metrics.get(metric);
        let applied = metric.bounds().clamp(requested);
        if applied != requested {
            out.set(metric, applied);
            adjustments.push(Adjustment {
                metric,
                requested,
                applied,
            });
        }
    }
    (out, adjustments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StabilityStatus;
    use crate::error::EXIT_INPUT;
    use crate::report::Severity;

    #[test]
    fn default_config_assesses_stable() {
        let a = assess(&DashboardConfig::default()).unwrap();
        assert_eq!(a.bank_name, "Your Bank");
        assert_eq!(a.result.status, StabilityStatus::Stable);
        assert_eq!(a.recommendation.severity, Severity::Success);
        assert!(a.adjustments.is_empty());
        assert_eq!(a.summary.len(), 4);
    }

    #[test]
    fn out_of_range_metrics_are_clamped_before_scoring() {
        let config = DashboardConfig {
            bank_name: "Acme".to_string(),
            metrics: BankMetrics::new(40.0, -3.0, 80.0, 5.0),
        };
        let a = assess(&config).unwrap();
        assert_eq!(a.metrics.capital_adequacy, 25.0);
        assert_eq!(a.metrics.non_performing_loans, 0.0);
        assert_eq!(a.adjustments.len(), 2);
        assert_eq!(a.adjustments[0].metric, MetricKind::CapitalAdequacy);
        assert_eq!(a.adjustments[0].requested, 40.0);
        // 25/8*25 + 25 + 25 + 25
        assert!((a.result.score - 153.125).abs() < 1e-9);
    }

    #[test]
    fn non_finite_metric_is_rejected() {
        let config = DashboardConfig {
            bank_name: "Acme".to_string(),
            metrics: BankMetrics::default().with(MetricKind::NetInterestMargin, f64::NAN),
        };
        let err = assess(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().contains("Net Interest Margin"));
    }

    #[test]
    fn validate_inputs_clamps_and_rejects() {
        let (metrics, adjustments) =
            validate_inputs(&BankMetrics::new(99.0, 5.0, 10.0, 3.0)).unwrap();
        assert_eq!(metrics, BankMetrics::new(25.0, 5.0, 50.0, 3.0));
        assert_eq!(adjustments.len(), 2);

        let err = validate_inputs(&BankMetrics::new(10.0, 5.0, 85.0, f64::INFINITY)).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn unstable_bank_gets_critical_recommendation() {
        let config = DashboardConfig {
            bank_name: "Shaky Savings".to_string(),
            metrics: BankMetrics::new(0.0, 15.0, 120.0, 0.0),
        };
        let a = assess(&config).unwrap();
        assert_eq!(a.result.status, StabilityStatus::Unstable);
        assert_eq!(a.recommendation.severity, Severity::Critical);
        assert!(a.recommendation.message.starts_with("Shaky Savings"));
    }
}
