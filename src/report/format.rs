//! Plain-text rendering of an assessment for terminal output.

use crate::domain::{BankMetrics, MetricKind, StabilityResult};
use crate::report::{Recommendation, Severity, summarize};
use crate::scoring::Sensitivity;

/// Format the full assessment: metrics summary, recommendation, score and status.
///
/// The recommendation is passed in rather than derived, so a reloaded
/// assessment prints exactly what was recorded.
pub fn format_assessment(
    bank_name: &str,
    metrics: &BankMetrics,
    result: &StabilityResult,
    recommendation: &Recommendation,
) -> String {
    let mut out = String::new();

    out.push_str("=== Bank Stability Dashboard ===\n");
    out.push_str(&format!("Bank: {bank_name}\n\n"));

    out.push_str(&format_metrics_summary(metrics));
    out.push('\n');

    out.push_str("Score breakdown:\n");
    for metric in MetricKind::ALL {
        out.push_str(&format!(
            "  {:<22} {:>8.2}\n",
            metric.short_name(),
            result.components.get(metric)
        ));
    }
    out.push('\n');

    out.push_str("Recommendations:\n");
    out.push_str(&format!("  {}\n\n", format_recommendation(recommendation)));

    out.push_str(&format!("Overall Stability Score: {:.2}\n", result.score));
    out.push_str(&format!("Status: {}\n", result.status));

    out
}

/// Format the four metric tiles as a table.
pub fn format_metrics_summary(metrics: &BankMetrics) -> String {
    let mut out = String::new();
    out.push_str("Metrics Summary:\n");
    out.push_str(&format!("  {:<22} {:>8}  {}\n", "metric", "value", "guidance"));
    out.push_str(&format!("  {:-<22} {:-<8}  {:-<16}\n", "", "", ""));
    for tile in summarize(metrics) {
        out.push_str(&format!(
            "  {:<22} {:>8}  {}\n",
            tile.metric.short_name(),
            tile.value_label(),
            tile.hint
        ));
    }
    out
}

pub fn format_recommendation(rec: &Recommendation) -> String {
    let tag = match rec.severity {
        Severity::Success => "[ok]",
        Severity::Warning => "[warn]",
        Severity::Critical => "[critical]",
    };
    format!("{tag} {}", rec.message)
}

/// Format a sensitivity sweep as a two-column table, marking status changes.
pub fn format_sensitivity(sweep: &Sensitivity) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Sensitivity: {} (current {:.1}% -> score {:.2})\n",
        sweep.metric.short_name(),
        sweep.current.0,
        sweep.current.1
    ));
    out.push_str(&format!("  {:>8} {:>8}  {}\n", "value", "score", "status"));
    out.push_str(&format!("  {:-<8} {:-<8}  {:-<8}\n", "", "", ""));

    let mut last_status = None;
    for &(x, y) in &sweep.curve {
        let status = crate::scoring::classify(y);
        let marker = if last_status.is_some_and(|s| s != status) {
            " <-"
        } else {
            ""
        };
        out.push_str(&format!("  {x:>8.2} {y:>8.2}  {status}{marker}\n"));
        last_status = Some(status);
    }
    out
}
