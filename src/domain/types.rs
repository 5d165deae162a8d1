//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during scoring
//! - exported to JSON
//! - reloaded later by `bsd show`

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Bank name used when none (or only whitespace) is supplied.
pub const DEFAULT_BANK_NAME: &str = "Your Bank";

/// One of the four input ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CapitalAdequacy,
    NonPerformingLoans,
    LoanToDeposit,
    NetInterestMargin,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::CapitalAdequacy,
        MetricKind::NonPerformingLoans,
        MetricKind::LoanToDeposit,
        MetricKind::NetInterestMargin,
    ];

    /// Input label, as shown next to the slider.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::CapitalAdequacy => "Capital Adequacy Ratio (%)",
            MetricKind::NonPerformingLoans => "Non-Performing Loans Ratio (%)",
            MetricKind::LoanToDeposit => "Loan-to-Deposit Ratio (%)",
            MetricKind::NetInterestMargin => "Net Interest Margin (%)",
        }
    }

    /// Compact label for summary tables and chart axes.
    pub fn short_name(self) -> &'static str {
        match self {
            MetricKind::CapitalAdequacy => "Capital Adequacy",
            MetricKind::NonPerformingLoans => "Non-Performing Loans",
            MetricKind::LoanToDeposit => "Loan-to-Deposit",
            MetricKind::NetInterestMargin => "Net Interest Margin",
        }
    }

    /// Guidance shown under the value in the metrics summary.
    pub fn hint(self) -> &'static str {
        match self {
            MetricKind::CapitalAdequacy => ">= 8% ideal",
            MetricKind::NonPerformingLoans => "Lower is better",
            MetricKind::LoanToDeposit => "75%-85% ideal",
            MetricKind::NetInterestMargin => "Higher is better",
        }
    }

    /// UI range, default and slider step.
    pub fn bounds(self) -> MetricBounds {
        match self {
            MetricKind::CapitalAdequacy => MetricBounds::new(0.0, 25.0, 10.0, 0.1),
            MetricKind::NonPerformingLoans => MetricBounds::new(0.0, 15.0, 5.0, 0.1),
            MetricKind::LoanToDeposit => MetricBounds::new(50.0, 120.0, 85.0, 0.1),
            MetricKind::NetInterestMargin => MetricBounds::new(0.0, 10.0, 3.0, 0.1),
        }
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        match self {
            MetricKind::CapitalAdequacy => 0,
            MetricKind::NonPerformingLoans => 1,
            MetricKind::LoanToDeposit => 2,
            MetricKind::NetInterestMargin => 3,
        }
    }
}

/// Allowed input range for one metric.
///
/// The scorer itself accepts any value; the range is enforced by the caller
/// (CLI and TUI) through [`MetricBounds::clamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl MetricBounds {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max,
            default,
            step,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Move `value` by `steps` slider increments, staying inside the range.
    ///
    /// The result is snapped to the step grid so repeated key presses don't
    /// accumulate floating point drift.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        let raw = value + self.step * steps as f64;
        let snapped = (raw / self.step).round() * self.step;
        self.clamp(snapped)
    }
}

/// The four input ratios, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BankMetrics {
    pub capital_adequacy: f64,
    pub non_performing_loans: f64,
    pub loan_to_deposit: f64,
    pub net_interest_margin: f64,
}

impl Default for BankMetrics {
    fn default() -> Self {
        Self {
            capital_adequacy: MetricKind::CapitalAdequacy.bounds().default,
            non_performing_loans: MetricKind::NonPerformingLoans.bounds().default,
            loan_to_deposit: MetricKind::LoanToDeposit.bounds().default,
            net_interest_margin: MetricKind::NetInterestMargin.bounds().default,
        }
    }
}

impl BankMetrics {
    pub fn new(
        capital_adequacy: f64,
        non_performing_loans: f64,
        loan_to_deposit: f64,
        net_interest_margin: f64,
    ) -> Self {
        Self {
            capital_adequacy,
            non_performing_loans,
            loan_to_deposit,
            net_interest_margin,
        }
    }

    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::CapitalAdequacy => self.capital_adequacy,
            MetricKind::NonPerformingLoans => self.non_performing_loans,
            MetricKind::LoanToDeposit => self.loan_to_deposit,
            MetricKind::NetInterestMargin => self.net_interest_margin,
        }
    }

    pub fn set(&mut self, kind: MetricKind, value: f64) {
        match kind {
            MetricKind::CapitalAdequacy => self.capital_adequacy = value,
            MetricKind::NonPerformingLoans => self.non_performing_loans = value,
            MetricKind::LoanToDeposit => self.loan_to_deposit = value,
            MetricKind::NetInterestMargin => self.net_interest_margin = value,
        }
    }

    /// Copy with one metric replaced.
    pub fn with(mut self, kind: MetricKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// First metric that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<(MetricKind, f64)> {
        MetricKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .find(|(_, v)| !v.is_finite())
    }
}

/// Categorical outcome of the stability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityStatus {
    Stable,
    AtRisk,
    Unstable,
}

impl StabilityStatus {
    pub fn label(self) -> &'static str {
        match self {
            StabilityStatus::Stable => "Stable",
            StabilityStatus::AtRisk => "At Risk",
            StabilityStatus::Unstable => "Unstable",
        }
    }
}

impl fmt::Display for StabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-metric contribution to the score (each term is worth 25 at its reference point).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub capital_adequacy: f64,
    pub non_performing_loans: f64,
    pub loan_to_deposit: f64,
    pub net_interest_margin: f64,
}

impl ScoreComponents {
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::CapitalAdequacy => self.capital_adequacy,
            MetricKind::NonPerformingLoans => self.non_performing_loans,
            MetricKind::LoanToDeposit => self.loan_to_deposit,
            MetricKind::NetInterestMargin => self.net_interest_margin,
        }
    }

    pub fn total(&self) -> f64 {
        self.capital_adequacy
            + self.non_performing_loans
            + self.loan_to_deposit
            + self.net_interest_margin
    }
}

/// Score output for a single set of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub score: f64,
    pub status: StabilityStatus,
    pub components: ScoreComponents,
}

/// Inputs for one assessment run.
///
/// This is derived from CLI flags (plus environment / `.env` and defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub bank_name: String,
    pub metrics: BankMetrics,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bank_name: DEFAULT_BANK_NAME.to_string(),
            metrics: BankMetrics::default(),
        }
    }
}

impl DashboardConfig {
    /// The bank name to display, falling back to [`DEFAULT_BANK_NAME`] when blank.
    pub fn display_bank_name(&self) -> &str {
        let trimmed = self.bank_name.trim();
        if trimmed.is_empty() {
            DEFAULT_BANK_NAME
        } else {
            trimmed
        }
    }
}
