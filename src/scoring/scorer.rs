//! Composite stability score.
//!
//! ```text
//! score = (capital_adequacy / 8.0) * 25
//!       + (1 - non_performing_loans / 15.0) * 25
//!       + (1 - |loan_to_deposit - 80| / 40) * 25
//!       + (net_interest_margin / 5.0) * 25
//! ```
//!
//! The function is total over `f64`: it never clamps and never fails. Rejecting
//! non-finite input and enforcing UI ranges is the caller's job.

use crate::domain::{BankMetrics, ScoreComponents, StabilityResult, StabilityStatus};

/// Points contributed by each metric at its reference value.
pub const COMPONENT_WEIGHT: f64 = 25.0;

/// Capital adequacy that earns the full component weight.
pub const CAPITAL_ADEQUACY_REFERENCE: f64 = 8.0;
/// Non-performing loan ratio at which the component reaches zero.
pub const NPL_CEILING: f64 = 15.0;
/// Loan-to-deposit ratio that earns the full component weight.
pub const LOAN_TO_DEPOSIT_TARGET: f64 = 80.0;
/// Distance from the target at which the loan-to-deposit component reaches zero.
pub const LOAN_TO_DEPOSIT_TOLERANCE: f64 = 40.0;
/// Net interest margin that earns the full component weight.
pub const NET_INTEREST_MARGIN_REFERENCE: f64 = 5.0;

/// Scores at or above this are `Stable`.
pub const STABLE_THRESHOLD: f64 = 75.0;
/// Scores at or above this (and below [`STABLE_THRESHOLD`]) are `AtRisk`.
pub const AT_RISK_THRESHOLD: f64 = 50.0;

/// Evaluate each term of the weighted sum.
pub fn components(m: &BankMetrics) -> ScoreComponents {
    ScoreComponents {
        capital_adequacy: (m.capital_adequacy / CAPITAL_ADEQUACY_REFERENCE) * COMPONENT_WEIGHT,
        non_performing_loans: (1.0 - m.non_performing_loans / NPL_CEILING) * COMPONENT_WEIGHT,
        loan_to_deposit: (1.0
            - (m.loan_to_deposit - LOAN_TO_DEPOSIT_TARGET).abs() / LOAN_TO_DEPOSIT_TOLERANCE)
            * COMPONENT_WEIGHT,
        net_interest_margin: (m.net_interest_margin / NET_INTEREST_MARGIN_REFERENCE)
            * COMPONENT_WEIGHT,
    }
}

pub fn score(m: &BankMetrics) -> f64 {
    components(m).total()
}

/// Map a score to its status. Both thresholds are inclusive lower bounds.
///
/// A NaN score compares false against both thresholds and lands in `Unstable`.
pub fn classify(score: f64) -> StabilityStatus {
    if score >= STABLE_THRESHOLD {
        StabilityStatus::Stable
    } else if score >= AT_RISK_THRESHOLD {
        StabilityStatus::AtRisk
    } else {
        StabilityStatus::Unstable
    }
}

/// Score and classify in one call.
pub fn assess_stability(m: &BankMetrics) -> StabilityResult {
    let components = components(m);
    let score = components.total();
    StabilityResult {
        score,
        status: classify(score),
        components,
    }
}
