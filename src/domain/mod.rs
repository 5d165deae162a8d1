//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the four input ratios (`BankMetrics`) and their UI ranges (`MetricKind`, `MetricBounds`)
//! - scoring outputs (`StabilityResult`, `StabilityStatus`, `ScoreComponents`)
//! - the run configuration shared by CLI and TUI (`DashboardConfig`)

pub mod types;

pub use types::*;
