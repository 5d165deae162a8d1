//! Read/write assessment JSON files.
//!
//! An assessment file is the portable record of one calculation:
//! - bank name and the metrics as scored
//! - score, status and per-metric components
//! - the recommendation shown at the time
//!
//! `bsd show` reloads it without recomputing anything.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::pipeline::Assessment;
use crate::domain::{BankMetrics, StabilityResult};
use crate::error::AppError;
use crate::report::Recommendation;

pub const TOOL_NAME: &str = "bsd";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub bank_name: String,
    pub metrics: BankMetrics,
    pub result: StabilityResult,
    pub recommendation: Recommendation,
}

impl AssessmentFile {
    pub fn from_assessment(assessment: &Assessment, generated_at: DateTime<Utc>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at,
            bank_name: assessment.bank_name.clone(),
            metrics: assessment.metrics,
            result: assessment.result,
            recommendation: assessment.recommendation.clone(),
        }
    }
}

/// Write an assessment JSON file stamped with the current time.
pub fn write_assessment_json(path: &Path, assessment: &Assessment) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create assessment JSON '{}': {e}", path.display()))
    })?;

    let record = AssessmentFile::from_assessment(assessment, Utc::now());
    serde_json::to_writer_pretty(file, &record)
        .map_err(|e| AppError::input(format!("Failed to write assessment JSON: {e}")))?;

    info!(path = %path.display(), "wrote assessment");
    Ok(())
}

/// Read an assessment JSON file.
pub fn read_assessment_json(path: &Path) -> Result<AssessmentFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open assessment JSON '{}': {e}", path.display()))
    })?;
    let record: AssessmentFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid assessment JSON: {e}")))?;
    Ok(record)
}
