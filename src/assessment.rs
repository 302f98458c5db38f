//! End-to-end dataset assessment
//!
//! Runs the profilers and the quality-flag aggregator in one call and
//! derives the ready-for-training verdict.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::ProfileConfig,
    dataset::{ArrowDataset, Dataset},
    error::Result,
    profile::{
        correlation_matrix, missing_table, summarize, top_categories_with, CorrelationMatrix,
        DatasetSummary, MissingTable, TopCategories,
    },
    quality::{compute_quality_flags_with, DatasetFeatures, QualityFlags, Readiness},
};

/// Quality assessment of one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Per-column summary
    pub summary: DatasetSummary,
    /// Missing-value table
    pub missing: MissingTable,
    /// Quality flags and score
    pub flags: QualityFlags,
    /// Ready-for-training verdict
    pub readiness: Readiness,
    /// Wall-clock time spent assessing, in milliseconds
    pub latency_ms: f64,
}

impl QualityAssessment {
    /// Aggregate features of the assessed dataset
    pub fn features(&self) -> DatasetFeatures {
        DatasetFeatures::from_profile(&self.summary, &self.missing)
    }
}

/// Assess a dataset's readiness for model training.
///
/// # Errors
///
/// Returns an error if the config is invalid or Arrow cannot read a column.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use arrow::array::{ArrayRef, Int64Array};
/// use dataready::{assess, ArrowDataset, ProfileConfig};
///
/// let dataset = ArrowDataset::from_columns(vec![(
///     "x",
///     Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
/// )])
/// .unwrap();
///
/// let report = assess(&dataset, &ProfileConfig::default()).unwrap();
/// assert!(report.flags.too_few_rows);
/// assert!(report.readiness.ok_for_model);
/// ```
pub fn assess(dataset: &ArrowDataset, config: &ProfileConfig) -> Result<QualityAssessment> {
    config.validate()?;
    let start = Instant::now();

    let summary = summarize(dataset)?;
    let missing = missing_table(dataset);
    let flags = compute_quality_flags_with(&summary, &missing, &config.thresholds)?;
    let readiness = Readiness::from_flags(&flags, &config.thresholds);

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        operation = "assess",
        n_rows = dataset.len(),
        n_cols = summary.n_cols,
        score = flags.quality_score,
        ok_for_model = readiness.ok_for_model,
        latency_ms,
        "assessed dataset"
    );

    Ok(QualityAssessment {
        summary,
        missing,
        flags,
        readiness,
        latency_ms,
    })
}

/// Every profiler's output for one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Per-column summary
    pub summary: DatasetSummary,
    /// Missing-value table
    pub missing: MissingTable,
    /// Correlation of numeric columns
    pub correlation: CorrelationMatrix,
    /// Most frequent categorical values
    pub top_categories: TopCategories,
    /// Quality flags and score
    pub flags: QualityFlags,
}

/// Run every profiler plus the quality-flag aggregator.
///
/// # Errors
///
/// Returns an error if the config is invalid or Arrow cannot read a column.
pub fn profile_dataset(dataset: &ArrowDataset, config: &ProfileConfig) -> Result<DatasetProfile> {
    config.validate()?;

    let summary = summarize(dataset)?;
    let missing = missing_table(dataset);
    let correlation = correlation_matrix(dataset)?;
    let top_categories = top_categories_with(dataset, &config.categories)?;
    let flags = compute_quality_flags_with(&summary, &missing, &config.thresholds)?;

    Ok(DatasetProfile {
        summary,
        missing,
        correlation,
        top_categories,
        flags,
    })
}
