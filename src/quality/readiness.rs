//! Readiness verdicts
//!
//! Turns a quality score into an ok / not-ok decision for model training,
//! and scores a dataset from a handful of aggregate features when only
//! those are available.

use serde::{Deserialize, Serialize};

use super::flags::QualityFlags;
use crate::{
    config::{FeatureThresholds, QualityThresholds},
    error::{Error, Result},
    profile::{DatasetSummary, MissingTable},
};

const READY_MESSAGE: &str = "Dataset looks good enough for model training (by current heuristics).";
const NOT_READY_MESSAGE: &str = "Dataset needs more work before model training (by current heuristics).";

/// Ready-for-training verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readiness {
    /// Score is at or above the readiness threshold
    pub ok_for_model: bool,
    /// Score the verdict is based on
    pub quality_score: f64,
    /// Human-readable explanation
    pub message: String,
}

impl Readiness {
    /// Verdict for a set of quality flags
    pub fn from_flags(flags: &QualityFlags, thresholds: &QualityThresholds) -> Self {
        Self::from_score(flags.quality_score, thresholds.ok_threshold, &flags.raised())
    }

    fn from_score(score: f64, ok_threshold: f64, raised: &[&str]) -> Self {
        let ok_for_model = score >= ok_threshold;
        let mut message = if ok_for_model {
            READY_MESSAGE.to_string()
        } else {
            NOT_READY_MESSAGE.to_string()
        };
        if !raised.is_empty() {
            message.push_str(&format!(" Raised flags: {}.", raised.join(", ")));
        }
        Self {
            ok_for_model,
            quality_score: score,
            message,
        }
    }
}

/// Aggregate features of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFeatures {
    /// Number of rows
    pub n_rows: usize,
    /// Number of columns
    pub n_cols: usize,
    /// Largest per-column missing share, in `[0, 1]`
    pub max_missing_share: f64,
    /// Number of numeric columns
    pub numeric_cols: usize,
    /// Number of categorical columns
    pub categorical_cols: usize,
}

/// Outcome of the aggregate-feature heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAssessment {
    /// Verdict and score
    pub readiness: Readiness,
    /// Fewer rows than the feature threshold
    pub too_few_rows: bool,
    /// More columns than the feature threshold
    pub too_many_columns: bool,
    /// Missing share above the feature threshold
    pub too_many_missing: bool,
    /// No numeric columns at all
    pub no_numeric_columns: bool,
    /// No categorical columns at all
    pub no_categorical_columns: bool,
}

impl DatasetFeatures {
    /// Collect features from a summary and its missing table
    pub fn from_profile(summary: &DatasetSummary, missing: &MissingTable) -> Self {
        Self {
            n_rows: summary.n_rows,
            n_cols: summary.n_cols,
            max_missing_share: missing.max_missing_share(),
            numeric_cols: summary.numeric_columns().len(),
            categorical_cols: summary.categorical_columns().len(),
        }
    }

    /// Check that the features are in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the missing share is outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.max_missing_share) {
            Ok(())
        } else {
            Err(Error::invalid_config(format!(
                "max_missing_share must be within [0, 1], got {}",
                self.max_missing_share
            )))
        }
    }

    /// Score the features.
    ///
    /// # Errors
    ///
    /// Returns an error if the features or thresholds are out of range.
    pub fn assess(&self, thresholds: &FeatureThresholds) -> Result<FeatureAssessment> {
        self.validate()?;
        thresholds.validate()?;

        let too_few_rows = self.n_rows < thresholds.min_rows;
        let too_many_columns = self.n_cols > thresholds.max_columns;
        let too_many_missing = self.max_missing_share > thresholds.max_missing_share;
        let no_numeric_columns = self.numeric_cols == 0;
        let no_categorical_columns = self.categorical_cols == 0;

        let mut score = 1.0 - self.max_missing_share;
        if too_few_rows {
            score -= 0.2;
        }
        if too_many_columns {
            score -= 0.1;
        }
        // Skewed feature mix
        if no_numeric_columns && self.categorical_cols > 0 {
            score -= 0.1;
        }
        if no_categorical_columns && self.numeric_cols > 0 {
            score -= 0.05;
        }
        let score = score.clamp(0.0, 1.0);

        let raised: Vec<&str> = [
            ("too_few_rows", too_few_rows),
            ("too_many_columns", too_many_columns),
            ("too_many_missing", too_many_missing),
            ("no_numeric_columns", no_numeric_columns),
            ("no_categorical_columns", no_categorical_columns),
        ]
        .into_iter()
        .filter_map(|(name, fired)| fired.then_some(name))
        .collect();

        Ok(FeatureAssessment {
            readiness: Readiness::from_score(score, thresholds.ok_threshold, &raised),
            too_few_rows,
            too_many_columns,
            too_many_missing,
            no_numeric_columns,
            no_categorical_columns,
        })
    }
}
