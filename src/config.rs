//! Profiling and quality-heuristic configuration.
//!
//! Every heuristic cutoff used by the profilers and the quality-flag
//! aggregator is a named `DEFAULT_*` constant here, collected into
//! [`ProfileConfig`]. Configs are serde (de)serializable so a caller can
//! load partial overrides from JSON; omitted fields keep their defaults.
//!
//! # Example
//!
//! ```
//! use dataready::config::{ProfileConfig, QualityThresholds};
//!
//! let config = ProfileConfig::from_json_str(r#"{"thresholds": {"min_rows": 10}}"#).unwrap();
//! assert_eq!(config.thresholds.min_rows, 10);
//! assert_eq!(config.thresholds.ok_threshold, QualityThresholds::default().ok_threshold);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Datasets with fewer rows than this are flagged `too_few_rows`.
pub const DEFAULT_MIN_ROWS: usize = 100;
/// Datasets with more columns than this are flagged `too_many_columns`.
pub const DEFAULT_MAX_COLUMNS: usize = 100;
/// A maximum per-column missing share above this sets `too_many_missing`.
pub const DEFAULT_MAX_MISSING_SHARE: f64 = 0.5;
/// A numeric column whose zero share is at or above this is a zero-value column.
pub const DEFAULT_ZERO_SHARE_THRESHOLD: f64 = 0.5;
/// Score penalty when the dataset has too few rows.
pub const DEFAULT_TOO_FEW_ROWS_PENALTY: f64 = 0.2;
/// Score penalty when the dataset has too many columns.
pub const DEFAULT_TOO_MANY_COLUMNS_PENALTY: f64 = 0.1;
/// Score penalty when any column is constant.
pub const DEFAULT_CONSTANT_COLUMNS_PENALTY: f64 = 0.1;
/// Score penalty when an identifier column repeats a value.
pub const DEFAULT_ID_DUPLICATES_PENALTY: f64 = 0.1;
/// Score penalty when any numeric column is mostly zeros.
pub const DEFAULT_ZERO_VALUES_PENALTY: f64 = 0.05;
/// Minimum quality score for a dataset to be considered ready for training.
pub const DEFAULT_OK_THRESHOLD: f64 = 0.7;
/// Categorical columns with more distinct values than this are skipped by
/// the category profiler as identifier or free-text like.
pub const DEFAULT_MAX_CATEGORY_CARDINALITY: usize = 50;
/// Default number of categorical columns profiled by `top_categories`.
pub const DEFAULT_TOP_CATEGORY_COLUMNS: usize = 5;
/// Default number of values kept per profiled categorical column.
pub const DEFAULT_TOP_K: usize = 5;
/// Row count below which the aggregate-feature heuristic penalises a dataset.
pub const DEFAULT_FEATURE_MIN_ROWS: usize = 1000;
/// Column-name suffixes that mark a column as an identifier candidate.
pub const DEFAULT_ID_SUFFIXES: &[&str] = &["_id", "-id", " id"];

/// Thresholds and penalties used by the quality-flag aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Minimum row count before `too_few_rows` is raised (default: 100)
    pub min_rows: usize,
    /// Maximum column count before `too_many_columns` is raised (default: 100)
    pub max_columns: usize,
    /// Maximum missing share before `too_many_missing` is raised (default: 0.5)
    pub max_missing_share: f64,
    /// Zero share at or above which a numeric column is flagged (default: 0.5)
    pub zero_share_threshold: f64,
    /// Penalty for too few rows (default: 0.2)
    pub too_few_rows_penalty: f64,
    /// Penalty for too many columns (default: 0.1)
    pub too_many_columns_penalty: f64,
    /// Penalty for constant columns (default: 0.1)
    pub constant_columns_penalty: f64,
    /// Penalty for duplicated identifiers (default: 0.1)
    pub id_duplicates_penalty: f64,
    /// Penalty for zero-heavy columns (default: 0.05)
    pub zero_values_penalty: f64,
    /// Score at or above which the dataset is ready for training (default: 0.7)
    pub ok_threshold: f64,
    /// Name suffixes marking identifier candidates, compared case-insensitively
    pub id_suffixes: Vec<String>,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            max_columns: DEFAULT_MAX_COLUMNS,
            max_missing_share: DEFAULT_MAX_MISSING_SHARE,
            zero_share_threshold: DEFAULT_ZERO_SHARE_THRESHOLD,
            too_few_rows_penalty: DEFAULT_TOO_FEW_ROWS_PENALTY,
            too_many_columns_penalty: DEFAULT_TOO_MANY_COLUMNS_PENALTY,
            constant_columns_penalty: DEFAULT_CONSTANT_COLUMNS_PENALTY,
            id_duplicates_penalty: DEFAULT_ID_DUPLICATES_PENALTY,
            zero_values_penalty: DEFAULT_ZERO_VALUES_PENALTY,
            ok_threshold: DEFAULT_OK_THRESHOLD,
            id_suffixes: DEFAULT_ID_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl QualityThresholds {
    /// Create thresholds with the documented defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum row count
    #[must_use]
    pub fn min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows;
        self
    }

    /// Set maximum column count
    #[must_use]
    pub fn max_columns(mut self, columns: usize) -> Self {
        self.max_columns = columns;
        self
    }

    /// Set maximum missing share
    #[must_use]
    pub fn max_missing_share(mut self, share: f64) -> Self {
        self.max_missing_share = share;
        self
    }

    /// Set zero-share threshold
    #[must_use]
    pub fn zero_share_threshold(mut self, share: f64) -> Self {
        self.zero_share_threshold = share;
        self
    }

    /// Set the readiness score threshold
    #[must_use]
    pub fn ok_threshold(mut self, score: f64) -> Self {
        self.ok_threshold = score;
        self
    }

    /// Validate share-like fields and penalties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a share, score threshold or
    /// penalty lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("max_missing_share", self.max_missing_share),
            ("zero_share_threshold", self.zero_share_threshold),
            ("too_few_rows_penalty", self.too_few_rows_penalty),
            ("too_many_columns_penalty", self.too_many_columns_penalty),
            ("constant_columns_penalty", self.constant_columns_penalty),
            ("id_duplicates_penalty", self.id_duplicates_penalty),
            ("zero_values_penalty", self.zero_values_penalty),
            ("ok_threshold", self.ok_threshold),
        ];
        for (name, value) in unit_fields {
            check_unit(name, value)?;
        }
        Ok(())
    }
}

/// Options for the category profiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopCategoryOptions {
    /// Maximum number of categorical columns to profile (default: 5)
    pub max_columns: usize,
    /// Maximum number of values kept per column (default: 5)
    pub top_k: usize,
    /// Maximum distinct count for a column to be profiled (default: 50)
    pub max_cardinality: usize,
}

impl Default for TopCategoryOptions {
    fn default() -> Self {
        Self {
            max_columns: DEFAULT_TOP_CATEGORY_COLUMNS,
            top_k: DEFAULT_TOP_K,
            max_cardinality: DEFAULT_MAX_CATEGORY_CARDINALITY,
        }
    }
}

impl TopCategoryOptions {
    /// Create options with an explicit column limit and top-k
    pub fn new(max_columns: usize, top_k: usize) -> Self {
        Self {
            max_columns,
            top_k,
            ..Self::default()
        }
    }

    /// Set the cardinality ceiling
    #[must_use]
    pub fn max_cardinality(mut self, max_cardinality: usize) -> Self {
        self.max_cardinality = max_cardinality;
        self
    }

    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the cardinality ceiling is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_cardinality == 0 {
            return Err(Error::invalid_config("max_cardinality must be positive"));
        }
        Ok(())
    }
}

/// Thresholds for the aggregate-feature readiness heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureThresholds {
    /// Row count below which the dataset is penalised (default: 1000)
    pub min_rows: usize,
    /// Column count above which the dataset is penalised (default: 100)
    pub max_columns: usize,
    /// Missing share above which `too_many_missing` is raised (default: 0.5)
    pub max_missing_share: f64,
    /// Score at or above which the dataset is ready for training (default: 0.7)
    pub ok_threshold: f64,
}

impl Default for FeatureThresholds {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_FEATURE_MIN_ROWS,
            max_columns: DEFAULT_MAX_COLUMNS,
            max_missing_share: DEFAULT_MAX_MISSING_SHARE,
            ok_threshold: DEFAULT_OK_THRESHOLD,
        }
    }
}

impl FeatureThresholds {
    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a share lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_unit("max_missing_share", self.max_missing_share)?;
        check_unit("ok_threshold", self.ok_threshold)
    }
}

/// Complete profiling configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Quality-flag thresholds and penalties
    pub thresholds: QualityThresholds,
    /// Category profiler options
    pub categories: TopCategoryOptions,
    /// Aggregate-feature heuristic thresholds
    pub features: FeatureThresholds,
}

impl ProfileConfig {
    /// Create a config with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the quality thresholds
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the category profiler options
    #[must_use]
    pub fn with_categories(mut self, categories: TopCategoryOptions) -> Self {
        self.categories = categories;
        self
    }

    /// Load a config from JSON. Omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails
    /// [`ProfileConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.categories.validate()?;
        self.features.validate()
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ProfileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let thresholds = QualityThresholds::new()
            .min_rows(10)
            .max_columns(20)
            .max_missing_share(0.3)
            .zero_share_threshold(0.75)
            .ok_threshold(0.8);
        assert_eq!(thresholds.min_rows, 10);
        assert_eq!(thresholds.max_columns, 20);
        assert!((thresholds.max_missing_share - 0.3).abs() < f64::EPSILON);
        assert!((thresholds.zero_share_threshold - 0.75).abs() < f64::EPSILON);
        assert!((thresholds.ok_threshold - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_share_rejected() {
        let thresholds = QualityThresholds::new().zero_share_threshold(1.5);
        let err = thresholds.validate().unwrap_err();
        assert!(err.to_string().contains("zero_share_threshold"));

        let nan = QualityThresholds::new().ok_threshold(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_zero_cardinality_rejected() {
        let options = TopCategoryOptions::new(5, 2).max_cardinality(0);
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ProfileConfig::from_json_str(r#"{"categories": {"top_k": 3}}"#).unwrap();
        assert_eq!(config.categories.top_k, 3);
        assert_eq!(config.categories.max_columns, DEFAULT_TOP_CATEGORY_COLUMNS);
        assert_eq!(config.thresholds, QualityThresholds::default());
        assert_eq!(config.features, FeatureThresholds::default());
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        let result = ProfileConfig::from_json_str(r#"{"features": {"ok_threshold": 2.0}}"#);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));

        let result = ProfileConfig::from_json_str("{");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = serde_json::to_string(&ProfileConfig::default()).unwrap();
        let back = ProfileConfig::from_json_str(&json).unwrap();
        assert_eq!(back, ProfileConfig::default());
    }
}
