//! Data quality assessment for ML pipelines
//!
//! Rule-based quality flags over a dataset profile, an aggregate score in
//! `[0, 1]`, and ready-for-training verdicts.
//!
//! ## Rules
//! - **Constant columns**: at most one distinct non-missing value
//! - **Identifier duplicates**: an `id`-named column repeats a value
//! - **Zero-heavy columns**: numeric zero share at or above the threshold
//! - **Shape**: too few rows, too many columns, too much missing data
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Int64Array};
//! use dataready::{profile, quality, ArrowDataset};
//!
//! let dataset = ArrowDataset::from_columns(vec![
//!     ("col1", Arc::new(Int64Array::from(vec![0, 0, 0, 0])) as ArrayRef),
//!     ("col3", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let summary = profile::summarize(&dataset).unwrap();
//! let missing = profile::missing_table(&dataset);
//! let flags = quality::compute_quality_flags(&summary, &missing).unwrap();
//!
//! assert!(flags.has_many_zero_values);
//! assert_eq!(flags.zero_value_columns, vec!["col1".to_string()]);
//! assert!((0.0..=1.0).contains(&flags.quality_score));
//! ```

mod flags;
mod readiness;


pub use flags::{compute_quality_flags, compute_quality_flags_with, is_id_candidate, QualityFlags};
pub use readiness::{DatasetFeatures, FeatureAssessment, Readiness};
