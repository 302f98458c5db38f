//! dataready - Data-Readiness Profiling for Tabular Datasets
//!
//! Profiles an in-memory tabular dataset and produces a structured quality
//! assessment usable as a pre-training data-readiness check.
//!
//! # Design Principles
//!
//! 1. **Total** - Empty datasets, all-missing columns and degenerate
//!    numeric data never fail; they surface as zero shares or absent stats
//! 2. **Read-only** - Every profiler is a pure function of the dataset
//! 3. **Zero-copy** - Arrow `RecordBatch` throughout
//! 4. **Configurable** - Every heuristic cutoff is a named default
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use dataready::{assess, flatten_summary_for_print, ArrowDataset, ProfileConfig};
//!
//! let dataset = ArrowDataset::from_columns(vec![
//!     ("constant_col", Arc::new(Int64Array::from(vec![1, 1, 1, 1])) as ArrayRef),
//!     ("var_col", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
//!     ("city", Arc::new(StringArray::from(vec![Some("A"), Some("B"), None, Some("A")])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let report = assess(&dataset, &ProfileConfig::default()).unwrap();
//! assert!(report.flags.has_constant_columns);
//! assert!((0.0..=1.0).contains(&report.flags.quality_score));
//!
//! println!("{}", flatten_summary_for_print(&report.summary));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::redundant_clone,
        clippy::too_many_lines,
        clippy::float_cmp,
        clippy::similar_names,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::map_unwrap_or)]

pub mod assessment;
pub mod config;
pub mod dataset;
pub mod error;
pub mod preview;
pub mod profile;
pub mod quality;

// Re-exports for convenience
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use assessment::{assess, profile_dataset, DatasetProfile, QualityAssessment};
pub use config::{FeatureThresholds, ProfileConfig, QualityThresholds, TopCategoryOptions};
pub use dataset::{ArrowDataset, Dataset};
pub use error::{Error, Result};
pub use preview::{preview, Preview, PreviewMode, DEFAULT_PREVIEW_SEED};
pub use profile::{
    classify, correlate, correlation_matrix, flatten_summary_for_print, missing_table, summarize,
    summarize_dataset, top_categories, top_categories_with, CategoryCount, CategoryTable,
    ColumnKind, ColumnSummary, CorrelationMatrix, CorrelationPair, DatasetSummary, MissingRow,
    MissingTable, NumericStats, SummaryRow, SummaryTable, TopCategories,
};
pub use quality::{
    compute_quality_flags, compute_quality_flags_with, is_id_candidate, DatasetFeatures,
    FeatureAssessment, QualityFlags, Readiness,
};
