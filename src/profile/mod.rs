//! Dataset profiling for data-readiness checks
//!
//! Read-only profilers over an [`ArrowDataset`](crate::ArrowDataset):
//!
//! - [`summarize`]: per-column summary (kind, missing share, distinct
//!   count, numeric stats) plus the dataset shape
//! - [`missing_table`]: missing counts and shares per column
//! - [`correlation_matrix`]: pairwise Pearson correlation of numeric columns
//! - [`top_categories`]: most frequent values of categorical columns
//! - [`flatten_summary_for_print`]: flat tabular view of a summary
//!
//! Every profiler is a pure function of the dataset. None of them fail on
//! empty datasets, all-missing columns or degenerate numeric data; those
//! cases surface as zero shares or absent (`None`) statistics.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use dataready::{profile, ArrowDataset};
//!
//! let dataset = ArrowDataset::from_columns(vec![
//!     ("age", Arc::new(Int64Array::from(vec![Some(10), Some(20), Some(30), None])) as ArrayRef),
//!     ("city", Arc::new(StringArray::from(vec![Some("A"), Some("B"), Some("A"), None])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let summary = profile::summarize(&dataset).unwrap();
//! assert_eq!(summary.n_rows, 4);
//!
//! let missing = profile::missing_table(&dataset);
//! assert_eq!(missing.get("age").map(|row| row.missing_count), Some(1));
//! ```

// Statistical computation and internal methods
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

mod categories;
mod column;
mod correlation;
mod flatten;
mod missing;
mod summary;


pub use categories::{
    top_categories, top_categories_with, CategoryCount, CategoryTable, TopCategories,
};
pub use column::{classify, ColumnKind};
pub use correlation::{correlate, correlation_matrix, CorrelationMatrix, CorrelationPair};
pub use flatten::{flatten_summary_for_print, SummaryRow, SummaryTable};
pub use missing::{missing_table, MissingRow, MissingTable};
pub use summary::{summarize, summarize_dataset, ColumnSummary, DatasetSummary, NumericStats};

/// `count / total`, or 0.0 when `total` is zero.
pub(crate) fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
