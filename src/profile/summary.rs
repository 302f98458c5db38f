//! Dataset Summarizer
//!
//! Per-column summaries and the dataset shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    column::{ColumnKind, ColumnValues},
    share,
};
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// Number of example values kept per column
const EXAMPLE_VALUES: usize = 3;

/// Basic descriptive statistics of a numeric column, ignoring missing cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Minimum value, absent when the column has no values
    pub min: Option<f64>,
    /// Maximum value, absent when the column has no values
    pub max: Option<f64>,
    /// Mean value, absent when the column has no values
    pub mean: Option<f64>,
    /// Sample standard deviation, absent below two values
    pub std: Option<f64>,
    /// Number of values exactly equal to zero
    pub zero_count: usize,
    /// Zero values over non-missing values (0.0 when there are none)
    pub zero_share: f64,
}

impl NumericStats {
    /// Compute stats over the present values of a column
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let n = present.len();
        let zero_count = present.iter().filter(|v| **v == 0.0).count();

        if n == 0 {
            return Self {
                min: None,
                max: None,
                mean: None,
                std: None,
                zero_count: 0,
                zero_share: 0.0,
            };
        }

        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = present.iter().sum::<f64>() / n as f64;

        let std = (n > 1).then(|| {
            let variance =
                present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        });

        Self {
            min: Some(min),
            max: Some(max),
            mean: Some(mean),
            std,
            zero_count,
            zero_share: share(zero_count, n),
        }
    }
}

/// Summary of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name
    pub name: String,
    /// Inferred kind
    pub kind: ColumnKind,
    /// Declared Arrow type
    pub dtype: String,
    /// Number of non-missing cells
    pub non_null: usize,
    /// Number of missing cells
    pub missing_count: usize,
    /// Missing cells over total rows (0.0 for an empty dataset)
    pub missing_share: f64,
    /// Number of distinct non-missing values
    pub distinct_count: usize,
    /// First few distinct non-missing values in row order
    pub example_values: Vec<String>,
    /// Descriptive stats, present for numeric columns only
    pub numeric: Option<NumericStats>,
}

impl ColumnSummary {
    pub(crate) fn from_values(
        name: &str,
        dtype: String,
        values: &ColumnValues,
        n_rows: usize,
    ) -> Self {
        let missing_count = values.missing_count();
        let numeric = match values {
            ColumnValues::Numeric { values, .. } => Some(NumericStats::from_values(values)),
            ColumnValues::Categorical(_) => None,
        };

        Self {
            name: name.to_string(),
            kind: values.kind(),
            dtype,
            non_null: values.len() - missing_count,
            missing_count,
            missing_share: share(missing_count, n_rows),
            distinct_count: values.distinct_count(),
            example_values: values.examples(EXAMPLE_VALUES),
            numeric,
        }
    }

    /// Check if the column is numeric
    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// Check if every non-missing cell holds a different value
    pub fn is_unique(&self) -> bool {
        self.distinct_count == self.non_null
    }
}

/// Summary of a whole dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of rows
    pub n_rows: usize,
    /// Number of columns
    pub n_cols: usize,
    /// Column summaries in dataset column order
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Get a column summary by name
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric columns in column order
    pub fn numeric_columns(&self) -> Vec<&ColumnSummary> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    /// Categorical columns in column order
    pub fn categorical_columns(&self) -> Vec<&ColumnSummary> {
        self.columns.iter().filter(|c| !c.is_numeric()).collect()
    }

    /// Largest per-column missing share (0.0 without columns)
    pub fn max_missing_share(&self) -> f64 {
        self.columns
            .iter()
            .map(|c| c.missing_share)
            .fold(0.0, f64::max)
    }
}

/// Summarize every column of a dataset.
///
/// Completes for zero-row datasets and all-missing columns: shares become
/// 0.0 and numeric stats become absent.
///
/// # Errors
///
/// Returns an error only if Arrow cannot widen a numeric column to f64 or
/// render a categorical column, which does not happen for well-formed data.
pub fn summarize(dataset: &ArrowDataset) -> Result<DatasetSummary> {
    let schema = dataset.schema();
    let n_rows = dataset.len();

    let mut columns = Vec::with_capacity(schema.fields().len());
    for (index, field) in schema.fields().iter().enumerate() {
        let values = ColumnValues::extract(dataset, index, field.data_type())?;
        columns.push(ColumnSummary::from_values(
            field.name(),
            field.data_type().to_string(),
            &values,
            n_rows,
        ));
    }

    debug!(n_rows, n_cols = columns.len(), "summarized dataset");

    Ok(DatasetSummary {
        n_rows,
        n_cols: columns.len(),
        columns,
    })
}

/// Alias of [`summarize`].
///
/// # Errors
///
/// See [`summarize`].
pub fn summarize_dataset(dataset: &ArrowDataset) -> Result<DatasetSummary> {
    summarize(dataset)
}
