//! Correlation Engine
//!
//! Pairwise Pearson correlation over numeric columns with complete-case
//! handling: each pair uses only the rows where both values are present.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::column::{classify, ColumnKind, ColumnValues};
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// One off-diagonal entry of a correlation matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    /// First column (earlier in column order)
    pub left: String,
    /// Second column
    pub right: String,
    /// Pearson coefficient in [-1, 1]
    pub coefficient: f64,
}

/// Square, symmetric correlation matrix over numeric columns.
///
/// `None` marks an undefined coefficient: fewer than two complete-case
/// rows, or zero variance in either column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Column names, in dataset column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Matrix rows aligned with [`CorrelationMatrix::columns`]
    pub fn values(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    /// Number of numeric columns covered
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the matrix is empty (fewer than two numeric columns)
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check if a column is part of the matrix
    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Coefficient between two columns; `None` if undefined or unknown
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        self.values[i][j]
    }

    /// Defined off-diagonal pairs with `|r| >= min_abs`, strongest first
    pub fn strongest_pairs(&self, min_abs: f64) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                if let Some(r) = self.values[i][j] {
                    if r.abs() >= min_abs {
                        pairs.push(CorrelationPair {
                            left: self.columns[i].clone(),
                            right: self.columns[j].clone(),
                            coefficient: r,
                        });
                    }
                }
            }
        }
        pairs.sort_by(|a, b| b.coefficient.abs().total_cmp(&a.coefficient.abs()));
        pairs
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Compute the correlation matrix of a dataset's numeric columns.
///
/// Returns an empty matrix when fewer than two numeric columns exist.
///
/// # Errors
///
/// Returns an error only if Arrow cannot widen a numeric column to f64.
pub fn correlation_matrix(dataset: &ArrowDataset) -> Result<CorrelationMatrix> {
    let schema = dataset.schema();

    let mut columns = Vec::new();
    let mut series = Vec::new();
    for (index, field) in schema.fields().iter().enumerate() {
        if classify(field.data_type()) != ColumnKind::Numeric {
            continue;
        }
        if let ColumnValues::Numeric { values, .. } =
            ColumnValues::extract(dataset, index, field.data_type())?
        {
            columns.push(field.name().clone());
            series.push(values);
        }
    }

    if columns.len() < 2 {
        warn!(
            numeric_columns = columns.len(),
            "fewer than two numeric columns, skipping correlation"
        );
        return Ok(CorrelationMatrix::default());
    }

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = has_variance(&series[i]).then_some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    debug!(
        n_rows = dataset.len(),
        numeric_columns = n,
        "computed correlation matrix"
    );

    Ok(CorrelationMatrix { columns, values })
}

/// Alias of [`correlation_matrix`].
///
/// # Errors
///
/// See [`correlation_matrix`].
pub fn correlate(dataset: &ArrowDataset) -> Result<CorrelationMatrix> {
    correlation_matrix(dataset)
}

/// At least two present values, not all equal
fn has_variance(values: &[Option<f64>]) -> bool {
    varies(values.iter().flatten().copied())
}

fn varies(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.any(|v| v != first),
        None => false,
    }
}

/// Pearson coefficient over complete-case rows
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    if !varies(pairs.iter().map(|p| p.0)) || !varies(pairs.iter().map(|p| p.1)) {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
