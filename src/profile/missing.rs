//! Missing-Value Analyzer

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{column::absent_in_array, share};
use crate::dataset::{ArrowDataset, Dataset};

/// Missing-value accounting for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingRow {
    /// Column name
    pub column: String,
    /// Number of missing cells
    pub missing_count: usize,
    /// Missing cells over total rows (0.0 for an empty dataset)
    pub missing_share: f64,
}

/// Missing counts and shares per column, in dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingTable {
    n_rows: usize,
    rows: Vec<MissingRow>,
}

impl MissingTable {
    /// Build a table from precomputed rows
    pub fn from_rows(n_rows: usize, rows: Vec<MissingRow>) -> Self {
        Self { n_rows, rows }
    }

    /// Look up a column's row by name
    pub fn get(&self, column: &str) -> Option<&MissingRow> {
        self.rows.iter().find(|r| r.column == column)
    }

    /// Iterate rows in column order
    pub fn iter(&self) -> impl Iterator<Item = &MissingRow> + '_ {
        self.rows.iter()
    }

    /// Rows in column order
    pub fn rows(&self) -> &[MissingRow] {
        &self.rows
    }

    /// Number of rows (one per column)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count of the dataset the shares are based on
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Largest missing share (0.0 for an empty table)
    pub fn max_missing_share(&self) -> f64 {
        self.rows.iter().map(|r| r.missing_share).fold(0.0, f64::max)
    }

    /// Average missing share (0.0 for an empty table)
    pub fn mean_missing_share(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.missing_share).sum::<f64>() / self.rows.len() as f64
    }

    /// Total number of missing cells
    pub fn total_missing(&self) -> usize {
        self.rows.iter().map(|r| r.missing_count).sum()
    }
}

/// Build the missing-value table of a dataset.
///
/// Counts come straight from Arrow validity bitmaps, plus NaN cells in
/// float columns.
pub fn missing_table(dataset: &ArrowDataset) -> MissingTable {
    let schema = dataset.schema();
    let n_rows = dataset.len();

    let rows: Vec<MissingRow> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let missing_count: usize = dataset
                .column_chunks(index)
                .map(|chunk| absent_in_array(chunk.as_ref()))
                .sum();
            MissingRow {
                column: field.name().clone(),
                missing_count,
                missing_share: share(missing_count, n_rows),
            }
        })
        .collect();

    debug!(
        n_rows,
        n_cols = rows.len(),
        total_missing = rows.iter().map(|r| r.missing_count).sum::<usize>(),
        "built missing table"
    );

    MissingTable { n_rows, rows }
}
