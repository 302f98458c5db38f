//! Presentation Flattener
//!
//! Flat, one-row-per-column view of a [`DatasetSummary`] for display.

use std::fmt;

use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED, CellAlignment,
    ContentArrangement, Table,
};
use serde::{Deserialize, Serialize};

use super::{
    column::ColumnKind,
    summary::{ColumnSummary, DatasetSummary},
};

const HEADERS: [&str; 12] = [
    "name",
    "kind",
    "dtype",
    "non_null",
    "missing_count",
    "missing_share",
    "distinct_count",
    "min",
    "max",
    "mean",
    "std",
    "example_values",
];

/// One flattened column summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Column name
    pub name: String,
    /// Inferred kind
    pub kind: ColumnKind,
    /// Declared Arrow type
    pub dtype: String,
    /// Non-missing cells
    pub non_null: usize,
    /// Missing cells
    pub missing_count: usize,
    /// Missing share
    pub missing_share: f64,
    /// Distinct non-missing values
    pub distinct_count: usize,
    /// Minimum (numeric columns)
    pub min: Option<f64>,
    /// Maximum (numeric columns)
    pub max: Option<f64>,
    /// Mean (numeric columns)
    pub mean: Option<f64>,
    /// Sample standard deviation (numeric columns)
    pub std: Option<f64>,
    /// Example values joined with `, `
    pub example_values: String,
}

impl From<&ColumnSummary> for SummaryRow {
    fn from(column: &ColumnSummary) -> Self {
        let stats = column.numeric.as_ref();
        Self {
            name: column.name.clone(),
            kind: column.kind,
            dtype: column.dtype.clone(),
            non_null: column.non_null,
            missing_count: column.missing_count,
            missing_share: column.missing_share,
            distinct_count: column.distinct_count,
            min: stats.and_then(|s| s.min),
            max: stats.and_then(|s| s.max),
            mean: stats.and_then(|s| s.mean),
            std: stats.and_then(|s| s.std),
            example_values: column.example_values.join(", "),
        }
    }
}

impl SummaryRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.to_string(),
            self.dtype.clone(),
            self.non_null.to_string(),
            self.missing_count.to_string(),
            format!("{:.3}", self.missing_share),
            self.distinct_count.to_string(),
            format_stat(self.min),
            format_stat(self.max),
            format_stat(self.mean),
            format_stat(self.std),
            self.example_values.clone(),
        ]
    }
}

fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

/// Flattened summary, rows in dataset column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Column headers of the flat view
    pub fn headers() -> &'static [&'static str] {
        &HEADERS
    }

    /// Rows in dataset column order
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(160);
        table.set_header(HEADERS.to_vec());
        for row in &self.rows {
            table.add_row(row.cells());
        }
        for index in [3, 4, 5, 6, 7, 8, 9, 10] {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        write!(f, "{table}")
    }
}

/// Flatten a summary into one display row per column.
pub fn flatten_summary_for_print(summary: &DatasetSummary) -> SummaryTable {
    SummaryTable {
        rows: summary.columns.iter().map(SummaryRow::from).collect(),
    }
}
