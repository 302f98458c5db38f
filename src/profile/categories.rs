//! Category Profiler
//!
//! Most frequent values of categorical columns. Columns whose distinct
//! count exceeds a cardinality ceiling look like identifiers or free text
//! and are skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    column::{classify, ColumnKind, ColumnValues},
    share,
};
use crate::{
    config::TopCategoryOptions,
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// A value and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The value, rendered as a string
    pub value: String,
    /// Number of occurrences
    pub count: usize,
    /// Occurrences over non-missing cells of the column
    pub share: f64,
}

/// Top values of one categorical column, most frequent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    /// Column name
    pub column: String,
    /// Number of distinct non-missing values in the column
    pub distinct_count: usize,
    /// At most `top_k` rows, by count descending, ties in first-seen order
    pub rows: Vec<CategoryCount>,
}

impl CategoryTable {
    /// Number of rows kept
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were kept
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count of a specific value, if it was kept
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.rows.iter().find(|r| r.value == value).map(|r| r.count)
    }
}

/// Top-category tables for the selected columns, in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopCategories {
    tables: Vec<CategoryTable>,
}

impl TopCategories {
    /// Table of a column by name
    pub fn get(&self, column: &str) -> Option<&CategoryTable> {
        self.tables.iter().find(|t| t.column == column)
    }

    /// Check if a column was selected
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Iterate tables in column order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTable> + '_ {
        self.tables.iter()
    }

    /// Number of selected columns
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no column was selected
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Top `top_k` values of up to `max_columns` categorical columns, using
/// the default cardinality ceiling.
///
/// # Errors
///
/// Returns an error only if Arrow cannot render a categorical column.
pub fn top_categories(
    dataset: &ArrowDataset,
    max_columns: usize,
    top_k: usize,
) -> Result<TopCategories> {
    top_categories_with(dataset, &TopCategoryOptions::new(max_columns, top_k))
}

/// Top categories with explicit options.
///
/// Columns over the cardinality ceiling are skipped without using up one
/// of the `max_columns` slots. Missing cells are never counted.
///
/// # Errors
///
/// Returns an error if the options are invalid or Arrow cannot render a
/// categorical column.
pub fn top_categories_with(
    dataset: &ArrowDataset,
    options: &TopCategoryOptions,
) -> Result<TopCategories> {
    options.validate()?;

    let mut tables = Vec::new();
    if options.max_columns == 0 || options.top_k == 0 {
        return Ok(TopCategories { tables });
    }

    let schema = dataset.schema();
    for (index, field) in schema.fields().iter().enumerate() {
        if tables.len() >= options.max_columns {
            break;
        }
        if classify(field.data_type()) != ColumnKind::Categorical {
            continue;
        }
        let ColumnValues::Categorical(values) =
            ColumnValues::extract(dataset, index, field.data_type())?
        else {
            continue;
        };

        let (mut counts, non_null) = count_first_seen(&values);
        let distinct_count = counts.len();
        if distinct_count > options.max_cardinality {
            debug!(
                column = %field.name(),
                distinct_count,
                max_cardinality = options.max_cardinality,
                "skipping high-cardinality column"
            );
            continue;
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(options.top_k);

        tables.push(CategoryTable {
            column: field.name().clone(),
            distinct_count,
            rows: counts
                .into_iter()
                .map(|(value, count)| CategoryCount {
                    value: value.to_string(),
                    count,
                    share: share(count, non_null),
                })
                .collect(),
        });
    }

    Ok(TopCategories { tables })
}

/// Value counts in first-seen order, plus the number of present cells
fn count_first_seen(values: &[Option<String>]) -> (Vec<(&str, usize)>, usize) {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut non_null = 0;

    for value in values.iter().flatten() {
        non_null += 1;
        match slots.get(value.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value.as_str(), counts.len());
                counts.push((value.as_str(), 1));
            }
        }
    }

    (counts, non_null)
}
