//! Quality-Flag Aggregator
//!
//! Rule-based flags and an aggregate score computed from a
//! [`DatasetSummary`] and a [`MissingTable`]. Every rule is evaluated
//! independently; the score subtracts each fired penalty from
//! `1 - max_missing_share` and is clamped into `[0, 1]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::QualityThresholds,
    error::{Error, Result},
    profile::{ColumnSummary, DatasetSummary, MissingTable},
};

/// Quality flags derived from one summary / missing-table pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    /// Fewer rows than the configured minimum
    pub too_few_rows: bool,
    /// More columns than the configured maximum
    pub too_many_columns: bool,
    /// Largest per-column missing share
    pub max_missing_share: f64,
    /// Largest missing share exceeds the configured maximum
    pub too_many_missing: bool,
    /// Some column holds at most one distinct value
    pub has_constant_columns: bool,
    /// Names of constant columns, in column order
    pub constant_columns: Vec<String>,
    /// Some identifier-like column repeats a value
    pub has_suspicious_id_duplicates: bool,
    /// Names of identifier columns with repeated values
    pub id_duplicate_columns: Vec<String>,
    /// Some numeric column is mostly zeros
    pub has_many_zero_values: bool,
    /// Names of numeric columns at or above the zero-share threshold
    pub zero_value_columns: Vec<String>,
    /// Aggregate quality score in `[0, 1]`
    pub quality_score: f64,
}

impl QualityFlags {
    /// Boolean flags only, keyed by name
    pub fn bool_flags(&self) -> BTreeMap<&'static str, bool> {
        BTreeMap::from([
            ("too_few_rows", self.too_few_rows),
            ("too_many_columns", self.too_many_columns),
            ("too_many_missing", self.too_many_missing),
            ("has_constant_columns", self.has_constant_columns),
            (
                "has_suspicious_id_duplicates",
                self.has_suspicious_id_duplicates,
            ),
            ("has_many_zero_values", self.has_many_zero_values),
        ])
    }

    /// Names of the boolean flags that fired
    pub fn raised(&self) -> Vec<&'static str> {
        self.bool_flags()
            .into_iter()
            .filter_map(|(name, raised)| raised.then_some(name))
            .collect()
    }

    /// Full flags mapping as JSON values
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_map(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Compute quality flags with the default thresholds.
///
/// # Errors
///
/// Returns [`Error::InconsistentMissingTable`] when the summary and the
/// missing table do not describe the same dataset.
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
) -> Result<QualityFlags> {
    compute_quality_flags_with(summary, missing, &QualityThresholds::default())
}

/// Compute quality flags with explicit thresholds.
///
/// # Errors
///
/// Returns an error if the thresholds are invalid or the summary and the
/// missing table disagree.
pub fn compute_quality_flags_with(
    summary: &DatasetSummary,
    missing: &MissingTable,
    thresholds: &QualityThresholds,
) -> Result<QualityFlags> {
    thresholds.validate()?;
    check_consistency(summary, missing)?;

    let too_few_rows = summary.n_rows < thresholds.min_rows;
    let too_many_columns = summary.n_cols > thresholds.max_columns;
    let max_missing_share = missing.max_missing_share();
    let too_many_missing = max_missing_share > thresholds.max_missing_share;

    let constant_columns = names_where(summary, |c| is_constant(c, summary.n_rows));
    let id_duplicate_columns = names_where(summary, |c| {
        is_id_candidate(&c.name, &thresholds.id_suffixes) && has_repeats(c, summary.n_rows)
    });
    let zero_value_columns =
        names_where(summary, |c| is_zero_heavy(c, thresholds.zero_share_threshold));

    let has_constant_columns = !constant_columns.is_empty();
    let has_suspicious_id_duplicates = !id_duplicate_columns.is_empty();
    let has_many_zero_values = !zero_value_columns.is_empty();

    let mut score = 1.0 - max_missing_share;
    let penalties = [
        (too_few_rows, thresholds.too_few_rows_penalty),
        (too_many_columns, thresholds.too_many_columns_penalty),
        (has_constant_columns, thresholds.constant_columns_penalty),
        (has_suspicious_id_duplicates, thresholds.id_duplicates_penalty),
        (has_many_zero_values, thresholds.zero_values_penalty),
    ];
    for (fired, penalty) in penalties {
        if fired {
            score -= penalty;
        }
    }
    let quality_score = score.clamp(0.0, 1.0);

    debug!(
        n_rows = summary.n_rows,
        n_cols = summary.n_cols,
        max_missing_share,
        quality_score,
        "computed quality flags"
    );

    Ok(QualityFlags {
        too_few_rows,
        too_many_columns,
        max_missing_share,
        too_many_missing,
        has_constant_columns,
        constant_columns,
        has_suspicious_id_duplicates,
        id_duplicate_columns,
        has_many_zero_values,
        zero_value_columns,
        quality_score,
    })
}

/// Both inputs must list the same columns, in order, with equal missing counts
fn check_consistency(summary: &DatasetSummary, missing: &MissingTable) -> Result<()> {
    if summary.columns.len() != missing.len() {
        return Err(Error::inconsistent_missing_table(
            "*",
            format!(
                "summary has {} columns, missing table has {}",
                summary.columns.len(),
                missing.len()
            ),
        ));
    }
    if !missing.is_empty() && missing.n_rows() != summary.n_rows {
        return Err(Error::inconsistent_missing_table(
            "*",
            format!(
                "summary has {} rows, missing table has {}",
                summary.n_rows,
                missing.n_rows()
            ),
        ));
    }

    for (column, row) in summary.columns.iter().zip(missing.iter()) {
        if column.name != row.column {
            return Err(Error::inconsistent_missing_table(
                &column.name,
                format!("missing table lists '{}' at this position", row.column),
            ));
        }
        if column.missing_count != row.missing_count {
            return Err(Error::inconsistent_missing_table(
                &column.name,
                format!(
                    "missing_count {} != {}",
                    column.missing_count, row.missing_count
                ),
            ));
        }
    }
    Ok(())
}

fn names_where(
    summary: &DatasetSummary,
    predicate: impl Fn(&ColumnSummary) -> bool,
) -> Vec<String> {
    summary
        .columns
        .iter()
        .filter(|c| predicate(c))
        .map(|c| c.name.clone())
        .collect()
}

fn is_constant(column: &ColumnSummary, n_rows: usize) -> bool {
    n_rows > 0 && column.distinct_count <= 1
}

fn has_repeats(column: &ColumnSummary, n_rows: usize) -> bool {
    column.distinct_count < n_rows.saturating_sub(column.missing_count)
}

fn is_zero_heavy(column: &ColumnSummary, threshold: f64) -> bool {
    column
        .numeric
        .as_ref()
        .is_some_and(|stats| stats.zero_count > 0 && stats.zero_share >= threshold)
}

/// Whether a column name marks an identifier.
///
/// Matches `id` itself, any configured suffix (case-insensitive), and
/// camel-case names such as `userId` or `orderID`.
pub fn is_id_candidate(name: &str, suffixes: &[String]) -> bool {
    let lower = name.trim().to_lowercase();
    if lower == "id" {
        return true;
    }
    if suffixes
        .iter()
        .any(|suffix| lower.ends_with(&suffix.to_lowercase()))
    {
        return true;
    }

    let camel = name.strip_suffix("Id").or_else(|| name.strip_suffix("ID"));
    camel
        .and_then(|stem| stem.chars().last())
        .is_some_and(|c| c.is_lowercase() || c.is_ascii_digit())
}
