//! Column classification and cell extraction.

use std::{collections::HashSet, fmt};

use arrow::{
    array::{Array, AsArray, Float64Array},
    compute::cast,
    datatypes::{i256, DataType, Decimal128Type, Decimal256Type, DecimalType},
    util::display::{ArrayFormatter, FormatOptions},
};
use serde::{Deserialize, Serialize};

use crate::{
    dataset::ArrowDataset,
    error::{Error, Result},
};

/// Inferred kind of a column, assigned once and carried downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer, unsigned, floating-point or decimal storage
    Numeric,
    /// Anything else: strings, booleans, dates, nested and untyped columns
    Categorical,
}

impl ColumnKind {
    /// Lowercase name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }

    /// Check if the kind is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a column by its declared Arrow type.
///
/// The result depends only on the declared type, never on how many cells
/// are missing. A `Null`-typed column (entirely missing, type unknown) is
/// categorical.
///
/// ```
/// use arrow::datatypes::DataType;
/// use dataready::profile::{classify, ColumnKind};
///
/// assert_eq!(classify(&DataType::Int64), ColumnKind::Numeric);
/// assert_eq!(classify(&DataType::Utf8), ColumnKind::Categorical);
/// assert_eq!(classify(&DataType::Null), ColumnKind::Categorical);
/// ```
pub fn classify(data_type: &DataType) -> ColumnKind {
    if data_type.is_numeric() {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Cells of one column, with `None` as the absent marker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColumnValues {
    /// Numeric cells; NaN is absent
    Numeric {
        /// Cells widened to f64, for statistics
        values: Vec<Option<f64>>,
        /// Lossless cell keys, for distinct counting and rendering
        keys: Vec<Option<ExactKey>>,
    },
    /// Categorical cells rendered as display strings
    Categorical(Vec<Option<String>>),
}

impl ColumnValues {
    /// Extract every cell of the column at `index`, across all batches.
    pub(crate) fn extract(
        dataset: &ArrowDataset,
        index: usize,
        data_type: &DataType,
    ) -> Result<Self> {
        match classify(data_type) {
            ColumnKind::Numeric => Self::extract_numeric(dataset, index),
            ColumnKind::Categorical => Self::extract_categorical(dataset, index),
        }
    }

    fn extract_numeric(dataset: &ArrowDataset, index: usize) -> Result<Self> {
        let mut values = Vec::new();
        let mut keys = Vec::new();

        for chunk in dataset.column_chunks(index) {
            let widened = cast(chunk.as_ref(), &DataType::Float64)?;
            let floats = widened
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| Error::schema_mismatch("cast to Float64 produced another type"))?;
            let start = values.len();
            values.extend(floats.iter().map(|v| v.filter(|x| !x.is_nan())));
            exact_keys(chunk.as_ref(), &values[start..], &mut keys)?;
        }

        Ok(Self::Numeric { values, keys })
    }

    fn extract_categorical(dataset: &ArrowDataset, index: usize) -> Result<Self> {
        let options = FormatOptions::default();
        let mut values = Vec::new();

        for chunk in dataset.column_chunks(index) {
            if chunk.data_type() == &DataType::Null {
                values.extend(std::iter::repeat(None).take(chunk.len()));
                continue;
            }
            let formatter = ArrayFormatter::try_new(chunk.as_ref(), &options)?;
            let nulls = chunk.logical_nulls();
            for i in 0..chunk.len() {
                let absent = nulls.as_ref().is_some_and(|n| n.is_null(i));
                if absent {
                    values.push(None);
                } else {
                    values.push(Some(formatter.value(i).to_string()));
                }
            }
        }

        Ok(Self::Categorical(values))
    }

    /// Kind of the extracted column
    pub(crate) fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric { .. } => ColumnKind::Numeric,
            Self::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Number of cells, missing included
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Numeric { values, .. } => values.len(),
            Self::Categorical(v) => v.len(),
        }
    }

    /// Number of absent cells
    pub(crate) fn missing_count(&self) -> usize {
        match self {
            Self::Numeric { values, .. } => values.iter().filter(|x| x.is_none()).count(),
            Self::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Number of distinct non-missing values
    pub(crate) fn distinct_count(&self) -> usize {
        match self {
            Self::Numeric { keys, .. } => keys.iter().flatten().collect::<HashSet<_>>().len(),
            Self::Categorical(v) => v.iter().flatten().collect::<HashSet<_>>().len(),
        }
    }

    /// First `limit` distinct non-missing values in row order, as strings
    pub(crate) fn examples(&self, limit: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let rendered: Box<dyn Iterator<Item = String> + '_> = match self {
            Self::Numeric { keys, .. } => Box::new(keys.iter().flatten().map(|k| k.to_string())),
            Self::Categorical(v) => Box::new(v.iter().flatten().cloned()),
        };
        for value in rendered {
            if out.len() >= limit {
                break;
            }
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
        out
    }
}

/// Lossless identity of a numeric cell.
///
/// Integers and decimals keep their native value so that values beyond
/// f64 precision stay distinct. Decimal keys carry the column's precision
/// and scale, which are fixed per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ExactKey {
    /// Float bit pattern, `-0.0` folded into `0.0`
    Float(u64),
    /// Any integer type
    Int(i128),
    /// 128-bit decimal, unscaled
    Decimal128 {
        value: i128,
        precision: u8,
        scale: i8,
    },
    /// 256-bit decimal, unscaled
    Decimal256 {
        value: i256,
        precision: u8,
        scale: i8,
    },
}

impl fmt::Display for ExactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Float(bits) => write!(f, "{}", f64::from_bits(bits)),
            Self::Int(value) => write!(f, "{value}"),
            Self::Decimal128 {
                value,
                precision,
                scale,
            } => f.write_str(&Decimal128Type::format_decimal(value, precision, scale)),
            Self::Decimal256 {
                value,
                precision,
                scale,
            } => f.write_str(&Decimal256Type::format_decimal(value, precision, scale)),
        }
    }
}

/// Push one key per cell of `chunk`; `widened` holds the same cells as f64.
fn exact_keys(
    chunk: &dyn Array,
    widened: &[Option<f64>],
    keys: &mut Vec<Option<ExactKey>>,
) -> Result<()> {
    match *chunk.data_type() {
        DataType::Decimal128(precision, scale) => {
            let decimals = chunk.as_primitive::<Decimal128Type>();
            keys.extend(decimals.iter().map(|v| {
                v.map(|value| ExactKey::Decimal128 {
                    value,
                    precision,
                    scale,
                })
            }));
        }
        DataType::Decimal256(precision, scale) => {
            let decimals = chunk.as_primitive::<Decimal256Type>();
            keys.extend(decimals.iter().map(|v| {
                v.map(|value| ExactKey::Decimal256 {
                    value,
                    precision,
                    scale,
                })
            }));
        }
        ref dt if dt.is_integer() => {
            // Decimal128(38, 0) holds every i64 and u64 exactly
            let exact = cast(chunk, &DataType::Decimal128(38, 0))?;
            let ints = exact.as_primitive::<Decimal128Type>();
            keys.extend(ints.iter().map(|v| v.map(ExactKey::Int)));
        }
        _ => keys.extend(widened.iter().map(|v| v.map(|x| ExactKey::Float(float_key(x))))),
    }
    Ok(())
}

/// Hash key for a float with `-0.0` folded into `0.0`.
pub(crate) fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Count of absent cells in one array: nulls plus NaN in float arrays.
///
/// Reads validity bitmaps directly, independent of [`ColumnValues`].
pub(crate) fn absent_in_array(array: &dyn Array) -> usize {
    use arrow::array::{Float16Array, Float32Array};

    let nulls = array.logical_nulls().map_or(0, |n| n.null_count());
    let nans = match array.data_type() {
        DataType::Float16 => array
            .as_any()
            .downcast_ref::<Float16Array>()
            .map_or(0, |a| a.iter().flatten().filter(|v| v.is_nan()).count()),
        DataType::Float32 => array
            .as_any()
            .downcast_ref::<Float32Array>()
            .map_or(0, |a| a.iter().flatten().filter(|v| v.is_nan()).count()),
        DataType::Float64 => array
            .as_any()
            .downcast_ref::<Float64Array>()
            .map_or(0, |a| a.iter().flatten().filter(|v| v.is_nan()).count()),
        _ => 0,
    };
    nulls + nans
}
