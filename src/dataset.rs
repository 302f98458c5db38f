//! Dataset types for dataready.
//!
//! Provides the [`Dataset`] trait and the [`ArrowDataset`] implementation
//! the profilers read from. A dataset is an ordered set of named columns
//! stored as one or more Arrow RecordBatches; an Arrow null is the absent
//! marker for a cell.

use std::{collections::HashSet, sync::Arc};

use arrow::{
    array::{ArrayRef, RecordBatch},
    datatypes::SchemaRef,
};

use crate::error::{Error, Result};

/// A dataset that can be iterated over.
///
/// Datasets provide read-only access to tabular data stored as Arrow
/// RecordBatches. All implementations must be thread-safe (Send + Sync).
pub trait Dataset: Send + Sync {
    /// Returns the total number of rows in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the schema of the dataset.
    fn schema(&self) -> SchemaRef;

    /// Returns an iterator over all RecordBatches in the dataset.
    fn iter(&self) -> Box<dyn Iterator<Item = RecordBatch> + Send + '_>;

    /// Returns the number of batches in the dataset.
    fn num_batches(&self) -> usize;

    /// Returns a specific batch by index.
    fn get_batch(&self, index: usize) -> Option<&RecordBatch>;
}

/// An in-memory dataset backed by Arrow RecordBatches.
///
/// The dataset is an immutable snapshot: profiling never mutates it, so
/// the same instance can be profiled from several threads at once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use dataready::{ArrowDataset, Dataset};
///
/// let dataset = ArrowDataset::from_columns(vec![
///     ("age", Arc::new(Int64Array::from(vec![Some(10), None])) as ArrayRef),
///     ("city", Arc::new(StringArray::from(vec![Some("A"), Some("B")])) as ArrayRef),
/// ])
/// .unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.num_columns(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ArrowDataset {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl ArrowDataset {
    /// Creates a new ArrowDataset from a vector of RecordBatches.
    ///
    /// Batches with zero rows are accepted; they profile as an empty
    /// dataset with the declared columns.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batches vector is empty
    /// - The batches have inconsistent schemas
    /// - Two columns share a name
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let schema = batches[0].schema();

        // Verify all batches have the same schema
        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "Batch {} has different schema than batch 0",
                    i
                )));
            }
        }

        let mut seen = HashSet::new();
        for field in schema.fields() {
            if !seen.insert(field.name().as_str()) {
                return Err(Error::duplicate_column(field.name()));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates an ArrowDataset from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch has duplicate column names.
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Creates an ArrowDataset from `(name, array)` pairs in column order.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays have different lengths or two
    /// columns share a name.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: AsRef<str>,
    {
        let batch = RecordBatch::try_from_iter(columns)?;
        Self::from_batch(batch)
    }

    /// Returns all batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Returns the per-batch arrays of the column at `index`, in row order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid column index for the schema.
    pub fn column_chunks(&self, index: usize) -> impl Iterator<Item = &ArrayRef> + '_ {
        self.batches.iter().map(move |batch| batch.column(index))
    }

    /// Returns the index of a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no column has that name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema
            .index_of(name)
            .map_err(|_| Error::column_not_found(name))
    }
}

impl Dataset for ArrowDataset {
    fn len(&self) -> usize {
        self.row_count
    }

    fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RecordBatch> + Send + '_> {
        Box::new(self.batches.iter().cloned())
    }

    fn num_batches(&self) -> usize {
        self.batches.len()
    }

    fn get_batch(&self, index: usize) -> Option<&RecordBatch> {
        self.batches.get(index)
    }
}
