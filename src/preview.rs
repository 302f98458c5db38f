//! Row previews
//!
//! First `n` rows of a dataset, or a seeded random sample of `n` rows kept
//! in original row order.

use std::sync::Arc;

use arrow::{
    array::{Array, RecordBatch, RecordBatchOptions, UInt64Array},
    compute::{concat_batches, take},
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// Seed used by [`PreviewMode::sample`]
pub const DEFAULT_PREVIEW_SEED: u64 = 42;

/// How preview rows are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Leading rows
    #[default]
    Head,
    /// Seeded random rows, returned in original order
    Sample {
        /// RNG seed
        seed: u64,
    },
}

impl PreviewMode {
    /// Random sample with the default seed
    pub fn sample() -> Self {
        Self::Sample {
            seed: DEFAULT_PREVIEW_SEED,
        }
    }
}

/// A slice of rows for display
#[derive(Debug, Clone)]
pub struct Preview {
    /// Selected rows
    pub batch: RecordBatch,
    /// Row count of the whole dataset
    pub total_rows: usize,
    /// Column names in dataset order
    pub columns: Vec<String>,
    /// Rows were randomly sampled
    pub sampled: bool,
}

impl Preview {
    /// Number of rows in the preview
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    /// Check if the preview holds no rows
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }
}

/// Select up to `n` rows of a dataset.
///
/// `n` is clamped to the dataset length.
///
/// # Errors
///
/// Returns an error if Arrow fails to concatenate or gather the rows.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use arrow::array::{ArrayRef, Int64Array};
/// use dataready::{preview, ArrowDataset, PreviewMode};
///
/// let dataset = ArrowDataset::from_columns(vec![(
///     "x",
///     Arc::new(Int64Array::from((0..10).collect::<Vec<i64>>())) as ArrayRef,
/// )])
/// .unwrap();
///
/// let head = preview(&dataset, 3, PreviewMode::Head).unwrap();
/// assert_eq!(head.len(), 3);
/// assert!(!head.sampled);
/// ```
pub fn preview(dataset: &ArrowDataset, n: usize, mode: PreviewMode) -> Result<Preview> {
    let schema = dataset.schema();
    let total_rows = dataset.len();
    let n = n.min(total_rows);
    let columns = schema.fields().iter().map(|f| f.name().clone()).collect();

    let all = concat_batches(&schema, dataset.batches())?;

    let (batch, sampled) = match mode {
        PreviewMode::Head => (all.slice(0, n), false),
        PreviewMode::Sample { seed } => (sample_rows(&all, n, seed)?, true),
    };

    debug!(total_rows, rows = batch.num_rows(), sampled, "built preview");

    Ok(Preview {
        batch,
        total_rows,
        columns,
        sampled,
    })
}

fn sample_rows(batch: &RecordBatch, n: usize, seed: u64) -> Result<RecordBatch> {
    let mut indices: Vec<usize> = (0..batch.num_rows()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices.truncate(n);
    indices.sort_unstable();

    let indices = UInt64Array::from_iter_values(indices.iter().map(|&i| i as u64));
    let columns = batch
        .columns()
        .iter()
        .map(|col| take(col.as_ref(), &indices, None))
        .collect::<std::result::Result<Vec<Arc<dyn Array>>, _>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(n));
    Ok(RecordBatch::try_new_with_options(
        batch.schema(),
        columns,
        &options,
    )?)
}
