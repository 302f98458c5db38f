//! Error types for dataready.

/// Result type alias for dataready operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dataready operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Arrow error during data processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON error while loading configuration or building a flags mapping.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Column not found in schema.
    #[error("Column '{name}' not found in schema")]
    ColumnNotFound {
        /// The name of the missing column.
        name: String,
    },

    /// Two columns share the same name.
    #[error("Duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Empty dataset error (no batches at all).
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Schema mismatch between batches.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },

    /// A missing-value table does not describe the same dataset as a summary.
    #[error("Missing table disagrees with summary for column '{column}': {message}")]
    InconsistentMissingTable {
        /// Column where the disagreement was found.
        column: String,
        /// What disagreed.
        message: String,
    },
}

impl Error {
    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create a duplicate column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create a missing-table consistency error.
    pub fn inconsistent_missing_table(
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InconsistentMissingTable {
            column: column.into(),
            message: message.into(),
        }
    }
}
