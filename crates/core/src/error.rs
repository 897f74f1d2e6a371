//! Error types for sortable tables.

use thiserror::Error;

/// Result type for sortable operations.
pub type Result<T> = std::result::Result<T, SortableError>;

/// Errors that can occur while profiling, sorting or printing a table.
#[derive(Debug, Error)]
pub enum SortableError {
    /// No comparator is registered for a column's type tag.
    #[error("No comparator registered for type '{tag}'")]
    UnknownComparator { tag: String },

    /// No printer is registered for a column's type tag.
    #[error("No printer registered for type '{tag}'")]
    UnknownPrinter { tag: String },

    /// Column index outside the table width.
    #[error("Column index out of bounds: {index} (table has {count} columns)")]
    ColumnOutOfBounds { index: usize, count: usize },

    /// A row whose length differs from the header count.
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A column letter that is not a valid bijective base-26 name.
    #[error("Invalid column name: '{0}'")]
    InvalidColumnName(String),

    /// A sort request on a column excluded from sorting.
    #[error("Column {column} is not sortable")]
    ColumnNotSortable { column: String },

    /// A malformed option value.
    #[error("Invalid option {key}: {message}")]
    InvalidOption { key: String, message: String },

    /// JSON options document could not be read.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML options document could not be read.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SortableError {
    /// Create an unknown comparator error.
    pub fn unknown_comparator(tag: impl Into<String>) -> Self {
        Self::UnknownComparator { tag: tag.into() }
    }

    /// Create an unknown printer error.
    pub fn unknown_printer(tag: impl Into<String>) -> Self {
        Self::UnknownPrinter { tag: tag.into() }
    }

    /// Create an invalid option error.
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            message: message.into(),
        }
    }
}
