//! Error types for the wrangle library.
//!
//! Data-quality problems (nulls, sentinels, unparsable numbers) never show up
//! here: they are recovered into [`Value::Missing`](crate::Value::Missing).
//! Only misuse by the caller is reported.

use std::path::PathBuf;
use thiserror::Error;

use crate::table::ColumnKind;

/// Main error type for wrangle operations.
#[derive(Debug, Error)]
pub enum WrangleError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Two columns share a name.
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Two distinct raw names normalize to the same name.
    #[error("Columns '{first}' and '{second}' both normalize to '{normalized}'")]
    NameCollision {
        first: String,
        second: String,
        normalized: String,
    },

    /// A named column does not exist.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Lengths that must agree do not.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A numeric column was required.
    #[error("Column '{column}' is {kind}, not numeric")]
    NotNumeric { column: String, kind: ColumnKind },

    /// A fill value cannot be stored in the target column.
    #[error("Cannot fill {kind} column '{column}' with {value}")]
    FillKind {
        column: String,
        kind: ColumnKind,
        value: String,
    },

    /// Positional row access past the end of the table.
    #[error("Row index {index} out of bounds for table with {len} rows")]
    RowOutOfBounds { index: usize, len: usize },

    /// Too few observations for a fit or split.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The fit is undefined for this input.
    #[error("Degenerate input: {0}")]
    Degenerate(String),
}

/// Result type alias for wrangle operations.
pub type Result<T> = std::result::Result<T, WrangleError>;
