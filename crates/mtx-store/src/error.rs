use thiserror::Error;

/// Malformed wire-format input. A format error, not a domain error: the
/// uploaded document never became a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableTranslationError {
    #[error("column {column} is not a list of values")]
    NotAList { column: String },

    #[error("column {column} has {actual} values, expected {expected}")]
    UnequalColumnLengths {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} row {row}: nested value, expected a scalar")]
    NonScalarValue { column: String, row: usize },

    #[error("column {column} mixes {first} and {second} values")]
    MixedTypes {
        column: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("table has {cells} cells, exceeding the ingestion limit of {max_cells}")]
    TooLarge { cells: usize, max_cells: usize },
}

/// Errors from table store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table translation failed: {0}")]
    Translation(#[from] TableTranslationError),

    /// A persisted document failed to decode. Data corruption, not a
    /// caller error.
    #[error("corrupt stored table for workflow {workflow}: {reason}")]
    Corrupt { workflow: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
