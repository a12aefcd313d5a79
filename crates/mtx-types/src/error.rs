use thiserror::Error;

use crate::value::ColumnType;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column {column} has {actual} rows, expected {expected}")]
    UnequalColumnLengths {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} row {row}: expected {expected} value, got {actual}")]
    TypeMismatch {
        column: String,
        row: usize,
        expected: ColumnType,
        actual: &'static str,
    },

    #[error("invalid join type: {0} (expected left, right, outer, or inner)")]
    InvalidJoinType(String),

    #[error("invalid duplicate-column policy: {0} (expected override or rename)")]
    InvalidDupPolicy(String),

    #[error("invalid workflow id: {0}")]
    InvalidWorkflowId(String),
}
