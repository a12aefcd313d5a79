use std::fmt;

use thiserror::Error;

use mtx_types::TypeError;

/// Which table a key error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Destination,
    Source,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destination => write!(f, "destination"),
            Self::Source => write!(f, "source"),
        }
    }
}

/// Errors produced by the merge engine.
///
/// Everything except `JoinExecutionError` is caller-fixable: the request
/// named a missing or non-unique key, or an out-of-domain parameter.
/// `JoinExecutionError` signals an internal invariant violation and is
/// reported generically upstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("invalid join type: {0} (expected left, right, outer, or inner)")]
    InvalidJoinType(String),

    #[error("invalid duplicate-column policy: {0} (expected override or rename)")]
    InvalidDupPolicy(String),

    #[error("column {column} not found in {side} table")]
    KeyNotFound { side: Side, column: String },

    #[error("column {column} in {side} table does not contain a unique key")]
    KeyNotUnique { side: Side, column: String },

    #[error("join execution failed: {0}")]
    JoinExecutionError(String),
}

impl From<TypeError> for MergeError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidJoinType(s) => Self::InvalidJoinType(s),
            TypeError::InvalidDupPolicy(s) => Self::InvalidDupPolicy(s),
            // Table construction failures inside the executor are invariant
            // violations, not caller errors.
            other => Self::JoinExecutionError(other.to_string()),
        }
    }
}

pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_display() {
        assert_eq!(format!("{}", Side::Destination), "destination");
        assert_eq!(format!("{}", Side::Source), "source");
    }

    #[test]
    fn key_errors_name_the_column() {
        let err = MergeError::KeyNotUnique {
            side: Side::Source,
            column: "sku".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sku"));
        assert!(msg.contains("source"));
    }

    #[test]
    fn parse_errors_convert_losslessly() {
        let err: MergeError = TypeError::InvalidJoinType("cross".into()).into();
        assert_eq!(err, MergeError::InvalidJoinType("cross".into()));

        let err: MergeError = TypeError::InvalidDupPolicy("zip".into()).into();
        assert_eq!(err, MergeError::InvalidDupPolicy("zip".into()));
    }

    #[test]
    fn construction_errors_become_execution_errors() {
        let err: MergeError = TypeError::DuplicateColumn("x".into()).into();
        assert!(matches!(err, MergeError::JoinExecutionError(_)));
    }
}
