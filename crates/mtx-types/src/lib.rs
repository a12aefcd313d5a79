//! Foundation types for the MTX workflow matrix service.
//!
//! This crate provides the tabular data model and merge parameters used
//! throughout the MTX system. Every other MTX crate depends on `mtx-types`.
//!
//! # Key Types
//!
//! - [`Value`] — Dynamically typed scalar cell (text, number, bool, timestamp, null)
//! - [`Column`] — Named, uniformly typed sequence of values
//! - [`Table`] — Ordered collection of equal-length columns with unique names
//! - [`WorkflowId`] — UUID v7 identifier of the workflow a table is attached to
//! - [`MergeSpec`] — Caller-supplied merge parameters (join kind, keys, dup policy)

pub mod error;
pub mod spec;
pub mod table;
pub mod value;
pub mod workflow;

pub use error::TypeError;
pub use spec::{DupPolicy, JoinKind, MergeSpec};
pub use table::{Column, Table};
pub use value::{ColumnType, Value};
pub use workflow::WorkflowId;
