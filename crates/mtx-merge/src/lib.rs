//! Merge engine for the MTX workflow matrix service.
//!
//! Given a destination table already attached to a workflow and an incoming
//! source table, the engine validates join feasibility, reconciles colliding
//! column names under the caller's duplicate-column policy, and executes a
//! single-key equi-join to produce the replacement table.
//!
//! The engine is a pure in-memory transform: synchronous, no I/O, no lock
//! state. Persistence and admission control live in `mtx-store` and
//! `mtx-gate`.
//!
//! # Quick Start
//!
//! ```rust
//! use mtx_merge::merge;
//! use mtx_types::{Column, ColumnType, DupPolicy, JoinKind, MergeSpec, Table, Value};
//!
//! let dst = Table::new(vec![
//!     Column::new("id", ColumnType::Number, vec![1.0.into(), 2.0.into()]).unwrap(),
//!     Column::new("name", ColumnType::Text, vec!["ann".into(), "bob".into()]).unwrap(),
//! ]).unwrap();
//! let src = Table::new(vec![
//!     Column::new("id", ColumnType::Number, vec![2.0.into()]).unwrap(),
//!     Column::new("email", ColumnType::Text, vec!["bob@example.com".into()]).unwrap(),
//! ]).unwrap();
//!
//! let spec = MergeSpec::new(JoinKind::Left, "id", "id", DupPolicy::Rename);
//! let merged = merge(&dst, &src, &spec).unwrap();
//! assert_eq!(merged.n_rows(), 2);
//! ```

pub mod error;
pub mod join;
pub mod reconcile;
pub mod validate;

pub use error::{MergeError, MergeResult, Side};
pub use join::execute;
pub use reconcile::{plan, ColumnRename, ReconciliationPlan};
pub use validate::validate;

use mtx_types::{MergeSpec, Table};

/// Run the full pipeline: validate, plan reconciliation, execute the join.
///
/// Aborts before any transformation on a validation failure; the
/// destination table is never touched on error.
pub fn merge(destination: &Table, source: &Table, spec: &MergeSpec) -> MergeResult<Table> {
    validate::validate(destination, source, spec)?;
    let plan = reconcile::plan(destination, source, spec);
    join::execute(destination, source, spec, &plan)
}
