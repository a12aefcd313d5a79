use mtx_types::{Table, WorkflowId};

use crate::error::StoreResult;

/// Table persistence, keyed by workflow identifier.
///
/// All implementations must satisfy these invariants:
/// - At most one table per workflow; `store` replaces any existing table.
/// - Replacement is all-or-nothing: a failed `store` leaves the previous
///   table intact (replace-then-commit, never incremental column writes).
/// - `store` runs date/time detection before persisting, so timestamp-like
///   text columns are normalized on the way in.
/// - No internal retries. Transient I/O failures surface to the caller.
pub trait TableStore: Send + Sync {
    /// Read the table attached to a workflow.
    ///
    /// Returns `Ok(None)` if the workflow has no table.
    fn load(&self, workflow: &WorkflowId) -> StoreResult<Option<Table>>;

    /// Attach a table to a workflow, replacing any existing one.
    fn store(&self, workflow: &WorkflowId, table: &Table) -> StoreResult<()>;

    /// Detach the workflow's table. Returns `true` if one existed.
    ///
    /// The workflow itself is untouched; only the table goes away.
    fn delete(&self, workflow: &WorkflowId) -> StoreResult<bool>;

    /// Check whether a workflow has a table attached.
    fn exists(&self, workflow: &WorkflowId) -> StoreResult<bool> {
        Ok(self.load(workflow)?.is_some())
    }
}
