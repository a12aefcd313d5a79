use std::collections::HashMap;
use std::sync::RwLock;

use mtx_types::{Table, WorkflowId};

use crate::datetime::detect_datetime_columns;
use crate::error::StoreResult;
use crate::traits::TableStore;

/// In-memory, HashMap-based table store.
///
/// Intended for tests and embedding. Tables are held behind a `RwLock`
/// and cloned on read/write, so callers never observe partial state.
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<WorkflowId, Table>>,
}

impl InMemoryTableStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Number of workflows with a table attached.
    pub fn len(&self) -> usize {
        self.tables.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no workflow has a table.
    pub fn is_empty(&self) -> bool {
        self.tables.read().expect("lock poisoned").is_empty()
    }

    /// Drop every stored table.
    pub fn clear(&self) {
        self.tables.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore for InMemoryTableStore {
    fn load(&self, workflow: &WorkflowId) -> StoreResult<Option<Table>> {
        let map = self.tables.read().expect("lock poisoned");
        Ok(map.get(workflow).cloned())
    }

    fn store(&self, workflow: &WorkflowId, table: &Table) -> StoreResult<()> {
        let normalized = detect_datetime_columns(table);
        let mut map = self.tables.write().expect("lock poisoned");
        map.insert(*workflow, normalized);
        Ok(())
    }

    fn delete(&self, workflow: &WorkflowId) -> StoreResult<bool> {
        let mut map = self.tables.write().expect("lock poisoned");
        Ok(map.remove(workflow).is_some())
    }

    fn exists(&self, workflow: &WorkflowId) -> StoreResult<bool> {
        let map = self.tables.read().expect("lock poisoned");
        Ok(map.contains_key(workflow))
    }
}

impl std::fmt::Debug for InMemoryTableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTableStore")
            .field("table_count", &self.len())
            .finish()
    }
}
