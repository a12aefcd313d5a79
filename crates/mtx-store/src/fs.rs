use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use mtx_types::{Table, WorkflowId};

use crate::datetime::detect_datetime_columns;
use crate::error::{StoreError, StoreResult};
use crate::traits::TableStore;
use crate::wire::TableDocument;

/// Filesystem-backed table store: one JSON table document per workflow
/// under a root directory.
///
/// Writes are replace-then-commit: the document lands in a temp file in
/// the same directory and is renamed over the previous one, so a crash
/// mid-write leaves the old table intact.
pub struct FsTableStore {
    root: PathBuf,
}

impl FsTableStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, workflow: &WorkflowId) -> PathBuf {
        self.root.join(format!("{workflow}.json"))
    }
}

impl TableStore for FsTableStore {
    fn load(&self, workflow: &WorkflowId) -> StoreResult<Option<Table>> {
        let path = self.path_for(workflow);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document: TableDocument =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Corrupt {
                workflow: workflow.to_string(),
                reason: e.to_string(),
            })?;
        let table = document.to_table().map_err(|e| StoreError::Corrupt {
            workflow: workflow.to_string(),
            reason: e.to_string(),
        })?;
        // Timestamps were serialized as text; re-detect so the logical
        // type survives the round trip.
        Ok(Some(detect_datetime_columns(&table)))
    }

    fn store(&self, workflow: &WorkflowId, table: &Table) -> StoreResult<()> {
        let normalized = detect_datetime_columns(table);
        let document = TableDocument::from_table(&normalized);
        let encoded = serde_json::to_vec_pretty(&document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(&encoded)?;
        tmp.flush()?;
        tmp.persist(self.path_for(workflow))
            .map_err(|e| StoreError::Io(e.error))?;

        tracing::debug!(workflow = %workflow, bytes = encoded.len(), "stored table");
        Ok(())
    }

    fn delete(&self, workflow: &WorkflowId) -> StoreResult<bool> {
        match fs::remove_file(self.path_for(workflow)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, workflow: &WorkflowId) -> StoreResult<bool> {
        Ok(self.path_for(workflow).exists())
    }
}

#[cfg(test)]
mod tests {
    use mtx_types::{Column, ColumnType, Value};

    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::new(
                "id",
                ColumnType::Number,
                vec![Value::from(1.0), Value::from(2.0)],
            )
            .unwrap(),
            Column::new(
                "when",
                ColumnType::Text,
                vec![Value::from("2024-01-01"), Value::from("2024-01-02")],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, FsTableStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTableStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn roundtrip_preserves_columns_and_values() {
        let (_dir, store) = temp_store();
        let id = WorkflowId::new();
        store.store(&id, &sample_table()).unwrap();

        let loaded = store.load(&id).unwrap().expect("should exist");
        let names: Vec<&str> = loaded.column_names().collect();
        assert_eq!(names, ["id", "when"]);
        assert_eq!(loaded.n_rows(), 2);
        // Date-like text came back as a timestamp column.
        assert_eq!(loaded.column("when").unwrap().ty(), ColumnType::Timestamp);
    }

    #[test]
    fn load_missing_returns_none() {
        let (_dir, store) = temp_store();
        assert!(store.load(&WorkflowId::new()).unwrap().is_none());
    }

    #[test]
    fn store_replaces_previous_document() {
        let (_dir, store) = temp_store();
        let id = WorkflowId::new();
        store.store(&id, &sample_table()).unwrap();

        let replacement = Table::new(vec![Column::new(
            "v",
            ColumnType::Number,
            vec![Value::from(7.0)],
        )
        .unwrap()])
        .unwrap();
        store.store(&id, &replacement).unwrap();

        let loaded = store.load(&id).unwrap().unwrap();
        assert_eq!(loaded.n_columns(), 1);
        assert!(loaded.has_column("v"));
    }

    #[test]
    fn delete_removes_file() {
        let (_dir, store) = temp_store();
        let id = WorkflowId::new();
        store.store(&id, &sample_table()).unwrap();

        assert!(store.delete(&id).unwrap());
        assert!(!store.exists(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
    }

    #[test]
    fn corrupt_document_is_reported() {
        let (_dir, store) = temp_store();
        let id = WorkflowId::new();
        fs::write(store.root().join(format!("{id}.json")), b"not json").unwrap();

        let err = store.load(&id).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn open_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/tables");
        let store = FsTableStore::open(&nested).unwrap();
        assert!(nested.exists());
        assert!(store.load(&WorkflowId::new()).unwrap().is_none());
    }
}
