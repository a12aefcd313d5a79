use std::sync::Arc;

use mtx_gate::{Identity, WorkflowGate};
use mtx_store::{
    detect_datetime_columns, IngestConfig, InMemoryTableStore, TableDocument, TableStore,
};
use mtx_types::{MergeSpec, Table, WorkflowId};

use crate::error::{ServiceError, ServiceResult};
use crate::view::{MergeTemplate, MergeView};

/// The workflow matrix service.
///
/// Composes admission ([`WorkflowGate`]), persistence ([`TableStore`]) and
/// the merge engine into the five logical operations of the API. Every
/// operation acquires the workflow's advisory lock first and holds it
/// until persistence has completed or failed, so at most one operation is
/// in flight per workflow.
pub struct MatrixService {
    gate: WorkflowGate,
    store: Arc<dyn TableStore>,
    ingest: IngestConfig,
}

impl MatrixService {
    pub fn new(gate: WorkflowGate, store: Arc<dyn TableStore>, ingest: IngestConfig) -> Self {
        Self { gate, store, ingest }
    }

    /// Fully in-memory service. Used by tests and embedding callers.
    pub fn in_memory() -> Self {
        Self::new(
            WorkflowGate::new(),
            Arc::new(InMemoryTableStore::new()),
            IngestConfig::default(),
        )
    }

    pub fn gate(&self) -> &WorkflowGate {
        &self.gate
    }

    /// Register a workflow owned by `identity`.
    pub fn create_workflow(&self, identity: &Identity) -> WorkflowId {
        self.gate.create(identity)
    }

    /// The stored table in wire form; an empty document if none exists.
    pub fn get_matrix(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
    ) -> ServiceResult<TableDocument> {
        let _guard = self.gate.acquire(workflow, identity)?;
        let table = self.store.load(workflow)?;
        Ok(table
            .map(|t| TableDocument::from_table(&t))
            .unwrap_or_default())
    }

    /// Attach a matrix to a workflow that has none.
    pub fn create_matrix(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
        document: &TableDocument,
    ) -> ServiceResult<TableDocument> {
        let _guard = self.gate.acquire(workflow, identity)?;
        if self.store.exists(workflow)? {
            return Err(ServiceError::AlreadyExists(*workflow));
        }
        self.put(workflow, document)
    }

    /// Replace the workflow's matrix unconditionally.
    pub fn replace_matrix(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
        document: &TableDocument,
    ) -> ServiceResult<TableDocument> {
        let _guard = self.gate.acquire(workflow, identity)?;
        self.put(workflow, document)
    }

    /// Detach the workflow's matrix. Returns `true` if one existed; the
    /// workflow record itself stays.
    pub fn delete_matrix(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
    ) -> ServiceResult<bool> {
        let _guard = self.gate.acquire(workflow, identity)?;
        Ok(self.store.delete(workflow)?)
    }

    /// The destination table plus a blank merge-parameter template.
    pub fn merge_view(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
    ) -> ServiceResult<MergeView> {
        let matrix = self.get_matrix(workflow, identity)?;
        Ok(MergeView {
            matrix,
            template: MergeTemplate::default(),
        })
    }

    /// Merge an uploaded source table into the workflow's matrix and
    /// persist the result.
    ///
    /// Validation and planning run before any transformation; on any
    /// engine error the stored table is left untouched.
    pub fn merge_matrix(
        &self,
        workflow: &WorkflowId,
        identity: &Identity,
        source: &TableDocument,
        spec: &MergeSpec,
    ) -> ServiceResult<TableDocument> {
        let _guard = self.gate.acquire(workflow, identity)?;

        let source = source.ingest(&self.ingest)?;
        let destination = self.store.load(workflow)?.unwrap_or_else(Table::empty);

        let merged = mtx_merge::merge(&destination, &source, spec)?;
        let normalized = detect_datetime_columns(&merged);
        self.store.store(workflow, &normalized)?;

        tracing::info!(
            workflow = %workflow,
            how = spec.how.as_str(),
            rows = normalized.n_rows(),
            columns = normalized.n_columns(),
            "merged matrix"
        );
        Ok(TableDocument::from_table(&normalized))
    }

    fn put(
        &self,
        workflow: &WorkflowId,
        document: &TableDocument,
    ) -> ServiceResult<TableDocument> {
        let table = document.ingest(&self.ingest)?;
        self.store.store(workflow, &table)?;
        tracing::info!(
            workflow = %workflow,
            rows = table.n_rows(),
            columns = table.n_columns(),
            "stored matrix"
        );
        Ok(TableDocument::from_table(&table))
    }
}
