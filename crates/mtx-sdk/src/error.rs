use thiserror::Error;

use mtx_gate::GateError;
use mtx_merge::MergeError;
use mtx_store::{StoreError, TableTranslationError};
use mtx_types::WorkflowId;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Create was requested for a workflow that already has a matrix.
    #[error("workflow {0} already has a matrix; delete it first or replace")]
    AlreadyExists(WorkflowId),

    #[error("admission denied: {0}")]
    Gate(#[from] GateError),

    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("table translation failed: {0}")]
    Translation(#[from] TableTranslationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
