use thiserror::Error;

use mtx_types::WorkflowId;

/// Errors from workflow admission checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),

    #[error("workflow {workflow} is not owned by {user}")]
    NotOwned { workflow: WorkflowId, user: String },

    #[error("workflow {0} is locked by another operation")]
    WorkflowLocked(WorkflowId),
}

pub type GateResult<T> = Result<T, GateError>;
