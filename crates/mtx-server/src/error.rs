use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use mtx_gate::GateError;
use mtx_merge::MergeError;
use mtx_sdk::ServiceError;
use mtx_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status for this error. Request errors map to 4xx with their
    /// message; invariant violations and storage faults are 500s reported
    /// opaquely.
    fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::AlreadyExists(_)) => StatusCode::CONFLICT,
            Self::Service(ServiceError::Gate(e)) => match e {
                GateError::WorkflowNotFound(_) => StatusCode::NOT_FOUND,
                GateError::NotOwned { .. } => StatusCode::FORBIDDEN,
                GateError::WorkflowLocked(_) => StatusCode::LOCKED,
            },
            Self::Service(ServiceError::Merge(MergeError::JoinExecutionError(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Service(ServiceError::Merge(_)) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Translation(_)) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Store(StoreError::Translation(_))) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            // Internal detail goes to the log, not the wire.
            tracing::error!(error = %self, "request failed");
            json!({ "error": "internal error" })
        } else {
            json!({ "error": self.to_string() })
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use mtx_merge::Side;
    use mtx_types::WorkflowId;

    use super::*;

    #[test]
    fn request_errors_are_4xx() {
        let err = ServerError::Service(ServiceError::Merge(MergeError::KeyNotUnique {
            side: Side::Source,
            column: "id".into(),
        }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ServerError::Service(ServiceError::AlreadyExists(WorkflowId::new()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn state_errors_map_to_dedicated_statuses() {
        let id = WorkflowId::new();
        let not_found = ServerError::Service(GateError::WorkflowNotFound(id).into());
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let locked = ServerError::Service(GateError::WorkflowLocked(id).into());
        assert_eq!(locked.status(), StatusCode::LOCKED);

        let not_owned = ServerError::Service(
            GateError::NotOwned {
                workflow: id,
                user: "bob".into(),
            }
            .into(),
        );
        assert_eq!(not_owned.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn execution_errors_are_opaque_500s() {
        let err = ServerError::Service(ServiceError::Merge(
            MergeError::JoinExecutionError("secret internals".into()),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
