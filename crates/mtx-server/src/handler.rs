use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use mtx_gate::Identity;
use mtx_sdk::{MergeView, TableDocument};
use mtx_types::{MergeSpec, WorkflowId};

use crate::auth::Credentials;
use crate::error::ServerResult;
use crate::state::AppState;

/// Health check handler.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "mtx-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Serialize)]
pub struct CreatedWorkflow {
    pub workflow_id: WorkflowId,
}

/// `POST /v1/workflows` — register a workflow owned by the caller.
pub async fn create_workflow(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ServerResult<(StatusCode, Json<CreatedWorkflow>)> {
    let identity = identify(&state, &headers).await?;
    let workflow_id = state.service.create_workflow(&identity);
    Ok((StatusCode::CREATED, Json(CreatedWorkflow { workflow_id })))
}

/// `GET /v1/workflows/{id}/matrix` — the stored table, `{}` if none.
pub async fn get_matrix(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ServerResult<Json<TableDocument>> {
    let identity = identify(&state, &headers).await?;
    let document = state
        .service
        .get_matrix(&WorkflowId::from_uuid(id), &identity)?;
    Ok(Json(document))
}

/// `POST /v1/workflows/{id}/matrix` — attach a matrix; rejected if present.
pub async fn post_matrix(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(document): Json<TableDocument>,
) -> ServerResult<(StatusCode, Json<TableDocument>)> {
    let identity = identify(&state, &headers).await?;
    let stored = state
        .service
        .create_matrix(&WorkflowId::from_uuid(id), &identity, &document)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `PUT /v1/workflows/{id}/matrix` — replace the matrix unconditionally.
pub async fn put_matrix(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(document): Json<TableDocument>,
) -> ServerResult<Json<TableDocument>> {
    let identity = identify(&state, &headers).await?;
    let stored = state
        .service
        .replace_matrix(&WorkflowId::from_uuid(id), &identity, &document)?;
    Ok(Json(stored))
}

/// `DELETE /v1/workflows/{id}/matrix` — detach the matrix.
pub async fn delete_matrix(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ServerResult<StatusCode> {
    let identity = identify(&state, &headers).await?;
    state
        .service
        .delete_matrix(&WorkflowId::from_uuid(id), &identity)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1/workflows/{id}/matrix/merge` — destination table plus a blank
/// parameter template.
pub async fn get_merge_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ServerResult<Json<MergeView>> {
    let identity = identify(&state, &headers).await?;
    let view = state
        .service
        .merge_view(&WorkflowId::from_uuid(id), &identity)?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    pub source: TableDocument,
    #[serde(flatten)]
    pub spec: MergeSpec,
}

/// `PUT /v1/workflows/{id}/matrix/merge` — merge the uploaded source table
/// into the stored one and persist the result.
pub async fn put_merge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<MergeRequest>,
) -> ServerResult<(StatusCode, Json<TableDocument>)> {
    let identity = identify(&state, &headers).await?;
    let merged = state.service.merge_matrix(
        &WorkflowId::from_uuid(id),
        &identity,
        &request.source,
        &request.spec,
    )?;
    Ok((StatusCode::CREATED, Json(merged)))
}

async fn identify(state: &AppState, headers: &HeaderMap) -> ServerResult<Identity> {
    let credentials = Credentials::from_headers(headers);
    state.auth.authenticate(&credentials).await
}
