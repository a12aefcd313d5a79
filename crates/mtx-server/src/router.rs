use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all MTX endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health))
        .route("/v1/info", get(handler::info))
        .route("/v1/workflows", post(handler::create_workflow))
        .route(
            "/v1/workflows/:id/matrix",
            get(handler::get_matrix)
                .post(handler::post_matrix)
                .put(handler::put_matrix)
                .delete(handler::delete_matrix),
        )
        .route(
            "/v1/workflows/:id/matrix/merge",
            get(handler::get_merge_view).put(handler::put_merge),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
