//! HTTP server for the MTX workflow matrix service.
//!
//! Maps the logical matrix operations onto REST verbs. Every handler
//! authenticates, delegates to [`mtx_sdk::MatrixService`], and translates
//! the error taxonomy into HTTP statuses. No tabular logic lives here.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{AuthProvider, Credentials, TokenAuth};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::MtxServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::*;

    fn app() -> Router {
        router::build_router(state::AppState::in_memory())
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn create_workflow(app: &Router, token: &str) -> String {
        let (status, body) = send(
            app.clone(),
            "POST",
            "/v1/workflows",
            Some(token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["workflow_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(app(), "GET", "/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = send(app(), "GET", "/v1/info", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "mtx-server");
    }

    #[tokio::test]
    async fn matrix_crud_lifecycle() {
        let app = app();
        let id = create_workflow(&app, "alice").await;
        let matrix_uri = format!("/v1/workflows/{id}/matrix");

        // No matrix yet: empty document.
        let (status, body) = send(app.clone(), "GET", &matrix_uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        // Create.
        let table = json!({"id": [1.0, 2.0], "name": ["a", "b"]});
        let (status, _) = send(
            app.clone(),
            "POST",
            &matrix_uri,
            Some("alice"),
            Some(table.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Create again: conflict.
        let (status, _) = send(
            app.clone(),
            "POST",
            &matrix_uri,
            Some("alice"),
            Some(table.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Replace.
        let (status, _) = send(
            app.clone(),
            "PUT",
            &matrix_uri,
            Some("alice"),
            Some(json!({"id": [9.0]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Read back the replacement.
        let (_, body) = send(app.clone(), "GET", &matrix_uri, Some("alice"), None).await;
        assert_eq!(body["id"], json!([9.0]));

        // Delete, then the matrix is gone but the workflow is not.
        let (status, _) = send(app.clone(), "DELETE", &matrix_uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(app.clone(), "GET", &matrix_uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn merge_endpoint_returns_merged_table() {
        let app = app();
        let id = create_workflow(&app, "alice").await;
        let matrix_uri = format!("/v1/workflows/{id}/matrix");
        let merge_uri = format!("{matrix_uri}/merge");

        send(
            app.clone(),
            "POST",
            &matrix_uri,
            Some("alice"),
            Some(json!({"id": [1.0, 2.0, 3.0], "name": ["a", "b", "c"]})),
        )
        .await;

        // The merge view offers the destination and a blank template.
        let (status, body) = send(app.clone(), "GET", &merge_uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"]["how"], "");
        assert_eq!(body["matrix"]["id"], json!([1.0, 2.0, 3.0]));

        let (status, body) = send(
            app.clone(),
            "PUT",
            &merge_uri,
            Some("alice"),
            Some(json!({
                "source": {"id": [2.0, 4.0], "email": ["b@x", "d@x"]},
                "how": "outer",
                "left_on": "id",
                "right_on": "id",
                "dup_policy": "rename",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], json!([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(body["email"][3], "d@x");
    }

    #[tokio::test]
    async fn merge_with_bad_key_is_a_request_error() {
        let app = app();
        let id = create_workflow(&app, "alice").await;
        let matrix_uri = format!("/v1/workflows/{id}/matrix");

        send(
            app.clone(),
            "POST",
            &matrix_uri,
            Some("alice"),
            Some(json!({"id": [1.0]})),
        )
        .await;

        let (status, body) = send(
            app.clone(),
            "PUT",
            &format!("{matrix_uri}/merge"),
            Some("alice"),
            Some(json!({
                "source": {"id": [1.0]},
                "how": "left",
                "left_on": "missing",
                "right_on": "id",
                "dup_policy": "rename",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn unknown_join_kind_is_a_client_error() {
        let app = app();
        let id = create_workflow(&app, "alice").await;

        let (status, _) = send(
            app.clone(),
            "PUT",
            &format!("/v1/workflows/{id}/matrix/merge"),
            Some("alice"),
            Some(json!({
                "source": {"id": [1.0]},
                "how": "cross",
                "left_on": "id",
                "right_on": "id",
                "dup_policy": "rename",
            })),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn unknown_workflow_is_404() {
        let app = app();
        let uri = format!("/v1/workflows/{}/matrix", uuid::Uuid::now_v7());
        let (status, _) = send(app, "GET", &uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_owner_is_403() {
        let app = app();
        let id = create_workflow(&app, "alice").await;
        let uri = format!("/v1/workflows/{id}/matrix");
        let (status, _) = send(app, "GET", &uri, Some("mallory"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn superuser_reads_foreign_workflow() {
        let app = app();
        let id = create_workflow(&app, "alice").await;
        let uri = format!("/v1/workflows/{id}/matrix");
        // `root` is in the in-memory state's superuser list.
        let (status, _) = send(app, "GET", &uri, Some("root"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_upload_is_400() {
        let app = app();
        let id = create_workflow(&app, "alice").await;
        let (status, _) = send(
            app.clone(),
            "POST",
            &format!("/v1/workflows/{id}/matrix"),
            Some("alice"),
            Some(json!({"a": [1.0, 2.0], "b": [1.0]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
