//! Error dispatch handling.
//!
//! Unhandled error responses (an error status with no body type) are caught by
//! [`error_boundary`] and re-answered through [`respond`]: API paths get a JSON
//! error body, everything else gets the SPA document so client-side routing can
//! resolve the path. `/error` is also routable directly; without dispatch
//! attributes it answers 500 with an empty body.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::assets::IndexDocument;
use crate::state::AppState;

pub const ERROR_PATH: &str = "/error";
pub const API_PREFIX: &str = "/api/";

/// Attributes carried by an error dispatch. Both may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDispatch {
    pub status: Option<u16>,
    pub path: Option<String>,
}

impl ErrorDispatch {
    pub fn new(status: u16, path: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            path: Some(path.into()),
        }
    }

    /// Values outside the HTTP status range count as absent.
    fn status_code(&self) -> Option<StatusCode> {
        self.status.and_then(|code| StatusCode::from_u16(code).ok())
    }

    fn is_api(&self) -> bool {
        self.path
            .as_deref()
            .is_some_and(|path| path.starts_with(API_PREFIX))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub path: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, path: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            path: path.into(),
        }
    }
}

pub fn respond(dispatch: &ErrorDispatch, index: &IndexDocument) -> Response {
    let Some(status) = dispatch.status_code() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match dispatch.path.as_deref() {
        Some(path) if dispatch.is_api() => {
            (status, Json(ErrorResponse::new(status, path))).into_response()
        }
        _ => index.clone().into_response(),
    }
}

/// ANY /error
pub async fn handle_error(
    State(state): State<AppState>,
    dispatch: Option<Extension<ErrorDispatch>>,
) -> Response {
    let dispatch = dispatch.map(|Extension(d)| d).unwrap_or_default();
    respond(&dispatch, &state.index)
}

pub async fn error_boundary(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    if path == ERROR_PATH {
        return response;
    }

    let status = response.status();
    let unhandled = (status.is_client_error() || status.is_server_error())
        && !response.headers().contains_key(header::CONTENT_TYPE);
    if !unhandled {
        return response;
    }

    if status.is_server_error() {
        warn!(status = status.as_u16(), %path, "Dispatching server error");
    } else {
        debug!(status = status.as_u16(), %path, "Dispatching client error");
    }

    respond(&ErrorDispatch::new(status.as_u16(), path), &state.index)
}

/// Router fallback; the boundary turns the bare 404 into a dispatch.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body")
            .to_vec()
    }

    #[tokio::test]
    async fn test_api_path_gets_json_with_original_status() {
        let index = IndexDocument::bundled();
        let response = respond(&ErrorDispatch::new(404, "/api/widgets"), &index);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let payload: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({"status": 404, "error": "Not Found", "path": "/api/widgets"})
        );
    }

    #[tokio::test]
    async fn test_server_error_on_api_path_keeps_status() {
        let index = IndexDocument::bundled();
        let response = respond(&ErrorDispatch::new(503, "/api/slides/7"), &index);

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(payload["error"], "Service Unavailable");
        assert_eq!(payload["status"], 503);
    }

    #[tokio::test]
    async fn test_frontend_path_gets_index_with_200() {
        let index = IndexDocument::bundled();
        let response = respond(&ErrorDispatch::new(404, "/dashboard"), &index);

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(body_bytes(response).await, index.as_bytes());
    }

    #[tokio::test]
    async fn test_prefix_match_is_literal() {
        let index = IndexDocument::bundled();
        for path in ["/api", "/apiary", "/v1/api/widgets"] {
            let response = respond(&ErrorDispatch::new(404, path), &index);
            assert_eq!(response.status(), StatusCode::OK, "path {path}");
        }
    }

    #[tokio::test]
    async fn test_missing_path_serves_index() {
        let index = IndexDocument::bundled();
        let dispatch = ErrorDispatch {
            status: Some(404),
            path: None,
        };
        let response = respond(&dispatch, &index);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, index.as_bytes());
    }

    #[tokio::test]
    async fn test_missing_status_is_empty_500() {
        let index = IndexDocument::bundled();
        let dispatch = ErrorDispatch {
            status: None,
            path: Some("/api/widgets".to_string()),
        };
        let response = respond(&dispatch, &index);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_status_counts_as_missing() {
        let index = IndexDocument::bundled();
        let response = respond(&ErrorDispatch::new(42, "/api/widgets"), &index);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_bytes(response).await.is_empty());
    }

    #[test]
    fn test_non_standard_status_has_fallback_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        let body = ErrorResponse::new(status, "/api/x");
        assert_eq!(body.status, 599);
        assert_eq!(body.error, "Unknown Status");
    }

    #[tokio::test]
    async fn test_repeated_dispatches_are_identical() {
        let index = IndexDocument::bundled();
        let dispatch = ErrorDispatch::new(409, "/api/projects/3");

        let first = respond(&dispatch, &index);
        let second = respond(&dispatch, &index);
        assert_eq!(first.status(), second.status());
        assert_eq!(body_bytes(first).await, body_bytes(second).await);
    }
}
