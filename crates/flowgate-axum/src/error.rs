//! HTTP error mapping.
//!
//! Maps [`CoreError`] to status codes and the `{code, message}` JSON
//! body clients consume. Backend detail never crosses this boundary:
//! it is logged here and replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flowgate_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Generic client-facing message for any backend failure.
const INTERNAL_MESSAGE: &str = "Unable to complete request";

/// Adapter-level error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything the client should not learn details about. The string
    /// is the client-facing message, already redacted.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };
        (status, axum::Json(ErrorBody { code, message })).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        if err.is_not_found() {
            return Self::NotFound(err.to_string());
        }
        // Full detail stays on the server side of the boundary.
        tracing::error!(target: "flowgate.http", error = %err, "request failed");
        Self::Internal(INTERNAL_MESSAGE.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_keeps_resource_name() {
        let response = HttpError::from(CoreError::NotFound("workflow ns/wf".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "not found: workflow ns/wf");
    }

    #[tokio::test]
    async fn backend_detail_is_redacted() {
        let response =
            HttpError::from(CoreError::Internal("secret key material".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }
}
