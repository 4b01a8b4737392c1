use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the dish and order pipelines.
///
/// Every request resolves to at most one of these; the first failing
/// validator wins and nothing after it runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A request payload failed a field check.
    #[error("{0}")]
    Validation(String),

    /// No record with the requested id.
    #[error("{0}")]
    NotFound(String),

    /// The record exists but its lifecycle state forbids the operation.
    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
