//! Error types for the reader API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use reader_types::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("File not found")]
    NotFound,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to read file content")]
    ContentUnavailable,

    #[error("Failed to adjust Lexile level: {0}")]
    RewriteFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::ValidationFailed(msg) => ApiError::InvalidRequest(msg),
            StoreError::ContentUnavailable(_) => ApiError::ContentUnavailable,
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "File not found".to_string()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ContentUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read file content".to_string(),
            ),
            ApiError::RewriteFailed(msg) => {
                tracing::error!("Rewrite failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to adjust Lexile level".to_string(),
                )
            }
            ApiError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
