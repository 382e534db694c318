//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures reported by the repository. `NotFound` is kept apart so handlers can answer 404.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("entry not found")]
    NotFound,
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JsonError {
    #[error("unexpected content type")]
    InvalidContentType,
    #[error("malformed json: {0}")]
    Malformed(String),
    #[error("invalid value")]
    InvalidValue,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Store(StoreError::NotFound) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Store(StoreError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::Json(JsonError::InvalidContentType) => (StatusCode::BAD_REQUEST, "invalid_content_type"),
            AppError::Json(JsonError::Malformed(_)) => (StatusCode::BAD_REQUEST, "malformed_json"),
            AppError::Json(JsonError::InvalidValue) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %self, "request failed");
        } else {
            tracing::warn!(status = %status, code, error = %self, "request rejected");
        }
        // Database internals stay in the log.
        let message = match &self {
            AppError::Store(StoreError::Database(_)) | AppError::Internal(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
