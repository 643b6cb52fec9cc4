//! # HTTP Gate Errors
//!
//! Error types for the request gate and their HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::validator::ValidationError;

/// Result type for gate handlers
pub type HttpResult<T> = Result<T, HttpError>;

/// Request gate errors
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// No schema registered under the requested name
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// Request body violated its schema
    #[error("Request body failed validation with {} error(s)", .0.len())]
    Rejected(Vec<ValidationError>),
}

impl HttpError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::UnknownSchema(_) => StatusCode::NOT_FOUND,
            HttpError::Rejected(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Validation failure body: one message per violation
#[derive(Debug, Serialize)]
pub struct RejectedResponse {
    pub errors: Vec<ValidationError>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            HttpError::Rejected(errors) => (status, Json(RejectedResponse { errors })).into_response(),
            other => {
                let body = ErrorResponse {
                    code: status.as_u16(),
                    error: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
