//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Malformed body, missing `symptoms` key or wrongly typed values.
    BadRequest(String),
    /// Symptom vector width differs from the column schema.
    SchemaMismatch { expected: usize, got: usize },
    NotFound(String),
    /// Detail is logged where the error is raised; only this message is returned.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::SchemaMismatch { expected, got } => (
                StatusCode::BAD_REQUEST,
                format!("schema mismatch: expected {} symptoms, got {}", expected, got),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
