//! HTTP route handlers for the prediction server.

pub mod predict;
pub mod symptoms;

use crate::error::AppError;

pub const WELCOME: &str = "Welcome to the Disease Prediction App!";

/// Root endpoint.
pub async fn index() -> &'static str {
    WELCOME
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("not found".into())
}
