//! Prediction HTTP handler.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::warn;

use crate::dto::{PredictRequest, PredictResponse};
use crate::error::AppError;
use crate::services::predict::predict_disease;
use crate::AppContext;

/// Maps a symptom vector to a predicted disease.
///
/// Body rejections (bad JSON, missing `symptoms`, non-numeric values) are
/// reported as 400 rather than axum's default 415/422.
pub async fn predict(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        let message = rejection.body_text();
        warn!("Rejected prediction request: {}", message);
        AppError::BadRequest(message)
    })?;

    let disease = predict_disease(&ctx, &req.symptoms).inspect_err(|e| {
        if let AppError::SchemaMismatch { expected, got } = e {
            warn!("Symptom vector has {} values, schema expects {}", got, expected);
        }
    })?;

    Ok(Json(PredictResponse { disease }))
}
