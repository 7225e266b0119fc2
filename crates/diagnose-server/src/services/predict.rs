//! Disease prediction service: schema check, single-row inference.

use diagnose_core::{ModelError, SymptomValue};
use tracing::{debug, error};

use crate::error::AppError;
use crate::AppContext;

/// Predicts the disease label for one symptom vector.
pub fn predict_disease(ctx: &AppContext, symptoms: &[SymptomValue]) -> Result<String, AppError> {
    let row = ctx.schema.to_row(symptoms).map_err(|e| match e {
        ModelError::FeatureCount { expected, got } => AppError::SchemaMismatch { expected, got },
        other => AppError::BadRequest(other.to_string()),
    })?;

    let predictions = ctx.model.predict(&[row]).map_err(|e| {
        error!("Model prediction failed: {}", e);
        AppError::Internal("prediction failed".into())
    })?;

    let disease = predictions.into_iter().next().ok_or_else(|| {
        error!("Model returned no prediction for a single-row input");
        AppError::Internal("prediction failed".into())
    })?;

    debug!("Predicted disease: {}", disease);
    Ok(disease)
}
