//! Column schema listing.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::SymptomsResponse;
use crate::AppContext;

/// Returns symptom names in the order `POST /predict` expects them.
pub async fn list(State(ctx): State<Arc<AppContext>>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: ctx.schema.names().to_vec(),
    })
}
