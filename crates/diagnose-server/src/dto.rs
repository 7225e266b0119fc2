//! Data transfer objects for HTTP message serialization.

use diagnose_core::SymptomValue;
use serde::{Deserialize, Serialize};

/// Body of `POST /predict`: symptom indicators in column-schema order.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<SymptomValue>,
}

/// Response from `POST /predict`.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub disease: String,
}

/// Response from `GET /symptoms`.
#[derive(Debug, Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}
