//! Core domain types and error definitions for diagnose.
//!
//! This crate provides the pieces shared by the artifact loader and the HTTP server:
//!
//! - [`Classifier`] — The `predict(rows) -> labels` capability a trained model exposes
//! - [`TrainedModel`] and [`ModelArtifact`] — A validated model and its on-disk form
//! - [`ColumnSchema`] — Ordered feature names the model was trained on
//! - [`SymptomValue`] — A single symptom indicator as submitted by clients
//! - [`ModelError`] — Error type for artifact validation and inference
//!
//! # Example
//!
//! ```rust
//! use diagnose_core::{Classifier, ColumnSchema, ModelArtifact, SymptomValue, TrainedModel};
//!
//! let artifact: ModelArtifact = serde_json::from_str(r#"{
//!     "classes": ["Cold", "Flu"],
//!     "n_features": 2,
//!     "estimator": {
//!         "type": "decision_tree",
//!         "nodes": [
//!             { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
//!             { "value": [1.0, 0.0] },
//!             { "value": [0.0, 1.0] }
//!         ]
//!     }
//! }"#).unwrap();
//!
//! let model = TrainedModel::from_artifact(artifact).unwrap();
//! let schema = ColumnSchema::new(vec!["fever".into(), "cough".into()]).unwrap();
//!
//! let row = schema.to_row(&[SymptomValue::Number(1.0), SymptomValue::Flag(false)]).unwrap();
//! assert_eq!(model.predict(&[row]).unwrap(), vec!["Flu".to_string()]);
//! ```

mod forest;
mod linear;
mod model;
mod schema;
mod tree;

pub use forest::RandomForest;
pub use linear::LinearModel;
pub use model::{Estimator, ModelArtifact, TrainedModel};
pub use schema::ColumnSchema;
pub use tree::{DecisionTree, TreeNode};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating artifacts or running inference.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The model artifact is structurally unusable.
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// The column schema artifact is structurally unusable.
    #[error("invalid column schema: {0}")]
    InvalidSchema(String),

    /// A feature row does not have the width the model was trained on.
    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    /// The classifier produced no label for a submitted row.
    #[error("classifier returned no prediction")]
    EmptyPrediction,
}

/// A pre-trained classifier consumed through a single inference call.
///
/// Implementations are immutable once built and shared across request handlers.
pub trait Classifier: Send + Sync {
    /// Predicts one label per input row, in row order.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<String>, ModelError>;

    /// Number of features each row must carry.
    fn n_features(&self) -> usize;

    /// Labels the classifier can emit.
    fn classes(&self) -> &[String];
}

/// One symptom indicator in a request vector.
///
/// Clients send 0/1 flags by convention; booleans are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymptomValue {
    Flag(bool),
    Number(f64),
}

impl SymptomValue {
    /// Numeric feature value fed to the classifier.
    pub fn as_f64(self) -> f64 {
        match self {
            SymptomValue::Flag(true) => 1.0,
            SymptomValue::Flag(false) => 0.0,
            SymptomValue::Number(n) => n,
        }
    }
}

/// Index of the largest value, first one wins on ties.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}
