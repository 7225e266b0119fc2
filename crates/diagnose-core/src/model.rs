//! Model artifact schema and the validated classifier built from it.

use serde::{Deserialize, Serialize};

use crate::forest::RandomForest;
use crate::linear::LinearModel;
use crate::tree::DecisionTree;
use crate::{Classifier, ModelError};

/// On-disk form of a trained model, as written by the training process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Labels in the order the estimator indexes them.
    pub classes: Vec<String>,
    /// Width of the feature rows the estimator was fitted on.
    pub n_features: usize,
    pub estimator: Estimator,
}

/// Supported estimator families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
    Linear(LinearModel),
}

impl Estimator {
    fn kind(&self) -> &'static str {
        match self {
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::RandomForest(_) => "random_forest",
            Estimator::Linear(_) => "linear",
        }
    }
}

/// A model artifact that passed validation and can serve predictions.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    classes: Vec<String>,
    n_features: usize,
    estimator: Estimator,
}

impl TrainedModel {
    /// Validates an artifact's shapes and references.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let ModelArtifact { classes, n_features, estimator } = artifact;

        if classes.is_empty() {
            return Err(ModelError::InvalidArtifact("model declares no classes".into()));
        }
        if n_features == 0 {
            return Err(ModelError::InvalidArtifact("model declares zero features".into()));
        }

        let n_classes = classes.len();
        match &estimator {
            Estimator::DecisionTree(tree) => tree.validate(n_features, n_classes)?,
            Estimator::RandomForest(forest) => forest.validate(n_features, n_classes)?,
            Estimator::Linear(linear) => linear.validate(n_features, n_classes)?,
        }

        Ok(Self { classes, n_features, estimator })
    }

    /// Estimator family name, for logging.
    pub fn kind(&self) -> &'static str {
        self.estimator.kind()
    }

    fn predict_row(&self, row: &[f64]) -> Result<String, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureCount { expected: self.n_features, got: row.len() });
        }

        let idx = match &self.estimator {
            Estimator::DecisionTree(tree) => tree.predict_index(row),
            Estimator::RandomForest(forest) => forest.predict_index(row, self.classes.len()),
            Estimator::Linear(linear) => linear.predict_index(row, self.classes.len()),
        };

        idx.and_then(|i| self.classes.get(i))
            .cloned()
            .ok_or(ModelError::EmptyPrediction)
    }
}

impl Classifier for TrainedModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<String>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}
