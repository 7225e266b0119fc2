//! Linear classifier (logistic regression, linear SVM and friends).

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// One coefficient row per class, or a single row for a binary model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    pub(crate) fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        let rows = self.coefficients.len();
        let binary = rows == 1 && n_classes == 2;
        if rows != n_classes && !binary {
            return Err(ModelError::InvalidArtifact(format!(
                "linear model has {} coefficient rows for {} classes",
                rows, n_classes
            )));
        }
        if self.intercepts.len() != rows {
            return Err(ModelError::InvalidArtifact(format!(
                "linear model has {} intercepts for {} coefficient rows",
                self.intercepts.len(),
                rows
            )));
        }
        if let Some(width) = self.coefficients.iter().map(Vec::len).find(|&w| w != n_features) {
            return Err(ModelError::InvalidArtifact(format!(
                "coefficient row has {} entries, expected {}",
                width, n_features
            )));
        }
        Ok(())
    }

    fn decision_function(&self, row: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(coef, b)| coef.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }

    pub(crate) fn predict_index(&self, row: &[f64], n_classes: usize) -> Option<usize> {
        let scores = self.decision_function(row);
        match scores.as_slice() {
            [score] if n_classes == 2 => Some(usize::from(*score > 0.0)),
            _ => crate::argmax(&scores),
        }
    }
}
