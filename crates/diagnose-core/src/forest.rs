//! Random forest estimator: averaged class distributions over decision trees.

use serde::{Deserialize, Serialize};

use crate::tree::DecisionTree;
use crate::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("random forest has no trees".into()));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features, n_classes).map_err(|e| {
                ModelError::InvalidArtifact(format!("tree {}: {}", idx, e))
            })?;
        }
        Ok(())
    }

    /// Mean of each tree's normalized leaf distribution for one row.
    pub(crate) fn predict_proba(&self, row: &[f64], n_classes: usize) -> Vec<f64> {
        let mut proba = vec![0.0; n_classes];
        for tree in &self.trees {
            let value = tree.leaf_value(row);
            let total: f64 = value.iter().sum();
            if total <= 0.0 {
                continue;
            }
            for (acc, w) in proba.iter_mut().zip(value) {
                *acc += w / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }

    pub(crate) fn predict_index(&self, row: &[f64], n_classes: usize) -> Option<usize> {
        crate::argmax(&self.predict_proba(row, n_classes))
    }
}
