//! Binary decision tree estimator.

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A node of a flattened decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Goes to `left` when `row[feature] <= threshold`, to `right` otherwise.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class weights (sample counts or probabilities).
    Leaf { value: Vec<f64> },
}

/// A decision tree stored as a flat node array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Checks node references, feature indices and leaf widths.
    ///
    /// Children must come after their parent, which rules out cycles and
    /// guarantees traversal terminates.
    pub(crate) fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidArtifact("decision tree has no nodes".into()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= n_features {
                        return Err(ModelError::InvalidArtifact(format!(
                            "node {} splits on feature {} but the model has {} features",
                            idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "node {} has a non-finite threshold",
                            idx
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ModelError::InvalidArtifact(format!(
                                "node {} references invalid child {}",
                                idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::InvalidArtifact(format!(
                            "leaf {} has {} class weights, expected {}",
                            idx,
                            value.len(),
                            n_classes
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walks the tree for one row and returns the reached leaf's weights.
    ///
    /// The tree must have passed [`validate`](Self::validate) and the row
    /// must be as wide as the model.
    pub(crate) fn leaf_value(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    /// Class index with the largest leaf weight for one row.
    pub(crate) fn predict_index(&self, row: &[f64]) -> Option<usize> {
        crate::argmax(self.leaf_value(row))
    }
}
