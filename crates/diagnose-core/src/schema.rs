//! Ordered feature-column schema the model was trained on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ModelError, SymptomValue};

/// Non-empty, duplicate-free list of symptom names in training order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, ModelError> {
        if columns.is_empty() {
            return Err(ModelError::InvalidSchema("no columns".into()));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ModelError::InvalidSchema(format!("duplicate column '{}'", dup)));
        }

        Ok(Self { columns })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    /// Checks a symptom vector against the schema width and converts it to a feature row.
    pub fn to_row(&self, symptoms: &[SymptomValue]) -> Result<Vec<f64>, ModelError> {
        if symptoms.len() != self.columns.len() {
            return Err(ModelError::FeatureCount {
                expected: self.columns.len(),
                got: symptoms.len(),
            });
        }
        Ok(symptoms.iter().map(|s| s.as_f64()).collect())
    }
}

impl TryFrom<Vec<String>> for ColumnSchema {
    type Error = ModelError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ColumnSchema> for Vec<String> {
    fn from(schema: ColumnSchema) -> Self {
        schema.columns
    }
}
