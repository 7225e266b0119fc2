//! Settings and startup loading of the model and column-schema artifacts.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use diagnose_core::{Classifier, ColumnSchema, ModelArtifact, ModelError, TrainedModel};
use serde::de::DeserializeOwned;
use tracing::info;

pub const DEFAULT_MODEL_PATH: &str = "model/disease_model.json";
pub const DEFAULT_COLUMNS_PATH: &str = "model/columns.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unusable artifact {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("Schema mismatch: model expects {model} features but column schema lists {columns}")]
    SchemaMismatch { model: usize, columns: usize },

    #[error("Invalid bind address '{0}'")]
    BindAddr(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Reads `MODEL_PATH`, `COLUMNS_PATH` and `BIND_ADDR`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.into());
        let columns_path = lookup("COLUMNS_PATH").unwrap_or_else(|| DEFAULT_COLUMNS_PATH.into());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::BindAddr(bind_addr.clone()))?;

        Ok(Self {
            model_path: model_path.into(),
            columns_path: columns_path.into(),
            bind_addr,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Artifacts
// ─────────────────────────────────────────────────────────────────────────────

/// The model and its column schema, cross-checked against each other.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: TrainedModel,
    pub schema: ColumnSchema,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates the trained model artifact.
pub fn load_model(path: &Path) -> Result<TrainedModel, ConfigError> {
    let artifact: ModelArtifact = read_json(path)?;
    let model = TrainedModel::from_artifact(artifact).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Loaded {} model from {} ({} classes, {} features)",
        model.kind(),
        path.display(),
        model.classes().len(),
        model.n_features()
    );
    Ok(model)
}

/// Loads the ordered column schema.
pub fn load_columns(path: &Path) -> Result<ColumnSchema, ConfigError> {
    let columns: Vec<String> = read_json(path)?;
    let schema = ColumnSchema::new(columns).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded {} columns from {}", schema.len(), path.display());
    Ok(schema)
}

/// Loads both artifacts and checks that the model accepts rows as wide as the schema.
pub fn load_artifacts(settings: &Settings) -> Result<Artifacts, ConfigError> {
    let model = load_model(&settings.model_path)?;
    let schema = load_columns(&settings.columns_path)?;

    if model.n_features() != schema.len() {
        return Err(ConfigError::SchemaMismatch {
            model: model.n_features(),
            columns: schema.len(),
        });
    }

    Ok(Artifacts { model, schema })
}
