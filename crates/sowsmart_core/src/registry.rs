//! Named collection of trained models, loaded once at start-up.

use crate::config::ModelsConfig;
use crate::error::ModelLoadError;
use crate::model::{ModelArtifact, TrainedModel};
use std::fs;
use std::path::Path;

/// All configured models, in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRegistry {
    models: Vec<(String, TrainedModel)>,
}

impl ModelRegistry {
    /// Loads every configured artifact. Any single failure fails the whole load.
    pub fn load(cfg: &ModelsConfig) -> Result<Self, ModelLoadError> {
        if cfg.entries.is_empty() {
            return Err(ModelLoadError::NoModels);
        }
        let mut models = Vec::with_capacity(cfg.entries.len());
        for entry in &cfg.entries {
            let path = cfg.path_of(entry);
            let model = load_model(&entry.name, &path)?;
            tracing::info!(
                "loaded {} ({}, {} classes) from {}",
                entry.name,
                model.algorithm(),
                model.classes().len(),
                path.display()
            );
            models.push((entry.name.clone(), model));
        }
        Ok(Self { models })
    }

    /// Builds a registry from already constructed models.
    pub fn from_models(models: impl IntoIterator<Item = (String, TrainedModel)>) -> Self {
        Self {
            models: models.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TrainedModel> {
        self.models
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    /// Model names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Reads one artifact; the encoding follows the file extension.
pub fn load_model(name: &str, path: &Path) -> Result<TrainedModel, ModelLoadError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    let decode_err = |source: Box<dyn std::error::Error + Send + Sync>| ModelLoadError::Decode {
        name: name.to_string(),
        path: path.to_path_buf(),
        source,
    };
    let read = || {
        fs::read(path).map_err(|source| ModelLoadError::Io {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        })
    };

    let artifact: ModelArtifact = match ext.as_deref() {
        Some("json") => {
            let bytes = read()?;
            serde_json::from_slice(&bytes).map_err(|e| decode_err(Box::new(e)))?
        }
        Some("bin") => {
            let bytes = read()?;
            let (artifact, _) =
                bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
                    .map_err(|e| decode_err(Box::new(e)))?;
            artifact
        }
        _ => {
            return Err(ModelLoadError::UnsupportedFormat {
                name: name.to_string(),
                path: path.to_path_buf(),
            });
        }
    };

    TrainedModel::from_artifact(artifact).map_err(|source| ModelLoadError::Invalid {
        name: name.to_string(),
        source,
    })
}
