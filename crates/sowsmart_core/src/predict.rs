//! Crop prediction on top of the model registry.

use crate::config::ModelsConfig;
use crate::error::{ModelLoadError, PredictError};
use crate::features::FeatureVector;
use crate::registry::ModelRegistry;
use serde::Serialize;

/// Outcome of one successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub crop: String,
    pub model_name: String,
    pub input: FeatureVector,
}

impl PredictionResult {
    pub fn headline(&self) -> String {
        format!("Recommended Crop: {}", self.crop.to_uppercase())
    }

    pub fn subtitle(&self) -> String {
        format!("Predicted using {}", self.model_name)
    }

    pub fn summary(&self) -> InputSummary {
        InputSummary::new(&self.input, &self.model_name)
    }
}

/// Display strings echoing the inputs a prediction was made from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    pub npk: String,
    pub temperature: String,
    pub humidity: String,
    pub ph: String,
    pub rainfall: String,
    pub model: String,
}

impl InputSummary {
    pub fn new(v: &FeatureVector, model: &str) -> Self {
        Self {
            npk: format!("{}-{}-{}", v.nitrogen, v.phosphorus, v.potassium),
            temperature: format!("{:.1}°C", v.temperature),
            humidity: format!("{:.1}%", v.humidity),
            ph: format!("{:.1}", v.ph),
            rainfall: format!("{:.1} cm", v.rainfall),
            model: model.to_string(),
        }
    }
}

/// Predicts a crop with one named model. Inputs are validated first.
pub fn predict(
    registry: &ModelRegistry,
    vector: &FeatureVector,
    model_name: &str,
) -> Result<PredictionResult, PredictError> {
    let model = registry
        .get(model_name)
        .ok_or_else(|| PredictError::UnknownModel(model_name.to_string()))?;
    vector.validate()?;

    let crop = model
        .predict(&vector.to_array())
        .filter(|label| !label.is_empty())
        .ok_or_else(|| PredictError::Inference {
            model: model_name.to_string(),
            reason: "predicted class outside the model's vocabulary".to_string(),
        })?;
    tracing::debug!("{model_name} predicted {crop} for {vector:?}");

    Ok(PredictionResult {
        crop: crop.to_string(),
        model_name: model_name.to_string(),
        input: *vector,
    })
}

/// Read-only model state built once at start-up and handed to every view.
#[derive(Debug)]
pub struct ModelContext {
    registry: Result<ModelRegistry, ModelLoadError>,
}

impl ModelContext {
    /// Loads the registry; failure is kept and reported, never fatal.
    pub fn initialize(cfg: &ModelsConfig) -> Self {
        let registry = ModelRegistry::load(cfg);
        if let Err(e) = &registry {
            tracing::warn!("prediction unavailable: {e}");
        }
        Self { registry }
    }

    pub fn from_registry(registry: ModelRegistry) -> Self {
        Self {
            registry: Ok(registry),
        }
    }

    pub fn unavailable(error: ModelLoadError) -> Self {
        Self {
            registry: Err(error),
        }
    }

    pub fn registry(&self) -> Option<&ModelRegistry> {
        self.registry.as_ref().ok()
    }

    pub fn load_error(&self) -> Option<&ModelLoadError> {
        self.registry.as_ref().err()
    }

    pub fn is_available(&self) -> bool {
        self.registry.is_ok()
    }

    /// Guards against missing models before delegating to [`predict`].
    pub fn predict(
        &self,
        vector: &FeatureVector,
        model_name: Option<&str>,
    ) -> Result<PredictionResult, PredictError> {
        let registry = self.registry().ok_or(PredictError::ModelsUnavailable)?;
        let name = model_name.ok_or(PredictError::NoModelSelected)?;
        predict(registry, vector, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatureError;
    use crate::model::fixtures::{artifact, forest, knn, tree};
    use crate::model::{Classifier, TrainedModel};
    use rstest::rstest;

    fn registry() -> ModelRegistry {
        let m = |c| TrainedModel::from_artifact(artifact(c)).unwrap();
        ModelRegistry::from_models([
            ("Random Forest".to_string(), m(Classifier::RandomForest(forest()))),
            ("Decision Tree".to_string(), m(Classifier::DecisionTree(tree()))),
            ("KNN".to_string(), m(Classifier::Knn(knn()))),
        ])
    }

    #[rstest]
    #[case("Random Forest")]
    #[case("Decision Tree")]
    #[case("KNN")]
    fn label_comes_from_the_model_vocabulary(#[case] name: &str) {
        let reg = registry();
        let result = predict(&reg, &FeatureVector::default(), name).unwrap();
        assert!(!result.crop.is_empty());
        assert!(reg.get(name).unwrap().classes().contains(&result.crop));
        assert_eq!(result.model_name, name);
    }

    #[test]
    fn predictions_are_deterministic() {
        let ctx = ModelContext::from_registry(registry());
        let v = FeatureVector {
            rainfall: 60.0,
            temperature: 28.0,
            ..FeatureVector::default()
        };
        let first = ctx.predict(&v, Some("Random Forest")).unwrap();
        for _ in 0..5 {
            assert_eq!(ctx.predict(&v, Some("Random Forest")).unwrap(), first);
        }
    }

    #[test]
    fn unavailable_conditions_are_distinct() {
        let ctx = ModelContext::unavailable(ModelLoadError::NoModels);
        assert!(!ctx.is_available());
        assert!(matches!(
            ctx.predict(&FeatureVector::default(), Some("KNN")),
            Err(PredictError::ModelsUnavailable)
        ));

        let ctx = ModelContext::from_registry(registry());
        assert!(matches!(
            ctx.predict(&FeatureVector::default(), None),
            Err(PredictError::NoModelSelected)
        ));
        assert!(matches!(
            ctx.predict(&FeatureVector::default(), Some("SVM")),
            Err(PredictError::UnknownModel(name)) if name == "SVM"
        ));
    }

    #[test]
    fn out_of_range_input_never_reaches_the_model() {
        let v = FeatureVector {
            ph: 15.0,
            ..FeatureVector::default()
        };
        match predict(&registry(), &v, "KNN") {
            Err(PredictError::InvalidInput(FeatureError::OutOfRange { field, .. })) => {
                assert_eq!(field, "pH")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn headline_and_summary_formatting() {
        let result = predict(&registry(), &FeatureVector::default(), "Decision Tree").unwrap();
        assert_eq!(result.headline(), "Recommended Crop: RICE");
        assert_eq!(result.subtitle(), "Predicted using Decision Tree");
        let s = result.summary();
        assert_eq!(s.npk, "90-42-43");
        assert_eq!(s.temperature, "20.8°C");
        assert_eq!(s.humidity, "82.0%");
        assert_eq!(s.ph, "6.5");
        assert_eq!(s.rainfall, "203.0 cm");
        assert_eq!(s.model, "Decision Tree");
    }
}
