//! Error types shared by the core components.

use std::path::PathBuf;
use thiserror::Error;

/// A single feature failed validation before reaching a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be a whole number, got {value}")]
    NotInteger { field: &'static str, value: f64 },
    #[error("expected {expected} feature values, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// A decoded model artifact is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArtifactError {
    #[error("class list is empty")]
    NoClasses,
    #[error("class {0} has an empty name")]
    EmptyClassName(usize),
    #[error("trained on features {found:?}, expected {expected:?}")]
    FeatureOrder {
        found: Vec<String>,
        expected: Vec<String>,
    },
    #[error("leaf has {found} class weights, expected {expected}")]
    LeafWidth { found: usize, expected: usize },
    #[error("leaf has a negative or non-finite weight")]
    LeafWeight,
    #[error("split on feature {0} out of range")]
    SplitFeature(usize),
    #[error("split threshold is NaN")]
    SplitThreshold,
    #[error("forest has no trees")]
    EmptyForest,
    #[error("tree {index}: {cause}")]
    Tree {
        index: usize,
        cause: Box<ArtifactError>,
    },
    #[error("n_neighbors must be at least 1")]
    NoNeighbors,
    #[error("{samples} samples but {targets} targets")]
    TargetCount { samples: usize, targets: usize },
    #[error("n_neighbors = {k} exceeds {samples} stored samples")]
    TooFewSamples { k: usize, samples: usize },
    #[error("sample {row} has {found} values")]
    SampleWidth { row: usize, found: usize },
    #[error("target {target} outside {classes} classes")]
    TargetOutOfRange { target: usize, classes: usize },
    #[error("scaler has {means} means and {scales} scales")]
    ScalerWidth { means: usize, scales: usize },
    #[error("scaler has a zero or non-finite scale")]
    ScalerScale,
}

/// Loading the model registry failed; prediction is unavailable for the session.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("cannot read model {name} from {}: {source}", path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode model {name} from {}: {source}", path.display())]
    Decode {
        name: String,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("unsupported model file {} (expected .json or .bin)", path.display())]
    UnsupportedFormat { name: String, path: PathBuf },
    #[error("model {name} is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ArtifactError,
    },
    #[error("no models configured")]
    NoModels,
}

/// A prediction could not be produced.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("models are unavailable")]
    ModelsUnavailable,
    #[error("no model selected")]
    NoModelSelected,
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] FeatureError),
    #[error("model {model} failed: {reason}")]
    Inference { model: String, reason: String },
}

/// An uploaded dataset could not be parsed.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no header row")]
    MissingHeader,
    #[error("column {0} has an empty name")]
    EmptyColumnName(usize),
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
}

/// A dataset visualisation could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    #[error("no data to summarise")]
    NoData,
    #[error("no 'label' column found for crop comparison")]
    MissingLabelColumn,
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column {0} is not numeric")]
    NonNumericColumn(String),
    #[error("the 'label' column cannot be summarised by itself")]
    LabelColumnSelected,
}

/// The configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
