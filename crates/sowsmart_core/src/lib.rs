//! Core of the SowSmart crop recommendation dashboard.
//!
//! Everything the dashboard shows is computed here: validated predictions from
//! the trained models, statistics over an uploaded dataset, the accuracy
//! comparison and the crop guide.

pub mod catalog;
pub mod comparison;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod insight;
pub mod model;
pub mod predict;
pub mod registry;

pub use catalog::{CropCatalog, CropProfile};
pub use comparison::{
    AccuracyEntry, AccuracyTable, ComparisonBar, ComparisonChart, MODEL_NOTES, ModelNotes,
    best_model, comparison_chart,
};
pub use config::{AppConfig, InsightsConfig, ModelEntry, ModelsConfig};
pub use dataset::{Column, ColumnData, Dataset, LABEL_COLUMN, NA_TOKENS, is_missing};
pub use error::{
    ArtifactError, ConfigError, DatasetError, FeatureError, InsightError, ModelLoadError,
    PredictError,
};
pub use features::{FEATURE_COUNT, FEATURE_ORDER, FIELD_BOUNDS, FeatureVector, FieldBounds};
pub use insight::{
    BoxGroup, BoxPlot, FiveNumberSummary, GroupMean, Histogram, InsightSession, MeanComparison,
    distribution, grouped_boxplot, grouped_mean_comparison,
};
pub use model::{
    Classifier, CropClassifier, DecisionTree, KnnClassifier, ModelArtifact, RandomForest,
    StandardScaler, TrainedModel, TreeNode,
};
pub use predict::{InputSummary, ModelContext, PredictionResult, predict};
pub use registry::{ModelRegistry, load_model};
