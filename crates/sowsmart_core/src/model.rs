//! Trained crop classifiers and their serialized artifact format.
//!
//! An artifact carries the class vocabulary, the feature order it was trained
//! on and one classifier. Three algorithm families are supported: a single
//! decision tree, a random forest of such trees (soft voting) and k-nearest
//! neighbours over stored training samples.

use crate::error::ArtifactError;
use crate::features::{FEATURE_COUNT, FEATURE_ORDER};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Common prediction capability of every algorithm family.
pub trait CropClassifier {
    /// Index into the class vocabulary for one input in model order.
    fn predict_class(&self, features: &[f64; FEATURE_COUNT]) -> usize;

    /// Human readable algorithm family.
    fn algorithm(&self) -> &'static str;

    /// Checks internal consistency against the class count.
    fn check(&self, n_classes: usize) -> Result<(), ArtifactError>;
}

/// Decision tree node. Splits send `x[feature] <= threshold` to the left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        /// Class weights (sample counts or probabilities), one per class.
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn leaf(&self, features: &[f64; FEATURE_COUNT]) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { distribution } => return distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn check(&self, n_classes: usize) -> Result<(), ArtifactError> {
        match self {
            TreeNode::Leaf { distribution } => {
                if distribution.len() != n_classes {
                    return Err(ArtifactError::LeafWidth {
                        found: distribution.len(),
                        expected: n_classes,
                    });
                }
                if distribution.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(ArtifactError::LeafWeight);
                }
                Ok(())
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(ArtifactError::SplitFeature(*feature));
                }
                if threshold.is_nan() {
                    return Err(ArtifactError::SplitThreshold);
                }
                left.check(n_classes)?;
                right.check(n_classes)
            }
        }
    }
}

/// A single decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl CropClassifier for DecisionTree {
    fn predict_class(&self, features: &[f64; FEATURE_COUNT]) -> usize {
        argmax(self.root.leaf(features))
    }

    fn algorithm(&self) -> &'static str {
        "decision tree"
    }

    fn check(&self, n_classes: usize) -> Result<(), ArtifactError> {
        self.root.check(n_classes)
    }
}

/// Ensemble of decision trees averaging their leaf probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl CropClassifier for RandomForest {
    fn predict_class(&self, features: &[f64; FEATURE_COUNT]) -> usize {
        let mut totals: Vec<f64> = Vec::new();
        for tree in &self.trees {
            let dist = tree.root.leaf(features);
            if totals.is_empty() {
                totals = vec![0.0; dist.len()];
            }
            let sum: f64 = dist.iter().sum();
            if sum > 0.0 {
                for (t, w) in totals.iter_mut().zip(dist) {
                    *t += w / sum;
                }
            }
        }
        argmax(&totals)
    }

    fn algorithm(&self) -> &'static str {
        "random forest"
    }

    fn check(&self, n_classes: usize) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::EmptyForest);
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.check(n_classes).map_err(|e| ArtifactError::Tree {
                index,
                cause: Box::new(e),
            })?;
        }
        Ok(())
    }
}

/// Per-feature standardisation applied before distance computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn transform(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = *features;
        for (i, v) in out.iter_mut().enumerate() {
            *v = (*v - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// K-nearest neighbours with uniform voting and Euclidean distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnClassifier {
    pub n_neighbors: usize,
    /// Training samples, already scaled when `scaler` is set.
    pub samples: Vec<Vec<f64>>,
    /// Class index of each sample.
    pub targets: Vec<usize>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

impl CropClassifier for KnnClassifier {
    fn predict_class(&self, features: &[f64; FEATURE_COUNT]) -> usize {
        let query = match &self.scaler {
            Some(scaler) => scaler.transform(features),
            None => *features,
        };
        let mut neighbours: Vec<(f64, usize)> = self
            .samples
            .iter()
            .zip(&self.targets)
            .map(|(sample, &target)| (euclidean(&query, sample), target))
            .collect();
        // stable sort: equal distances keep sample order
        neighbours.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let n_classes = self.targets.iter().max().map_or(0, |m| m + 1);
        let mut votes = vec![0.0; n_classes];
        for &(_, target) in neighbours.iter().take(self.n_neighbors) {
            votes[target] += 1.0;
        }
        argmax(&votes)
    }

    fn algorithm(&self) -> &'static str {
        "k-nearest neighbours"
    }

    fn check(&self, n_classes: usize) -> Result<(), ArtifactError> {
        if self.n_neighbors == 0 {
            return Err(ArtifactError::NoNeighbors);
        }
        if self.samples.len() != self.targets.len() {
            return Err(ArtifactError::TargetCount {
                samples: self.samples.len(),
                targets: self.targets.len(),
            });
        }
        if self.n_neighbors > self.samples.len() {
            return Err(ArtifactError::TooFewSamples {
                k: self.n_neighbors,
                samples: self.samples.len(),
            });
        }
        if let Some((row, s)) = self
            .samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != FEATURE_COUNT)
        {
            return Err(ArtifactError::SampleWidth {
                row,
                found: s.len(),
            });
        }
        if let Some(&target) = self.targets.iter().find(|&&t| t >= n_classes) {
            return Err(ArtifactError::TargetOutOfRange {
                target,
                classes: n_classes,
            });
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
                return Err(ArtifactError::ScalerWidth {
                    means: scaler.mean.len(),
                    scales: scaler.scale.len(),
                });
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(ArtifactError::ScalerScale);
            }
        }
        Ok(())
    }
}

/// Algorithm-specific payload of an artifact.
/// Externally tagged so both JSON and bincode can decode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
    Knn(KnnClassifier),
}

impl Classifier {
    fn inner(&self) -> &dyn CropClassifier {
        match self {
            Classifier::DecisionTree(m) => m,
            Classifier::RandomForest(m) => m,
            Classifier::Knn(m) => m,
        }
    }
}

/// On-disk representation of one trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature names in training order; empty when the exporter did not record them.
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub classifier: Classifier,
}

/// A validated, immutable model ready for prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    classes: Vec<String>,
    classifier: Classifier,
}

impl TrainedModel {
    /// Validates an artifact and turns it into a usable model.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        if artifact.classes.is_empty() {
            return Err(ArtifactError::NoClasses);
        }
        if let Some(idx) = artifact.classes.iter().position(|c| c.trim().is_empty()) {
            return Err(ArtifactError::EmptyClassName(idx));
        }
        if !artifact.feature_names.is_empty() && artifact.feature_names != FEATURE_ORDER {
            return Err(ArtifactError::FeatureOrder {
                found: artifact.feature_names,
                expected: FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
            });
        }
        artifact.classifier.inner().check(artifact.classes.len())?;
        Ok(Self {
            classes: artifact.classes,
            classifier: artifact.classifier,
        })
    }

    /// Crop label for one input in model order.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Option<&str> {
        let idx = self.classifier.inner().predict_class(features);
        self.classes.get(idx).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn algorithm(&self) -> &'static str {
        self.classifier.inner().algorithm()
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// First index of the largest value; 0 for an empty slice.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = idx;
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::features::FeatureVector;

    fn model(classifier: Classifier) -> TrainedModel {
        TrainedModel::from_artifact(artifact(classifier)).unwrap()
    }

    #[test]
    fn decision_tree_follows_thresholds() {
        let m = model(Classifier::DecisionTree(tree()));
        let wet = FeatureVector::default();
        assert_eq!(m.predict(&wet.to_array()), Some("rice"));

        let dry_cold = FeatureVector {
            rainfall: 100.0,
            temperature: 12.0,
            ..FeatureVector::default()
        };
        assert_eq!(m.predict(&dry_cold.to_array()), Some("apple"));

        // threshold itself goes left
        let edge = FeatureVector {
            rainfall: 150.0,
            temperature: 20.0,
            ..FeatureVector::default()
        };
        assert_eq!(m.predict(&edge.to_array()), Some("apple"));
    }

    #[test]
    fn forest_averages_normalised_leaves() {
        let m = model(Classifier::RandomForest(forest()));
        // two trees vote maize (0.8), the humid tree splits maize/apple
        let dry_warm_humid_low = FeatureVector {
            rainfall: 90.0,
            temperature: 26.0,
            humidity: 60.0,
            ..FeatureVector::default()
        };
        assert_eq!(m.predict(&dry_warm_humid_low.to_array()), Some("maize"));
        assert_eq!(m.algorithm(), "random forest");
    }

    #[test]
    fn knn_majority_vote() {
        let m = model(Classifier::Knn(knn()));
        let query = FeatureVector {
            nitrogen: 22,
            phosphorus: 132,
            potassium: 198,
            temperature: 15.5,
            humidity: 91.0,
            ph: 6.0,
            rainfall: 112.0,
        };
        assert_eq!(m.predict(&query.to_array()), Some("apple"));
        assert_eq!(m.predict(&FeatureVector::default().to_array()), Some("rice"));
    }

    #[test]
    fn knn_applies_scaler() {
        let mut k = knn();
        k.n_neighbors = 1;
        k.samples = vec![vec![0.0; 7], vec![1.0; 7]];
        k.targets = vec![0, 1];
        k.scaler = Some(StandardScaler {
            mean: vec![100.0; 7],
            scale: vec![100.0; 7],
        });
        let m = model(Classifier::Knn(k));
        // (200 - 100) / 100 = 1.0 in every dimension
        assert_eq!(m.predict(&[200.0; 7]), Some("maize"));
        assert_eq!(m.predict(&[100.0; 7]), Some("rice"));
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn feature_order_mismatch_is_rejected() {
        let mut a = artifact(Classifier::DecisionTree(tree()));
        a.feature_names.swap(5, 6);
        let err = TrainedModel::from_artifact(a).unwrap_err();
        match err {
            ArtifactError::FeatureOrder { found, expected } => {
                assert_eq!(found[5], "rainfall");
                assert_eq!(expected[5], "ph");
            }
            other => panic!("expected FeatureOrder, got {other:?}"),
        }
    }

    #[test]
    fn missing_feature_names_are_accepted() {
        let mut a = artifact(Classifier::DecisionTree(tree()));
        a.feature_names.clear();
        assert!(TrainedModel::from_artifact(a).is_ok());
    }

    #[test]
    fn inconsistent_models_are_rejected() {
        let mut bad_leaf = artifact(Classifier::DecisionTree(tree()));
        bad_leaf.classes.pop();
        assert_eq!(
            TrainedModel::from_artifact(bad_leaf),
            Err(ArtifactError::LeafWidth {
                found: 3,
                expected: 2
            })
        );

        let empty_forest = artifact(Classifier::RandomForest(RandomForest { trees: vec![] }));
        assert_eq!(
            TrainedModel::from_artifact(empty_forest),
            Err(ArtifactError::EmptyForest)
        );

        let mut k = knn();
        k.n_neighbors = 10;
        assert_eq!(
            TrainedModel::from_artifact(artifact(Classifier::Knn(k))),
            Err(ArtifactError::TooFewSamples { k: 10, samples: 6 })
        );

        let mut k = knn();
        k.targets[0] = 7;
        assert_eq!(
            TrainedModel::from_artifact(artifact(Classifier::Knn(k))),
            Err(ArtifactError::TargetOutOfRange {
                target: 7,
                classes: 3
            })
        );

        let mut split = tree();
        if let TreeNode::Split { feature, .. } = &mut split.root {
            *feature = 9;
        }
        assert_eq!(
            TrainedModel::from_artifact(artifact(Classifier::DecisionTree(split))),
            Err(ArtifactError::SplitFeature(9))
        );
    }

    #[test]
    fn forest_errors_name_the_tree() {
        let mut f = forest();
        if let TreeNode::Split { threshold, .. } = &mut f.trees[1].root {
            *threshold = f64::NAN;
        }
        let err = TrainedModel::from_artifact(artifact(Classifier::RandomForest(f))).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::Tree {
                index: 1,
                cause: Box::new(ArtifactError::SplitThreshold)
            }
        );
        assert_eq!(err.to_string(), "tree 1: split threshold is NaN");
    }

    #[test]
    fn artifact_json_is_tagged_by_algorithm() {
        let json = serde_json::to_value(artifact(Classifier::Knn(knn()))).unwrap();
        assert_eq!(json["classifier"]["knn"]["n_neighbors"], 3);
        let back: ModelArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(back.classes, classes());
    }
}
