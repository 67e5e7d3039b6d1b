//! Classifier artifact
//!
//! A logistic model trained offline: weight vector plus intercept. The
//! crate never fits it, only deserializes and evaluates it.

use crate::error::{Result, StayriskError};
use serde::{Deserialize, Serialize};

use super::transformer::EncodedFeatures;

/// Capability interface for the classifier artifact, so tests can
/// substitute deterministic doubles for the trained model.
pub trait Classifier: Send + Sync {
    /// Cancellation probability in [0, 1] for one encoded record
    fn predict_probability(&self, features: &EncodedFeatures) -> Result<f64>;
}

/// Pre-trained logistic regression over encoded features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticClassifier {
    /// Create a classifier from trained parameters
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Number of input features the model expects
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Save the classifier to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a classifier from a file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            StayriskError::ArtifactError(format!("cannot read classifier at {path}: {e}"))
        })?;
        let classifier: Self = serde_json::from_str(&json).map_err(|e| {
            StayriskError::ArtifactError(format!("corrupt classifier at {path}: {e}"))
        })?;
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(StayriskError::ArtifactError(
                "classifier has no weights".to_string(),
            ));
        }
        if !self.weights.iter().all(|w| w.is_finite()) || !self.intercept.is_finite() {
            return Err(StayriskError::ArtifactError(
                "classifier has non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticClassifier {
    fn predict_probability(&self, features: &EncodedFeatures) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(StayriskError::ShapeError {
                expected: format!("{} features", self.weights.len()),
                actual: format!("{} features", features.len()),
            });
        }

        let z: f64 = self.intercept
            + self
                .weights
                .iter()
                .zip(features.values().iter())
                .map(|(w, x)| w * x)
                .sum::<f64>();

        Ok(1.0 / (1.0 + (-z).exp()))
    }
}
