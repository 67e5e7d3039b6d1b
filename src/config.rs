//! Service configuration

use serde::{Deserialize, Serialize};

/// Configuration for assembling a prediction service: where the serialized
/// artifacts live and, optionally, where the booking dataset lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Path to the serialized feature transformer
    pub transformer_path: String,

    /// Path to the serialized classifier
    pub classifier_path: String,

    /// Path to the booking dataset CSV. `None` for deployments that ship
    /// without local data; those serve every query as unavailable.
    pub dataset_path: Option<String>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            transformer_path: "column_transformer.json".to_string(),
            classifier_path: "hotel_lr_model.json".to_string(),
            dataset_path: Some("hotel_bookings_with_id.csv".to_string()),
        }
    }
}

impl PredictorConfig {
    /// Create a new configuration with default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the transformer path
    pub fn with_transformer_path(mut self, path: impl Into<String>) -> Self {
        self.transformer_path = path.into();
        self
    }

    /// Builder method to set the classifier path
    pub fn with_classifier_path(mut self, path: impl Into<String>) -> Self {
        self.classifier_path = path.into();
        self
    }

    /// Builder method to set the dataset path
    pub fn with_dataset_path(mut self, path: impl Into<String>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Builder method for deployments with no local dataset
    pub fn without_dataset(mut self) -> Self {
        self.dataset_path = None;
        self
    }
}
