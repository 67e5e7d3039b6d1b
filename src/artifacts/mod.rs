//! Pre-trained model artifacts
//!
//! Two opaque objects produced by an offline training pipeline: a feature
//! transformer and a classifier. They are loaded from disk once per
//! process, shared immutably, and never refreshed. A missing or corrupt
//! artifact is fatal at startup; there is no degraded mode without a model.

mod classifier;
mod transformer;

pub use classifier::{Classifier, LogisticClassifier};
pub use transformer::{ColumnTransformer, EncodedFeatures, FeatureTransformer};

use crate::error::Result;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// The loaded artifact pair, shared across the process
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub transformer: Arc<ColumnTransformer>,
    pub classifier: Arc<LogisticClassifier>,
}

static PROCESS_ARTIFACTS: OnceLock<Arc<Artifacts>> = OnceLock::new();

/// Loads the transformer/classifier pair from disk
pub struct ArtifactStore;

impl ArtifactStore {
    /// Load both artifacts with process-wide caching: the first call reads
    /// storage, every later call returns the same in-memory instances
    /// without touching disk.
    pub fn load(transformer_path: &str, classifier_path: &str) -> Result<Arc<Artifacts>> {
        if let Some(cached) = PROCESS_ARTIFACTS.get() {
            return Ok(Arc::clone(cached));
        }
        let artifacts = Arc::new(Self::open(transformer_path, classifier_path)?);
        Ok(Arc::clone(PROCESS_ARTIFACTS.get_or_init(|| artifacts)))
    }

    /// Read both artifacts from disk, bypassing the process cache. Used for
    /// fixture injection in tests and by [`ArtifactStore::load`] itself.
    pub fn open(transformer_path: &str, classifier_path: &str) -> Result<Artifacts> {
        let transformer = ColumnTransformer::load(transformer_path)?;
        let classifier = LogisticClassifier::load(classifier_path)?;
        info!(
            transformer = transformer_path,
            classifier = classifier_path,
            n_features = classifier.n_features(),
            "artifacts loaded"
        );
        Ok(Artifacts {
            transformer: Arc::new(transformer),
            classifier: Arc::new(classifier),
        })
    }
}
