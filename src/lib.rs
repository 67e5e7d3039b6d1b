//! Stayrisk - hotel booking cancellation risk scoring
//!
//! Given a customer name, this crate looks up matching rows in an
//! in-memory booking table, runs each one through a pre-fitted feature
//! transformer and a pre-trained classifier, and returns a structured
//! per-record result: the echoed booking attributes, a cancellation
//! probability, and a risk tier. A presentation layer renders the result;
//! this crate is a library call, not a process.
//!
//! # Modules
//!
//! - [`artifacts`] - Pre-trained transformer/classifier loading, cached per process
//! - [`dataset`] - Booking dataset loading and the immutable in-memory table
//! - [`service`] - Name search, per-record scoring, risk tiers
//! - [`config`] - Artifact and dataset paths
//! - [`error`] - Crate-wide error type

// Core error handling
pub mod error;

// Components, bottom-up
pub mod artifacts;
pub mod config;
pub mod dataset;
pub mod service;

pub use error::{Result, StayriskError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, StayriskError};

    // Artifacts
    pub use crate::artifacts::{
        ArtifactStore, Artifacts, Classifier, ColumnTransformer, EncodedFeatures,
        FeatureTransformer, LogisticClassifier,
    };

    // Dataset
    pub use crate::dataset::{
        BookingRecord, BookingTable, DatasetLoader, FeatureVector, FieldValue,
    };

    // Service
    pub use crate::service::{
        BookingSummary, MatchOutcome, PredictionService, RiskTier, ScoredBooking, SearchResult,
    };

    // Configuration
    pub use crate::config::PredictorConfig;
}
