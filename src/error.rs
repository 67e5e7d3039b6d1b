//! Error types for the stayrisk crate

use thiserror::Error;

/// Result type alias for stayrisk operations
pub type Result<T> = std::result::Result<T, StayriskError>;

/// Main error type for the stayrisk crate
#[derive(Error, Debug)]
pub enum StayriskError {
    /// A serialized model artifact is missing or corrupt. Fatal at startup;
    /// there is no degraded mode without a model.
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    /// The booking dataset could not be read or fails schema validation.
    /// Recoverable: the service answers `ServiceUnavailable` instead.
    #[error("Dataset error: {0}")]
    DatasetError(String),

    /// The caller submitted a query with nothing to search for.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A record's fields do not match the schema the transformer was fitted
    /// on. Scoped to that record; sibling records keep processing.
    #[error("Transform error: {0}")]
    TransformError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for StayriskError {
    fn from(err: polars::error::PolarsError) -> Self {
        StayriskError::DatasetError(err.to_string())
    }
}

impl From<serde_json::Error> for StayriskError {
    fn from(err: serde_json::Error) -> Self {
        StayriskError::SerializationError(err.to_string())
    }
}
