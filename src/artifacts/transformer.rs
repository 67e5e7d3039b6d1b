//! Feature transformer artifact
//!
//! The transformer is fitted offline; this crate only deserializes it and
//! applies it. Its column selection and encoding layout are a contract
//! inherited from fit time: a record whose columns differ from the fitted
//! schema in any way fails hard rather than producing a silently wrong
//! encoding.

use crate::dataset::{FeatureVector, FieldValue};
use crate::error::{Result, StayriskError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Numeric representation produced by a feature transformer. Opaque to the
/// prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatures(Array1<f64>);

impl EncodedFeatures {
    pub fn new(values: Array1<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Capability interface for the transformer artifact, so tests can
/// substitute deterministic doubles for the fitted model.
pub trait FeatureTransformer: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<EncodedFeatures>;
}

/// Standard-scaling parameters for one numeric column, captured at fit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NumericScaler {
    column: String,
    mean: f64,
    std: f64,
}

/// One-hot category list for one categorical column, captured at fit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OneHotColumn {
    column: String,
    categories: Vec<String>,
}

/// The fitted column transformer: scales numeric columns, one-hot encodes
/// categorical columns, drops everything else (such as the customer name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    /// Full input schema at fit time, in column order
    schema: Vec<String>,
    numeric: Vec<NumericScaler>,
    categorical: Vec<OneHotColumn>,
}

impl ColumnTransformer {
    /// Create a transformer over the given input schema with no encodings
    pub fn new(schema: Vec<String>) -> Self {
        Self {
            schema,
            numeric: Vec::new(),
            categorical: Vec::new(),
        }
    }

    /// Builder method to add standard scaling for a numeric column
    pub fn with_numeric(mut self, column: impl Into<String>, mean: f64, std: f64) -> Self {
        self.numeric.push(NumericScaler {
            column: column.into(),
            mean,
            std,
        });
        self
    }

    /// Builder method to add one-hot encoding for a categorical column
    pub fn with_categories(mut self, column: impl Into<String>, categories: &[&str]) -> Self {
        self.categorical.push(OneHotColumn {
            column: column.into(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// Input schema at fit time
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Width of the encoded output
    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Save the transformer to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a transformer from a file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            StayriskError::ArtifactError(format!("cannot read transformer at {path}: {e}"))
        })?;
        let transformer: Self = serde_json::from_str(&json).map_err(|e| {
            StayriskError::ArtifactError(format!("corrupt transformer at {path}: {e}"))
        })?;
        transformer.validate()?;
        Ok(transformer)
    }

    fn validate(&self) -> Result<()> {
        if self.schema.is_empty() {
            return Err(StayriskError::ArtifactError(
                "transformer has an empty schema".to_string(),
            ));
        }
        for column in self
            .numeric
            .iter()
            .map(|n| &n.column)
            .chain(self.categorical.iter().map(|c| &c.column))
        {
            if !self.schema.contains(column) {
                return Err(StayriskError::ArtifactError(format!(
                    "transformer encodes column `{column}` absent from its schema"
                )));
            }
        }
        Ok(())
    }

    /// The incoming columns must match the fitted schema exactly, including
    /// order. Anything else is a hard per-record failure.
    fn check_schema(&self, features: &FeatureVector) -> Result<()> {
        let incoming: Vec<&str> = features.columns().collect();
        let expected: Vec<&str> = self.schema.iter().map(|s| s.as_str()).collect();

        if incoming == expected {
            return Ok(());
        }
        for column in &expected {
            if !incoming.contains(column) {
                return Err(StayriskError::TransformError(format!(
                    "missing column `{column}`"
                )));
            }
        }
        for column in &incoming {
            if !expected.contains(column) {
                return Err(StayriskError::TransformError(format!(
                    "unexpected column `{column}`"
                )));
            }
        }
        Err(StayriskError::TransformError(format!(
            "column order differs from fitted schema: expected [{}], got [{}]",
            expected.join(", "),
            incoming.join(", ")
        )))
    }
}

impl FeatureTransformer for ColumnTransformer {
    fn transform(&self, features: &FeatureVector) -> Result<EncodedFeatures> {
        self.check_schema(features)?;

        let mut values = Vec::with_capacity(self.output_width());
        for column in &self.schema {
            let field = features.get(column).ok_or_else(|| {
                StayriskError::TransformError(format!("missing column `{column}`"))
            })?;

            if let Some(scaler) = self.numeric.iter().find(|n| &n.column == column) {
                let value = field.as_number().ok_or_else(|| {
                    StayriskError::TransformError(format!(
                        "column `{column}` expected a numeric value"
                    ))
                })?;
                let denom = if scaler.std > 0.0 { scaler.std } else { 1.0 };
                values.push((value - scaler.mean) / denom);
            } else if let Some(onehot) = self.categorical.iter().find(|c| &c.column == column) {
                let value = field.as_text().ok_or_else(|| {
                    StayriskError::TransformError(format!(
                        "column `{column}` expected a categorical value"
                    ))
                })?;
                // Unknown categories encode as all-zero dummies.
                for category in &onehot.categories {
                    values.push(if category == value { 1.0 } else { 0.0 });
                }
            }
            // Columns with no encoding (e.g. the customer name) are dropped.
        }

        Ok(EncodedFeatures::new(Array1::from_vec(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_transformer() -> ColumnTransformer {
        ColumnTransformer::new(vec![
            "hotel".to_string(),
            "adr".to_string(),
            "customer_name".to_string(),
        ])
        .with_categories("hotel", &["City Hotel", "Resort Hotel"])
        .with_numeric("adr", 100.0, 50.0)
    }

    fn features(hotel: &str, adr: f64) -> FeatureVector {
        FeatureVector::new(vec![
            ("hotel".to_string(), FieldValue::Text(hotel.to_string())),
            ("adr".to_string(), FieldValue::Number(adr)),
            ("customer_name".to_string(), FieldValue::Text("John Smith".to_string())),
        ])
    }

    #[test]
    fn test_encoding_layout() {
        let ct = fitted_transformer();
        assert_eq!(ct.output_width(), 3);

        let encoded = ct.transform(&features("Resort Hotel", 150.0)).unwrap();
        assert_eq!(encoded.values().to_vec(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_encodes_as_zeros() {
        let ct = fitted_transformer();
        let encoded = ct.transform(&features("Hostel", 100.0)).unwrap();
        assert_eq!(encoded.values().to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unencoded_column_is_dropped() {
        let ct = fitted_transformer();
        let encoded = ct.transform(&features("City Hotel", 100.0)).unwrap();
        // Two hotel dummies plus adr; the customer name contributes nothing.
        assert_eq!(encoded.len(), 3);
    }

    #[test]
    fn test_missing_column_fails() {
        let ct = fitted_transformer();
        let fv = FeatureVector::new(vec![(
            "hotel".to_string(),
            FieldValue::Text("City Hotel".to_string()),
        )]);

        let err = ct.transform(&fv).unwrap_err();
        assert!(err.to_string().contains("missing column `adr`"), "got: {err}");
    }

    #[test]
    fn test_extra_column_fails() {
        let ct = fitted_transformer();
        let fv = FeatureVector::new(vec![
            ("hotel".to_string(), FieldValue::Text("City Hotel".to_string())),
            ("adr".to_string(), FieldValue::Number(80.0)),
            ("customer_name".to_string(), FieldValue::Text("X".to_string())),
            ("lead_time".to_string(), FieldValue::Number(30.0)),
        ]);

        let err = ct.transform(&fv).unwrap_err();
        assert!(err.to_string().contains("unexpected column `lead_time`"), "got: {err}");
    }

    #[test]
    fn test_reordered_columns_fail() {
        let ct = fitted_transformer();
        let fv = FeatureVector::new(vec![
            ("adr".to_string(), FieldValue::Number(80.0)),
            ("hotel".to_string(), FieldValue::Text("City Hotel".to_string())),
            ("customer_name".to_string(), FieldValue::Text("X".to_string())),
        ]);

        let err = ct.transform(&fv).unwrap_err();
        assert!(err.to_string().contains("column order"), "got: {err}");
    }

    #[test]
    fn test_wrong_type_fails() {
        let ct = fitted_transformer();
        let fv = FeatureVector::new(vec![
            ("hotel".to_string(), FieldValue::Number(1.0)),
            ("adr".to_string(), FieldValue::Number(80.0)),
            ("customer_name".to_string(), FieldValue::Text("X".to_string())),
        ]);

        let err = ct.transform(&fv).unwrap_err();
        assert!(matches!(err, StayriskError::TransformError(_)));
    }

    #[test]
    fn test_zero_std_does_not_divide_by_zero() {
        let ct = ColumnTransformer::new(vec!["adr".to_string()]).with_numeric("adr", 10.0, 0.0);
        let fv = FeatureVector::new(vec![("adr".to_string(), FieldValue::Number(12.0))]);

        let encoded = ct.transform(&fv).unwrap();
        assert_eq!(encoded.values().to_vec(), vec![2.0]);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let ct = fitted_transformer();
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let path = file.path().to_str().unwrap();

        ct.save(path).unwrap();
        let loaded = ColumnTransformer::load(path).unwrap();
        assert_eq!(loaded, ct);
    }

    #[test]
    fn test_load_missing_file_is_artifact_error() {
        let err = ColumnTransformer::load("/no/such/transformer.json").unwrap_err();
        assert!(matches!(err, StayriskError::ArtifactError(_)));
    }

    #[test]
    fn test_load_corrupt_file_is_artifact_error() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), "not json at all").unwrap();

        let err = ColumnTransformer::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, StayriskError::ArtifactError(_)));
    }
}
