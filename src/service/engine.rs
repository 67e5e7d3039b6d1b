//! Prediction service implementation

use crate::artifacts::{ArtifactStore, Classifier, FeatureTransformer};
use crate::config::PredictorConfig;
use crate::dataset::{BookingRecord, BookingTable};
use crate::error::{Result, StayriskError};
use std::sync::Arc;
use tracing::{debug, warn};

use super::result::{BookingSummary, MatchOutcome, ScoredBooking, SearchResult};
use super::risk::RiskTier;

/// Scores booking records matched by a customer-name query.
///
/// Dependencies are injected and shared immutably; `search` is a pure
/// function of the table, the artifacts, and the query.
pub struct PredictionService {
    transformer: Arc<dyn FeatureTransformer>,
    classifier: Arc<dyn Classifier>,
    table: Option<Arc<BookingTable>>,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("rows", &self.table.as_ref().map(|t| t.len()))
            .field("degraded", &self.is_degraded())
            .finish()
    }
}

impl PredictionService {
    /// Create a service with no dataset; it serves every query as
    /// unavailable until a table is attached.
    pub fn new(transformer: Arc<dyn FeatureTransformer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            transformer,
            classifier,
            table: None,
        }
    }

    /// Builder method to attach the booking table
    pub fn with_table(mut self, table: Arc<BookingTable>) -> Self {
        self.table = Some(table);
        self
    }

    /// Assemble a service from configured paths: cached artifacts plus the
    /// optional dataset. A dataset failure degrades the service; an
    /// artifact failure is fatal and propagates.
    pub fn from_config(config: &PredictorConfig) -> Result<Self> {
        let artifacts = ArtifactStore::load(&config.transformer_path, &config.classifier_path)?;
        let mut service = Self::new(artifacts.transformer.clone(), artifacts.classifier.clone());

        if let Some(path) = &config.dataset_path {
            if let Some(table) = BookingTable::load_or_degraded(path) {
                service = service.with_table(Arc::new(table));
            }
        }

        Ok(service)
    }

    /// True when no dataset is available and every search answers
    /// `ServiceUnavailable`
    pub fn is_degraded(&self) -> bool {
        self.table.as_ref().map_or(true, |t| t.is_empty())
    }

    /// Search bookings by customer name.
    ///
    /// A record matches when its customer name contains the trimmed query
    /// as a case-insensitive substring. Matches are scored independently in
    /// dataset row order; one record's failure never aborts its siblings.
    pub fn search(&self, query: &str) -> SearchResult {
        let query = match validate_query(query) {
            Ok(q) => q,
            Err(e) => {
                debug!(error = %e, "rejected search query");
                return SearchResult::InvalidQuery;
            }
        };

        let table = match &self.table {
            Some(table) if !table.is_empty() => table,
            _ => return SearchResult::ServiceUnavailable,
        };

        let needle = query.to_lowercase();
        let mut outcomes = Vec::new();
        for record in table.records() {
            if !record.customer_name.to_lowercase().contains(&needle) {
                continue;
            }
            match self.score(record) {
                Ok(scored) => outcomes.push(MatchOutcome::Scored(scored)),
                Err(e) => {
                    warn!(
                        customer = %record.customer_name,
                        error = %e,
                        "prediction failed for matched booking"
                    );
                    outcomes.push(MatchOutcome::Failed {
                        booking: BookingSummary::from(record),
                        error: e.to_string(),
                    });
                }
            }
        }

        if outcomes.is_empty() {
            SearchResult::NoMatch
        } else {
            SearchResult::Matches(outcomes)
        }
    }

    fn score(&self, record: &BookingRecord) -> Result<ScoredBooking> {
        let features = record.feature_vector();
        let encoded = self.transformer.transform(&features)?;
        let probability = self.classifier.predict_probability(&encoded)?;

        Ok(ScoredBooking {
            booking: BookingSummary::from(record),
            probability,
            risk: RiskTier::from_probability(probability),
        })
    }
}

fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(StayriskError::InvalidQuery(
            "nothing to search for".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::EncodedFeatures;
    use crate::dataset::{FeatureVector, FieldValue};
    use ndarray::Array1;

    /// Encodes just the average daily rate
    struct AdrTransformer;

    impl FeatureTransformer for AdrTransformer {
        fn transform(&self, features: &FeatureVector) -> crate::error::Result<EncodedFeatures> {
            let adr = features
                .get("adr")
                .and_then(FieldValue::as_number)
                .ok_or_else(|| StayriskError::TransformError("missing column `adr`".to_string()))?;
            Ok(EncodedFeatures::new(Array1::from_vec(vec![adr])))
        }
    }

    /// Fails for records whose customer name contains a marker substring
    struct SelectiveTransformer {
        fail_marker: String,
    }

    impl FeatureTransformer for SelectiveTransformer {
        fn transform(&self, features: &FeatureVector) -> crate::error::Result<EncodedFeatures> {
            let name = features
                .get("customer_name")
                .and_then(FieldValue::as_text)
                .unwrap_or_default();
            if name.contains(&self.fail_marker) {
                return Err(StayriskError::TransformError(
                    "unexpected column `lead_time`".to_string(),
                ));
            }
            AdrTransformer.transform(features)
        }
    }

    /// Always returns the same probability
    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn predict_probability(&self, _features: &EncodedFeatures) -> crate::error::Result<f64> {
            Ok(self.0)
        }
    }

    fn record(name: &str, adr: f64) -> BookingRecord {
        BookingRecord {
            hotel: "City Hotel".to_string(),
            arrival_date_year: 2017,
            arrival_date_month: "July".to_string(),
            adults: 2,
            children: 0,
            babies: 0,
            meal: "BB".to_string(),
            market_segment: "Online TA".to_string(),
            distribution_channel: "TA/TO".to_string(),
            reserved_room_type: "A".to_string(),
            assigned_room_type: "A".to_string(),
            adr,
            customer_name: name.to_string(),
            is_canceled: Some(false),
        }
    }

    fn table() -> Arc<BookingTable> {
        Arc::new(BookingTable::from_records(vec![
            record("John Smith", 120.0),
            record("Anna SMITHSON", 95.0),
            record("Bob Jones", 60.0),
        ]))
    }

    fn service(probability: f64) -> PredictionService {
        PredictionService::new(Arc::new(AdrTransformer), Arc::new(FixedClassifier(probability)))
            .with_table(table())
    }

    #[test]
    fn test_whitespace_query_is_invalid() {
        let service = service(0.5);
        assert_eq!(service.search(""), SearchResult::InvalidQuery);
        assert_eq!(service.search("   "), SearchResult::InvalidQuery);
    }

    #[test]
    fn test_invalid_query_beats_degraded_mode() {
        // Query validation happens before any dataset access.
        let service =
            PredictionService::new(Arc::new(AdrTransformer), Arc::new(FixedClassifier(0.5)));
        assert_eq!(service.search("  "), SearchResult::InvalidQuery);
    }

    #[test]
    fn test_no_table_is_unavailable() {
        let service =
            PredictionService::new(Arc::new(AdrTransformer), Arc::new(FixedClassifier(0.5)));
        assert!(service.is_degraded());
        assert_eq!(service.search("anything"), SearchResult::ServiceUnavailable);
    }

    #[test]
    fn test_empty_table_is_unavailable() {
        let service =
            PredictionService::new(Arc::new(AdrTransformer), Arc::new(FixedClassifier(0.5)))
                .with_table(Arc::new(BookingTable::from_records(Vec::new())));
        assert_eq!(service.search("smith"), SearchResult::ServiceUnavailable);
    }

    #[test]
    fn test_no_match() {
        let service = service(0.5);
        assert_eq!(service.search("zzz-no-such-name"), SearchResult::NoMatch);
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let service = service(0.45);

        let lower = service.search("smith");
        let upper = service.search("SMITH");

        assert_eq!(lower.matches().map(|m| m.len()), Some(2));
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_matches_preserve_row_order() {
        let service = service(0.45);
        let result = service.search("o");

        // "John Smith", "Anna SMITHSON", "Bob Jones" all contain an 'o'.
        let rates: Vec<f64> = result
            .matches()
            .unwrap()
            .iter()
            .filter_map(|m| m.as_scored())
            .map(|s| s.booking.adr)
            .collect();
        assert_eq!(rates, vec![120.0, 95.0, 60.0]);
    }

    #[test]
    fn test_scored_match_carries_probability_and_tier() {
        let service = service(0.45);
        let result = service.search("john smith");

        let outcomes = result.matches().unwrap();
        assert_eq!(outcomes.len(), 1);
        let scored = outcomes[0].as_scored().unwrap();
        assert_eq!(scored.booking.adr, 120.0);
        assert_eq!(scored.probability, 0.45);
        assert_eq!(scored.risk, RiskTier::Moderate);
    }

    #[test]
    fn test_search_is_idempotent() {
        let service = service(0.7);
        assert_eq!(service.search("smith"), service.search("smith"));
    }

    #[test]
    fn test_record_failure_does_not_abort_siblings() {
        let transformer = SelectiveTransformer {
            fail_marker: "SMITHSON".to_string(),
        };
        let service = PredictionService::new(Arc::new(transformer), Arc::new(FixedClassifier(0.2)))
            .with_table(table());

        let result = service.search("smith");
        let outcomes = result.matches().unwrap();
        assert_eq!(outcomes.len(), 2);

        let scored = outcomes[0].as_scored().unwrap();
        assert_eq!(scored.booking.adr, 120.0);
        assert_eq!(scored.risk, RiskTier::Low);

        assert!(outcomes[1].is_failed());
        match &outcomes[1] {
            MatchOutcome::Failed { booking, error } => {
                assert_eq!(booking.adr, 95.0);
                assert!(error.contains("Transform error"), "got: {error}");
            }
            MatchOutcome::Scored(_) => unreachable!(),
        }
    }
}
