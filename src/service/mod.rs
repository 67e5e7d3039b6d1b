//! Prediction service: name search, per-record scoring, risk tiers

mod engine;
mod result;
mod risk;

pub use engine::PredictionService;
pub use result::{BookingSummary, MatchOutcome, ScoredBooking, SearchResult};
pub use risk::{RiskTier, HIGH_THRESHOLD, MODERATE_THRESHOLD};
