//! Search result types returned to the presentation layer

use crate::dataset::BookingRecord;
use serde::{Deserialize, Serialize};

use super::risk::RiskTier;

/// The booking attributes echoed back with each scored match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub hotel: String,
    pub arrival_date_year: i32,
    pub arrival_date_month: String,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub meal: String,
    pub market_segment: String,
    pub distribution_channel: String,
    pub reserved_room_type: String,
    pub assigned_room_type: String,
    pub adr: f64,
}

impl From<&BookingRecord> for BookingSummary {
    fn from(record: &BookingRecord) -> Self {
        Self {
            hotel: record.hotel.clone(),
            arrival_date_year: record.arrival_date_year,
            arrival_date_month: record.arrival_date_month.clone(),
            adults: record.adults,
            children: record.children,
            babies: record.babies,
            meal: record.meal.clone(),
            market_segment: record.market_segment.clone(),
            distribution_channel: record.distribution_channel.clone(),
            reserved_room_type: record.reserved_room_type.clone(),
            assigned_room_type: record.assigned_room_type.clone(),
            adr: record.adr,
        }
    }
}

/// One successfully scored booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBooking {
    pub booking: BookingSummary,
    /// Cancellation probability in [0, 1]
    pub probability: f64,
    pub risk: RiskTier,
}

impl ScoredBooking {
    /// Complementary probability that the booking is kept
    pub fn retention_probability(&self) -> f64 {
        1.0 - self.probability
    }
}

/// Outcome for one matched record. A scoring failure stays scoped to its
/// record; sibling matches in the same search still produce predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Scored(ScoredBooking),
    Failed { booking: BookingSummary, error: String },
}

impl MatchOutcome {
    pub fn as_scored(&self) -> Option<&ScoredBooking> {
        match self {
            MatchOutcome::Scored(scored) => Some(scored),
            MatchOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MatchOutcome::Failed { .. })
    }
}

/// Result of a name search, returned as a typed value rather than thrown
/// across the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchResult {
    /// The query was empty or whitespace-only; the dataset was not touched
    InvalidQuery,
    /// No dataset is loaded; the service is degraded
    ServiceUnavailable,
    /// The dataset holds no record matching the query
    NoMatch,
    /// Per-record outcomes in dataset row order
    Matches(Vec<MatchOutcome>),
}

impl SearchResult {
    /// The matched outcomes, if any
    pub fn matches(&self) -> Option<&[MatchOutcome]> {
        match self {
            SearchResult::Matches(outcomes) => Some(outcomes),
            _ => None,
        }
    }
}
