//! Risk tier classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability cutoff between LOW and MODERATE
pub const MODERATE_THRESHOLD: f64 = 0.3;

/// Probability cutoff between MODERATE and HIGH
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Cancellation risk tier derived from a probability by fixed thresholds.
/// Boundary values fall into the lower tier: exactly 0.3 is LOW, exactly
/// 0.6 is MODERATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Classify a cancellation probability
    pub fn from_probability(p: f64) -> Self {
        if p > HIGH_THRESHOLD {
            RiskTier::High
        } else if p > MODERATE_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Moderate => write!(f, "MODERATE"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}
