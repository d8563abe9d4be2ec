use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Weight vector for the four ranking features.
///
/// Stored as configured; [`FeatureWeights::normalized`] rescales it to sum to 1
/// before use so callers may supply any positive proportions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    pub confidence: f64,
    pub recency: f64,
    pub eval: f64,
    pub domain: f64,
}

impl FeatureWeights {
    pub fn new(confidence: f64, recency: f64, eval: f64, domain: f64) -> Self {
        Self {
            confidence,
            recency,
            eval,
            domain,
        }
    }

    pub fn sum(&self) -> f64 {
        self.confidence + self.recency + self.eval + self.domain
    }

    /// Rescale so the four weights sum to 1.
    ///
    /// A non-positive total falls back to the defaults.
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if !total.is_finite() || total <= 0.0 {
            return Self::default();
        }
        Self {
            confidence: self.confidence / total,
            recency: self.recency / total,
            eval: self.eval / total,
            domain: self.domain / total,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("weights.confidence", self.confidence),
            ("weights.recency", self.recency),
            ("weights.eval", self.eval),
            ("weights.domain", self.domain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        if self.sum() <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "weights".to_string(),
                reason: "at least one weight must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            confidence: defaults::DEFAULT_WEIGHT_CONFIDENCE,
            recency: defaults::DEFAULT_WEIGHT_RECENCY,
            eval: defaults::DEFAULT_WEIGHT_EVAL,
            domain: defaults::DEFAULT_WEIGHT_DOMAIN,
        }
    }
}
