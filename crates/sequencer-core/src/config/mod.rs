pub mod defaults;
mod storage_config;
mod weights;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use storage_config::StorageConfig;
pub use weights::FeatureWeights;

/// Top-level sequencer configuration.
///
/// Every field has a default, so an empty TOML document is a valid config.
/// A [`crate::models::RolloverTrigger`] may carry a full override for a single
/// invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    pub weights: FeatureWeights,
    /// Minimum elapsed weeks before a selected move is eligible again.
    pub cooldown_weeks: u32,
    /// Distinct domains the picks must span before diversity stops applying.
    pub diversity_min_domains: usize,
    /// Recency horizon in weeks. Zero means "use the default".
    pub recency_horizon_weeks: u32,
    /// Empirical-Bayes prior confidence.
    pub eb_prior: f64,
    /// Empirical-Bayes pseudo-count.
    pub eb_k: f64,
    /// Fraction of weekly averages trimmed from each end.
    pub trim_pct: f64,
    /// Upper bound applied to eval urgency.
    pub eval_cap: f64,
    /// Picks per role per week (k).
    pub pick_count: usize,
    /// Confidence history lookback in weeks.
    pub lookback_weeks: u32,
    /// Window for domain coverage in weeks.
    pub domain_window_weeks: u32,
    pub storage: StorageConfig,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            cooldown_weeks: defaults::DEFAULT_COOLDOWN_WEEKS,
            diversity_min_domains: defaults::DEFAULT_DIVERSITY_MIN_DOMAINS,
            recency_horizon_weeks: defaults::DEFAULT_RECENCY_HORIZON_WEEKS,
            eb_prior: defaults::DEFAULT_EB_PRIOR,
            eb_k: defaults::DEFAULT_EB_K,
            trim_pct: defaults::DEFAULT_TRIM_PCT,
            eval_cap: defaults::DEFAULT_EVAL_CAP,
            pick_count: defaults::DEFAULT_PICK_COUNT,
            lookback_weeks: defaults::DEFAULT_LOOKBACK_WEEKS,
            domain_window_weeks: defaults::DEFAULT_DOMAIN_WINDOW_WEEKS,
            storage: StorageConfig::default(),
        }
    }
}

impl SequencerConfig {
    /// Parse from a TOML string and validate.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Recency horizon with the zero-means-default rule applied.
    pub fn effective_horizon_weeks(&self) -> u32 {
        if self.recency_horizon_weeks == 0 {
            defaults::DEFAULT_RECENCY_HORIZON_WEEKS
        } else {
            self.recency_horizon_weeks
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;

        if self.pick_count == 0 || self.pick_count > crate::constants::MAX_PICK_COUNT {
            return Err(invalid(
                "pick_count",
                format!(
                    "must be between 1 and {}, got {}",
                    crate::constants::MAX_PICK_COUNT,
                    self.pick_count
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.eb_prior) {
            return Err(invalid("eb_prior", format!("must be in [0, 1], got {}", self.eb_prior)));
        }
        if !self.eb_k.is_finite() || self.eb_k < 0.0 {
            return Err(invalid("eb_k", format!("must be non-negative, got {}", self.eb_k)));
        }
        if !(0.0..0.5).contains(&self.trim_pct) {
            return Err(invalid("trim_pct", format!("must be in [0, 0.5), got {}", self.trim_pct)));
        }
        if !(0.0..=1.0).contains(&self.eval_cap) {
            return Err(invalid("eval_cap", format!("must be in [0, 1], got {}", self.eval_cap)));
        }
        if self.domain_window_weeks == 0 {
            return Err(invalid("domain_window_weeks", "must be at least 1".to_string()));
        }
        if self.lookback_weeks == 0 {
            return Err(invalid("lookback_weeks", "must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}
