use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The four raw ranking features, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeatureVector {
    /// Confidence need: `1 - smoothed confidence`.
    #[serde(rename = "C")]
    pub confidence: f64,
    /// Recency.
    #[serde(rename = "R")]
    pub recency: f64,
    /// Capped eval urgency.
    #[serde(rename = "E")]
    pub eval: f64,
    /// Domain coverage gap.
    #[serde(rename = "D")]
    pub domain: f64,
}

/// A feature named as a ranking driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Driver {
    Confidence,
    Recency,
    EvalUrgency,
    DomainCoverage,
}

impl Driver {
    /// Fixed order used to break contribution ties.
    pub const ALL: [Driver; 4] = [
        Driver::Confidence,
        Driver::Recency,
        Driver::EvalUrgency,
        Driver::DomainCoverage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Confidence => "Low confidence",
            Self::Recency => "Not practiced recently",
            Self::EvalUrgency => "Evaluation priority",
            Self::DomainCoverage => "Domain variety",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory low-confidence alert level. Never influences selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlertStatus {
    Critical,
    Watch,
    Ok,
}

/// One scored, classified candidate in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RankedCandidate {
    pub pro_move_id: i64,
    pub statement: String,
    pub domain_id: i64,
    pub domain_name: String,
    pub features: FeatureVector,
    pub final_score: f64,
    /// The two highest weighted contributions, largest first.
    pub drivers: Vec<Driver>,
    pub weeks_since_seen: u32,
    /// Smoothed confidence the `confidence` feature was derived from.
    pub smoothed_confidence: f64,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub severity: Option<f64>,
}
