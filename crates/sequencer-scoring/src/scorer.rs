//! Four-factor pro-move scorer.
//!
//! ```text
//! final = C·wC + R·wR + E·wE + D·wD
//! ```
//!
//! Weights are normalized to sum to 1. Output is sorted by final score
//! descending; scores within 1e-4 of each other order by ascending move id.

use chrono::NaiveDate;

use sequencer_core::config::{FeatureWeights, SequencerConfig};
use sequencer_core::constants::SCORE_TIE_EPSILON;
use sequencer_core::models::{Driver, FeatureVector, HistorySnapshot, ProMove, RankedCandidate};

use crate::classifier;
use crate::estimator::{self, EstimatorParams};
use crate::factors;

/// Scores eligible moves against a history snapshot at a reference week.
#[derive(Debug, Clone)]
pub struct FeatureScorer {
    weights: FeatureWeights,
    horizon_weeks: u32,
    eval_cap: f64,
    domain_window_weeks: u32,
    lookback_weeks: u32,
    estimator: EstimatorParams,
}

impl FeatureScorer {
    pub fn from_config(config: &SequencerConfig) -> Self {
        Self {
            weights: config.weights.normalized(),
            horizon_weeks: config.effective_horizon_weeks(),
            eval_cap: config.eval_cap,
            domain_window_weeks: config.domain_window_weeks,
            lookback_weeks: config.lookback_weeks,
            estimator: EstimatorParams::from_config(config),
        }
    }

    /// Normalized weights in use.
    pub fn weights(&self) -> FeatureWeights {
        self.weights
    }

    /// Score and classify a single move.
    pub fn score_one(
        &self,
        pro_move: &ProMove,
        snapshot: &HistorySnapshot,
        reference: NaiveDate,
    ) -> RankedCandidate {
        let history = snapshot.confidence_window(pro_move.id, reference, self.lookback_weeks);
        let estimate = estimator::estimate(&history, &self.estimator);

        let weeks_since = snapshot.weeks_since_selected(pro_move.id, reference);
        let appearances =
            snapshot.domain_appearances(pro_move.domain_id, reference, self.domain_window_weeks);

        let features = FeatureVector {
            confidence: factors::confidence::calculate(estimate.smoothed),
            recency: factors::recency::calculate(weeks_since, self.horizon_weeks),
            eval: factors::eval::calculate(
                snapshot.eval_score(pro_move.competency_id),
                self.eval_cap,
            ),
            domain: factors::domain::calculate(appearances, self.domain_window_weeks),
        };

        let final_score = features.confidence * self.weights.confidence
            + features.recency * self.weights.recency
            + features.eval * self.weights.eval
            + features.domain * self.weights.domain;

        let recent = classifier::recent_completed_weeks(&history, reference);
        let classification = classifier::classify(estimate.smoothed, &recent);

        RankedCandidate {
            pro_move_id: pro_move.id,
            statement: pro_move.statement.clone(),
            domain_id: pro_move.domain_id,
            domain_name: pro_move.domain_name.clone(),
            features,
            final_score,
            drivers: top_drivers(&features, &self.weights),
            weeks_since_seen: weeks_since,
            smoothed_confidence: estimate.smoothed,
            status: classification.status,
            severity: classification.severity,
        }
    }

    /// Score every move and return them in rank order.
    pub fn rank(
        &self,
        moves: &[ProMove],
        snapshot: &HistorySnapshot,
        reference: NaiveDate,
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = moves
            .iter()
            .map(|m| self.score_one(m, snapshot, reference))
            .collect();
        sort_ranking(&mut ranked);

        tracing::debug!(
            candidates = ranked.len(),
            reference = %reference,
            top = ranked.first().map(|c| c.pro_move_id),
            "ranked pro-moves"
        );

        ranked
    }
}

/// Deterministic rank order: score descending, with any run of scores within
/// the tie epsilon of its highest member ordered by ascending id.
pub fn sort_ranking(ranked: &mut [RankedCandidate]) {
    ranked.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then_with(|| a.pro_move_id.cmp(&b.pro_move_id))
    });

    let mut start = 0;
    while start < ranked.len() {
        let head = ranked[start].final_score;
        let end = ranked[start..]
            .iter()
            .position(|c| head - c.final_score > SCORE_TIE_EPSILON)
            .map_or(ranked.len(), |offset| start + offset);
        ranked[start..end].sort_by_key(|c| c.pro_move_id);
        start = end;
    }
}

/// The two features with the largest weighted contribution.
pub fn top_drivers(features: &FeatureVector, weights: &FeatureWeights) -> Vec<Driver> {
    let mut contributions: Vec<(Driver, f64)> = Driver::ALL
        .iter()
        .map(|d| {
            let value = match d {
                Driver::Confidence => features.confidence * weights.confidence,
                Driver::Recency => features.recency * weights.recency,
                Driver::EvalUrgency => features.eval * weights.eval,
                Driver::DomainCoverage => features.domain * weights.domain,
            };
            (*d, value)
        })
        .collect();
    // Stable sort keeps the fixed driver order on equal contributions.
    contributions.sort_by(|a, b| b.1.total_cmp(&a.1));
    contributions.into_iter().take(2).map(|(d, _)| d).collect()
}
