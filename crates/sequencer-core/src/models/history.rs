use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{weeks_between, window_start};
use crate::constants::NEVER_SELECTED_WEEKS;

use super::ProMove;

/// Scale a raw self-rating was captured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    /// Already in [0, 1].
    Unit,
    /// 0–10 slider.
    TenPoint,
}

impl RatingScale {
    /// Normalize a raw rating into [0, 1].
    pub fn normalize(self, raw: f64) -> f64 {
        let value = match self {
            Self::Unit => raw,
            Self::TenPoint => raw / 10.0,
        };
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// One staff member's self-rating for one move in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRecord {
    pub pro_move_id: i64,
    pub week_start: NaiveDate,
    pub staff_id: String,
    /// Normalized score in [0, 1].
    pub score: f64,
}

impl ConfidenceRecord {
    pub fn new(
        pro_move_id: i64,
        week_start: NaiveDate,
        staff_id: impl Into<String>,
        raw: f64,
        scale: RatingScale,
    ) -> Self {
        Self {
            pro_move_id,
            week_start,
            staff_id: staff_id.into(),
            score: scale.normalize(raw),
        }
    }
}

/// Per-week aggregate of confidence records for one move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekAggregate {
    pub week_start: NaiveDate,
    pub avg: f64,
    pub n: u32,
}

impl WeekAggregate {
    pub fn new(week_start: NaiveDate, avg: f64, n: u32) -> Self {
        Self { week_start, avg, n }
    }
}

/// Latest evaluation-derived urgency for a competency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalScore {
    pub competency_id: i64,
    pub score: f64,
}

/// Everything the scorer needs about one role's past, read in one pass.
///
/// Maps are ordered so iteration (and anything serialized from it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySnapshot {
    /// Per-move weekly confidence aggregates, oldest first.
    pub confidence: BTreeMap<i64, Vec<WeekAggregate>>,
    /// Eval urgency keyed by competency id.
    pub eval_scores: BTreeMap<i64, f64>,
    /// Week start of each move's most recent locked selection.
    pub last_selected: BTreeMap<i64, NaiveDate>,
    /// Locked weeks in which each domain appeared.
    pub domain_weeks: BTreeMap<i64, BTreeSet<NaiveDate>>,
}

impl HistorySnapshot {
    /// Apply a week's picks as if they had already been locked.
    ///
    /// Used to compute next week's proposal against history that includes
    /// the week being locked in the same invocation.
    pub fn record_selection<'a, I>(&mut self, week_start: NaiveDate, moves: I)
    where
        I: IntoIterator<Item = &'a ProMove>,
    {
        for pro_move in moves {
            let entry = self
                .last_selected
                .entry(pro_move.id)
                .or_insert(week_start);
            if *entry < week_start {
                *entry = week_start;
            }
            self.domain_weeks
                .entry(pro_move.domain_id)
                .or_default()
                .insert(week_start);
        }
    }

    /// Weeks since the move was last selected, relative to `reference`.
    pub fn weeks_since_selected(&self, pro_move_id: i64, reference: NaiveDate) -> u32 {
        match self.last_selected.get(&pro_move_id) {
            Some(last) => weeks_between(*last, reference),
            None => NEVER_SELECTED_WEEKS,
        }
    }

    /// Distinct weeks in `[reference - window, reference)` in which the domain
    /// was selected.
    pub fn domain_appearances(&self, domain_id: i64, reference: NaiveDate, window: u32) -> usize {
        let from = window_start(reference, window);
        self.domain_weeks
            .get(&domain_id)
            .map(|weeks| weeks.range(from..reference).count())
            .unwrap_or(0)
    }

    /// Confidence aggregates for a move inside `[reference - lookback, reference)`.
    pub fn confidence_window(
        &self,
        pro_move_id: i64,
        reference: NaiveDate,
        lookback: u32,
    ) -> Vec<WeekAggregate> {
        let from = window_start(reference, lookback);
        self.confidence
            .get(&pro_move_id)
            .map(|weeks| {
                weeks
                    .iter()
                    .filter(|w| w.week_start >= from && w.week_start < reference)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop confidence aggregates for `cutoff` and every later week.
    ///
    /// Ratings for a week still in progress must not feed the estimator or
    /// the alert rules.
    pub fn truncate_confidence(&mut self, cutoff: NaiveDate) {
        for weeks in self.confidence.values_mut() {
            weeks.retain(|w| w.week_start < cutoff);
        }
        self.confidence.retain(|_, weeks| !weeks.is_empty());
    }

    pub fn eval_score(&self, competency_id: i64) -> f64 {
        self.eval_scores.get(&competency_id).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pro_move(id: i64, domain_id: i64) -> ProMove {
        ProMove {
            id,
            statement: format!("move {id}"),
            competency_id: id,
            domain_id,
            domain_name: format!("domain {domain_id}"),
            role_id: 1,
            active: true,
        }
    }

    #[test]
    fn ten_point_ratings_normalize() {
        assert_eq!(RatingScale::TenPoint.normalize(7.0), 0.7);
        assert_eq!(RatingScale::TenPoint.normalize(12.0), 1.0);
        assert_eq!(RatingScale::Unit.normalize(-0.5), 0.0);
    }

    #[test]
    fn record_selection_keeps_latest_week() {
        let mut snapshot = HistorySnapshot::default();
        let m = pro_move(5, 2);
        snapshot.record_selection(date(2025, 3, 10), [&m]);
        snapshot.record_selection(date(2025, 2, 24), [&m]);
        assert_eq!(snapshot.last_selected[&5], date(2025, 3, 10));
        assert_eq!(snapshot.domain_weeks[&2].len(), 2);
    }

    #[test]
    fn domain_window_excludes_reference_week() {
        let mut snapshot = HistorySnapshot::default();
        let m = pro_move(1, 9);
        snapshot.record_selection(date(2025, 3, 17), [&m]);
        snapshot.record_selection(date(2025, 3, 10), [&m]);
        snapshot.record_selection(date(2025, 1, 13), [&m]);
        assert_eq!(snapshot.domain_appearances(9, date(2025, 3, 17), 8), 1);
    }

    #[test]
    fn truncate_confidence_drops_cutoff_week_and_later() {
        let mut snapshot = HistorySnapshot::default();
        snapshot.confidence.insert(
            1,
            vec![
                WeekAggregate::new(date(2025, 3, 10), 0.8, 4),
                WeekAggregate::new(date(2025, 3, 17), 0.0, 12),
            ],
        );
        snapshot.confidence.insert(2, vec![WeekAggregate::new(date(2025, 3, 17), 0.1, 3)]);

        snapshot.truncate_confidence(date(2025, 3, 17));

        assert_eq!(snapshot.confidence[&1].len(), 1);
        assert_eq!(snapshot.confidence[&1][0].week_start, date(2025, 3, 10));
        assert!(!snapshot.confidence.contains_key(&2));
    }

    #[test]
    fn never_selected_reports_sentinel() {
        let snapshot = HistorySnapshot::default();
        assert_eq!(
            snapshot.weeks_since_selected(42, date(2025, 3, 17)),
            NEVER_SELECTED_WEEKS
        );
    }
}
