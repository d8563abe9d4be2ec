use proptest::prelude::*;
use sequencer_core::config::SequencerConfig;
use sequencer_core::models::{HistorySnapshot, ProMove, WeekAggregate};
use sequencer_scoring::estimator::{estimate, EstimatorParams};
use sequencer_scoring::{ranking_digest, FeatureScorer};
use test_fixtures::{date, pro_move};

fn arb_week() -> impl Strategy<Value = (u32, f64, u32)> {
    (1u32..18, 0.0f64..=1.0, 0u32..40)
}

fn build_snapshot(moves: &[ProMove], weeks: &[(u32, f64, u32)]) -> HistorySnapshot {
    let reference = date(2025, 6, 2);
    let mut snapshot = HistorySnapshot::default();
    for (i, (back, avg, n)) in weeks.iter().enumerate() {
        let m = &moves[i % moves.len()];
        let week_start = reference - chrono::Duration::days(7 * i64::from(*back));
        snapshot
            .confidence
            .entry(m.id)
            .or_default()
            .push(WeekAggregate::new(week_start, *avg, *n));
    }
    for list in snapshot.confidence.values_mut() {
        list.sort_by_key(|w| w.week_start);
    }
    snapshot
}

proptest! {
    #[test]
    fn smoothed_stays_between_prior_and_sample(
        weeks in prop::collection::vec(arb_week(), 0..18),
        prior in 0.0f64..=1.0,
    ) {
        let reference = date(2025, 6, 2);
        let history: Vec<WeekAggregate> = weeks
            .iter()
            .map(|(back, avg, n)| {
                WeekAggregate::new(reference - chrono::Duration::days(7 * i64::from(*back)), *avg, *n)
            })
            .collect();
        let params = EstimatorParams { prior, k: 20.0, trim_pct: 0.05 };
        let est = estimate(&history, &params);
        prop_assert!((0.0..=1.0).contains(&est.smoothed));
        match est.sample_mean {
            None => prop_assert_eq!(est.smoothed, prior),
            Some(mean) => {
                let lo = prior.min(mean) - 1e-12;
                let hi = prior.max(mean) + 1e-12;
                prop_assert!(est.smoothed >= lo && est.smoothed <= hi);
            }
        }
    }

    #[test]
    fn features_and_scores_bounded(
        weeks in prop::collection::vec(arb_week(), 0..40),
        move_count in 1usize..12,
    ) {
        let moves: Vec<ProMove> = (0..move_count as i64).map(|i| pro_move(i + 1, i % 3)).collect();
        let snapshot = build_snapshot(&moves, &weeks);
        let scorer = FeatureScorer::from_config(&SequencerConfig::default());
        for c in scorer.rank(&moves, &snapshot, date(2025, 6, 2)) {
            for f in [c.features.confidence, c.features.recency, c.features.eval, c.features.domain] {
                prop_assert!((0.0..=1.0).contains(&f));
            }
            prop_assert!((0.0..=1.0 + 1e-9).contains(&c.final_score));
            prop_assert_eq!(c.drivers.len(), 2);
        }
    }

    #[test]
    fn ranking_is_deterministic_under_input_permutation(
        weeks in prop::collection::vec(arb_week(), 0..40),
        move_count in 1usize..12,
        rotate in 0usize..12,
    ) {
        let moves: Vec<ProMove> = (0..move_count as i64).map(|i| pro_move(i + 1, i % 3)).collect();
        let snapshot = build_snapshot(&moves, &weeks);
        let scorer = FeatureScorer::from_config(&SequencerConfig::default());
        let reference = date(2025, 6, 2);

        let mut rotated = moves.clone();
        rotated.rotate_left(rotate % move_count);

        let a = scorer.rank(&moves, &snapshot, reference);
        let b = scorer.rank(&rotated, &snapshot, reference);
        prop_assert_eq!(ranking_digest(&a).unwrap(), ranking_digest(&b).unwrap());
    }
}
