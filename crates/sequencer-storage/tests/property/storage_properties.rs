//! Property tests: stored aggregates match the ratings written.

use proptest::prelude::*;
use sequencer_core::models::{ConfidenceRecord, RatingScale};
use sequencer_core::traits::ISequencerStorage;
use sequencer_storage::StorageEngine;
use test_fixtures::{date, pro_move};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn weekly_average_matches_inputs(scores in prop::collection::vec(0.0f64..=1.0, 1..20)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        engine.upsert_pro_move(&pro_move(1, 1)).unwrap();
        let week = date(2025, 3, 10);
        let records: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| ConfidenceRecord::new(1, week, format!("staff-{i}"), *s, RatingScale::Unit))
            .collect();
        prop_assert_eq!(engine.record_confidence_bulk(&records).unwrap(), scores.len());

        let snapshot = engine.load_history(1, date(2025, 1, 6), date(2025, 3, 17)).unwrap();
        let aggregate = snapshot.confidence[&1][0];
        let expected = scores.iter().sum::<f64>() / scores.len() as f64;
        prop_assert_eq!(aggregate.n as usize, scores.len());
        prop_assert!((aggregate.avg - expected).abs() < 1e-9);
    }
}
