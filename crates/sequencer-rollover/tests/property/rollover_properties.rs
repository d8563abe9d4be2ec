//! Property tests: idempotent reruns and the cooldown invariant across
//! arbitrary pools.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use sequencer_core::config::SequencerConfig;
use sequencer_core::models::RolloverTrigger;
use sequencer_rollover::RolloverEngine;
use sequencer_storage::StorageEngine;
use test_fixtures::pro_move;

fn engine_for(domains: &[i64]) -> RolloverEngine<StorageEngine> {
    let store = StorageEngine::open_in_memory().unwrap();
    for (idx, domain) in domains.iter().enumerate() {
        store.upsert_pro_move(&pro_move(idx as i64 + 1, *domain)).unwrap();
    }
    RolloverEngine::new(store, SequencerConfig::default()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn rerun_never_changes_state(domains in prop::collection::vec(1i64..5, 0..10)) {
        let engine = engine_for(&domains);
        let trigger = RolloverTrigger::new(
            1,
            Utc.with_ymd_and_hms(2025, 3, 18, 15, 0, 0).unwrap(),
            "Europe/London",
        );

        engine.run(&trigger).unwrap();
        let before = engine.storage().all_assignments(1).unwrap();
        let again = engine.run(&trigger).unwrap();

        prop_assert!(again.success);
        prop_assert!(!again.promoted);
        prop_assert_eq!(engine.storage().all_assignments(1).unwrap(), before);
    }

    #[test]
    fn consecutive_weeks_respect_cooldown(domains in prop::collection::vec(1i64..5, 6..12)) {
        let engine = engine_for(&domains);
        let start = Utc.with_ymd_and_hms(2025, 1, 7, 12, 0, 0).unwrap();

        let mut history: Vec<Vec<i64>> = Vec::new();
        for week in 0..4 {
            let trigger = RolloverTrigger::new(1, start + Duration::weeks(week), "UTC");
            let summary = engine.run(&trigger).unwrap();
            history.push(summary.locked);
        }

        // cooldown_weeks = 2: no move is locked in two consecutive weeks.
        for pair in history.windows(2) {
            prop_assert!(pair[1].iter().all(|id| !pair[0].contains(id)));
        }
    }
}
