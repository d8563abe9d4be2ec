//! Rollover state machine against an in-memory SQLite store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sequencer_core::config::SequencerConfig;
use sequencer_core::errors::{AssignmentError, SequencerError};
use sequencer_core::models::{
    AlertStatus, AssignmentStatus, ConfidenceRecord, EvalScore, GenerationSource, RatingScale,
    RolloverTrigger,
};
use sequencer_core::traits::ISequencerStorage;
use sequencer_rollover::RolloverEngine;
use sequencer_scoring::ranking_digest;
use sequencer_storage::StorageEngine;
use test_fixtures::{date, pro_move, pro_move_for_role};

const CHICAGO: &str = "America/Chicago";

/// Tuesday 2025-03-18 10:00 in Chicago; the local week starts 2025-03-17.
fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 18, 15, 0, 0).unwrap()
}

fn trigger() -> RolloverTrigger {
    RolloverTrigger::new(1, reference(), CHICAGO)
}

/// Six moves over three domains with some confidence and eval history.
fn seeded_store() -> StorageEngine {
    let store = StorageEngine::open_in_memory().unwrap();
    for (id, domain) in [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (6, 3)] {
        store.upsert_pro_move(&pro_move(id, domain)).unwrap();
    }
    for week in [date(2025, 2, 24), date(2025, 3, 3), date(2025, 3, 10)] {
        for staff in ["a", "b", "c", "d"] {
            store
                .record_confidence(&ConfidenceRecord::new(2, week, staff, 2.0, RatingScale::TenPoint))
                .unwrap();
            store
                .record_confidence(&ConfidenceRecord::new(3, week, staff, 9.0, RatingScale::TenPoint))
                .unwrap();
        }
    }
    store
        .set_eval_score(&EvalScore { competency_id: 5, score: 0.2 })
        .unwrap();
    store
}

fn engine() -> RolloverEngine<StorageEngine> {
    RolloverEngine::new(seeded_store(), SequencerConfig::default()).unwrap()
}

// ── Promotion ─────────────────────────────────────────────────────────────

#[test]
fn first_run_synthesizes_and_locks_current_week() {
    let engine = engine();
    let summary = engine.run(&trigger()).unwrap();

    assert!(summary.success);
    assert!(summary.promoted);
    assert_eq!(summary.week_locked, Some(date(2025, 3, 17)));
    assert_eq!(summary.week_proposed, Some(date(2025, 3, 24)));
    assert_eq!(summary.locked.len(), 3);
    assert_eq!(summary.proposed.len(), 3);
    // Just-locked moves are in cooldown for the next proposal.
    assert!(summary.proposed.iter().all(|id| !summary.locked.contains(id)));
    assert_eq!(summary.ranking.len(), 6);

    let current = engine.storage().load_week(1, date(2025, 3, 17)).unwrap().unwrap();
    assert!(current.is_locked());
    assert!(current.rows.iter().all(|r| r.locked_at == Some(reference())));
    let next = engine.storage().load_week(1, date(2025, 3, 24)).unwrap().unwrap();
    assert!(next.rows.iter().all(|r| r.status == AssignmentStatus::Proposed));
    assert_eq!(next.pro_move_ids(), summary.proposed);
}

#[test]
fn locked_picks_span_two_domains() {
    let engine = engine();
    let summary = engine.run(&trigger()).unwrap();
    let moves = engine.storage().get_pro_moves(&summary.locked).unwrap();
    let mut domains: Vec<i64> = moves.iter().map(|m| m.domain_id).collect();
    domains.sort();
    domains.dedup();
    assert!(domains.len() >= 2);
}

#[test]
fn following_week_promotes_previous_proposal() {
    let engine = engine();
    let first = engine.run(&trigger()).unwrap();

    let later = RolloverTrigger::new(1, reference() + Duration::days(7), CHICAGO);
    let second = engine.run(&later).unwrap();

    assert!(second.promoted);
    assert_eq!(second.week_locked, Some(date(2025, 3, 24)));
    assert_eq!(second.locked, first.proposed);
    let week = engine.storage().load_week(1, date(2025, 3, 24)).unwrap().unwrap();
    assert!(week.is_locked());
}

// ── Idempotency and force ─────────────────────────────────────────────────

#[test]
fn second_run_is_a_noop() {
    let engine = engine();
    engine.run(&trigger()).unwrap();
    let before = engine.storage().all_assignments(1).unwrap();

    let again = engine.run(&trigger()).unwrap();
    assert!(again.success);
    assert!(!again.promoted);
    assert!(again.ranking.is_empty());
    assert!(again.logs.iter().any(|l| l.contains("already locked")));
    assert_eq!(engine.storage().all_assignments(1).unwrap(), before);
}

#[test]
fn force_restamps_in_place() {
    let engine = engine();
    let first = engine.run(&trigger()).unwrap();

    let restamp_at = reference() + Duration::hours(2);
    let forced = engine
        .run(&RolloverTrigger::new(1, restamp_at, CHICAGO).with_force(true))
        .unwrap();

    assert!(forced.promoted);
    assert_eq!(forced.locked, first.locked);
    let week = engine.storage().load_week(1, date(2025, 3, 17)).unwrap().unwrap();
    assert_eq!(week.len(), 3);
    assert!(week.rows.iter().all(|r| r.locked_at == Some(restamp_at)));
    let next = engine.storage().load_week(1, date(2025, 3, 24)).unwrap().unwrap();
    assert_eq!(next.len(), 3);
    assert_eq!(engine.storage().all_assignments(1).unwrap().len(), 6);
}

#[test]
fn missing_proposal_is_repaired_without_relocking() {
    let engine = engine();
    let first = engine.run(&trigger()).unwrap();
    engine.storage().delete_week(1, date(2025, 3, 24)).unwrap();

    let repaired = engine.run(&trigger()).unwrap();
    assert!(!repaired.promoted);
    assert_eq!(repaired.proposed, first.proposed);
    assert!(repaired.logs.iter().any(|l| l.contains("repairing")));

    let current = engine.storage().load_week(1, date(2025, 3, 17)).unwrap().unwrap();
    assert!(current.rows.iter().all(|r| r.locked_at == Some(reference())));
}

// ── Dry run and preview ───────────────────────────────────────────────────

#[test]
fn dry_run_persists_nothing_and_matches_live_ranking() {
    let engine = engine();
    let dry = engine.run(&trigger().with_dry_run(true)).unwrap();
    assert!(dry.dry_run);
    assert!(engine.storage().all_assignments(1).unwrap().is_empty());

    let live = engine.run(&trigger()).unwrap();
    assert_eq!(
        ranking_digest(&dry.ranking).unwrap(),
        ranking_digest(&live.ranking).unwrap()
    );
    assert_eq!(dry.locked, live.locked);
    assert_eq!(dry.proposed, live.proposed);
}

#[test]
fn preview_of_next_week_matches_rollover_ranking() {
    let engine = engine();
    let live = engine.run(&trigger()).unwrap();
    let preview = engine
        .rank(1, reference() + Duration::days(7), CHICAGO, None)
        .unwrap();
    assert_eq!(
        ranking_digest(&preview).unwrap(),
        ranking_digest(&live.ranking).unwrap()
    );
}

// ── Timezones ─────────────────────────────────────────────────────────────

#[test]
fn week_boundary_follows_location_timezone() {
    // Sunday 20:00 UTC is already Monday morning in Auckland.
    let instant = Utc.with_ymd_and_hms(2025, 3, 16, 20, 0, 0).unwrap();

    let auckland = engine()
        .run(&RolloverTrigger::new(1, instant, "Pacific/Auckland"))
        .unwrap();
    assert_eq!(auckland.week_locked, Some(date(2025, 3, 17)));

    let chicago = engine().run(&RolloverTrigger::new(1, instant, CHICAGO)).unwrap();
    assert_eq!(chicago.week_locked, Some(date(2025, 3, 10)));
}

#[test]
fn unknown_timezone_is_an_error() {
    let err = engine()
        .run(&RolloverTrigger::new(1, reference(), "Mars/Olympus"))
        .unwrap_err();
    assert!(matches!(err, SequencerError::Calendar(_)));
}

#[test]
fn invalid_override_config_is_rejected() {
    let mut config = SequencerConfig::default();
    config.trim_pct = 0.9;
    let err = engine().run(&trigger().with_config(config)).unwrap_err();
    assert!(matches!(err, SequencerError::Config(_)));
}

// ── Late runs ─────────────────────────────────────────────────────────────

/// Twelve zero ratings for move 4 recorded during the in-progress week.
fn store_with_current_week_ratings() -> StorageEngine {
    let store = seeded_store();
    for staff in 0..12 {
        store
            .record_confidence(&ConfidenceRecord::new(
                4,
                date(2025, 3, 17),
                format!("s{staff}"),
                0.0,
                RatingScale::Unit,
            ))
            .unwrap();
    }
    store
}

#[test]
fn in_progress_week_ratings_do_not_reach_next_proposal() {
    let engine =
        RolloverEngine::new(store_with_current_week_ratings(), SequencerConfig::default()).unwrap();
    // Wednesday 2025-03-19 10:00 in Chicago, still inside the 2025-03-17 week.
    let late = Utc.with_ymd_and_hms(2025, 3, 19, 15, 0, 0).unwrap();
    let summary = engine.run(&RolloverTrigger::new(1, late, CHICAGO)).unwrap();

    let move4 = summary
        .ranking
        .iter()
        .find(|c| c.pro_move_id == 4)
        .unwrap();
    assert_eq!(move4.status, AlertStatus::Ok);
    assert!((move4.smoothed_confidence - 0.70).abs() < 1e-9);
    assert!((move4.features.confidence - 0.30).abs() < 1e-9);
}

#[test]
fn late_run_matches_early_run() {
    let early = engine().run(&trigger()).unwrap();

    let engine =
        RolloverEngine::new(store_with_current_week_ratings(), SequencerConfig::default()).unwrap();
    let late = Utc.with_ymd_and_hms(2025, 3, 19, 15, 0, 0).unwrap();
    let summary = engine.run(&RolloverTrigger::new(1, late, CHICAGO)).unwrap();

    assert_eq!(
        ranking_digest(&early.ranking).unwrap(),
        ranking_digest(&summary.ranking).unwrap()
    );
    assert_eq!(early.locked, summary.locked);
    assert_eq!(early.proposed, summary.proposed);

    let preview = engine
        .rank(1, late + Duration::days(7), CHICAGO, None)
        .unwrap();
    assert_eq!(
        ranking_digest(&preview).unwrap(),
        ranking_digest(&summary.ranking).unwrap()
    );
}

// ── Degraded pools ────────────────────────────────────────────────────────

#[test]
fn short_pool_still_locks_what_it_can() {
    let store = StorageEngine::open_in_memory().unwrap();
    store.upsert_pro_move(&pro_move(1, 1)).unwrap();
    store.upsert_pro_move(&pro_move(2, 2)).unwrap();
    let engine = RolloverEngine::new(store, SequencerConfig::default()).unwrap();

    let summary = engine.run(&trigger()).unwrap();
    assert!(summary.success);
    assert_eq!(summary.locked.len(), 2);
    // Both moves cool down, so next week has nothing to propose.
    assert!(summary.proposed.is_empty());
    assert_eq!(summary.week_proposed, None);
    assert!(summary.logs.iter().any(|l| l.contains("only 2 eligible")));
    assert!(summary.logs.iter().any(|l| l.contains("no eligible")));
}

#[test]
fn empty_pool_locks_nothing() {
    let engine = RolloverEngine::new(
        StorageEngine::open_in_memory().unwrap(),
        SequencerConfig::default(),
    )
    .unwrap();
    let summary = engine.run(&trigger()).unwrap();
    assert!(summary.success);
    assert!(!summary.promoted);
    assert_eq!(summary.week_locked, None);
    assert!(engine.storage().all_assignments(1).unwrap().is_empty());
}

#[test]
fn retired_moves_are_never_proposed() {
    let engine = engine();
    engine.storage().retire_pro_move(5).unwrap();
    engine.storage().retire_pro_move(6).unwrap();
    let summary = engine.run(&trigger()).unwrap();
    assert!(summary.ranking.iter().all(|c| c.pro_move_id <= 4));
    assert!(!summary.locked.contains(&5) && !summary.proposed.contains(&6));
}

// ── Manual overrides ──────────────────────────────────────────────────────

#[test]
fn manual_override_is_promoted_as_is() {
    let engine = engine();
    engine.run(&trigger()).unwrap();

    let next = date(2025, 3, 24);
    let set = engine.override_week(1, next, &[6, 4, 2]).unwrap();
    assert!(set.is_manual());

    // A forced rerun of the current week keeps the manual proposal.
    let forced = engine.run(&trigger().with_force(true)).unwrap();
    assert_eq!(forced.proposed, vec![6, 4, 2]);
    assert!(forced.logs.iter().any(|l| l.contains("manual proposal")));

    let later = RolloverTrigger::new(1, reference() + Duration::days(7), CHICAGO);
    let summary = engine.run(&later).unwrap();
    assert_eq!(summary.locked, vec![6, 4, 2]);
    let week = engine.storage().load_week(1, next).unwrap().unwrap();
    assert!(week.is_locked());
    assert!(week
        .rows
        .iter()
        .all(|r| r.source == GenerationSource::Manual && r.overridden));
}

#[test]
fn override_of_locked_week_is_rejected() {
    let engine = engine();
    engine.run(&trigger()).unwrap();
    let err = engine
        .override_week(1, date(2025, 3, 19), &[1, 3, 5])
        .unwrap_err();
    assert!(matches!(
        err,
        SequencerError::Assignment(AssignmentError::WeekLocked { role_id: 1, .. })
    ));
}

#[test]
fn override_validates_moves() {
    let engine = engine();
    engine.storage().upsert_pro_move(&pro_move_for_role(2, 10, 1)).unwrap();
    engine.storage().retire_pro_move(4).unwrap();
    let week = date(2025, 3, 31);

    let err = engine.override_week(1, week, &[1, 2]).unwrap_err();
    assert!(matches!(
        err,
        SequencerError::Assignment(AssignmentError::WrongPickCount { expected: 3, actual: 2 })
    ));

    let err = engine.override_week(1, week, &[1, 2, 10]).unwrap_err();
    assert!(matches!(
        err,
        SequencerError::Assignment(AssignmentError::UnknownMove { pro_move_id: 10, .. })
    ));

    let err = engine.override_week(1, week, &[1, 2, 4]).unwrap_err();
    assert!(matches!(
        err,
        SequencerError::Assignment(AssignmentError::InactiveMove { pro_move_id: 4 })
    ));

    let err = engine.override_week(1, week, &[1, 1, 2]).unwrap_err();
    assert!(matches!(
        err,
        SequencerError::Assignment(AssignmentError::DuplicateMove { pro_move_id: 1 })
    ));

    assert!(engine.storage().load_week(1, week).unwrap().is_none());
}
