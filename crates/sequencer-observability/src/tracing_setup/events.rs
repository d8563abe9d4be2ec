//! Structured log events for rollover milestones.
//!
//! Each function emits a `tracing` event with structured fields.

use chrono::NaiveDate;

/// Log a week transitioning from proposed to locked.
pub fn week_locked(role_id: i64, week: NaiveDate, picks: &[i64], forced: bool) {
    tracing::info!(
        event = "week_locked",
        role_id = role_id,
        week = %week,
        picks = ?picks,
        forced = forced,
        "week locked"
    );
}

/// Log a new proposal for the following week.
pub fn week_proposed(role_id: i64, week: NaiveDate, picks: &[i64]) {
    tracing::info!(
        event = "week_proposed",
        role_id = role_id,
        week = %week,
        picks = ?picks,
        "week proposed"
    );
}

/// Log a rollover that found the week already locked.
pub fn promotion_skipped(role_id: i64, week: NaiveDate) {
    tracing::info!(
        event = "promotion_skipped",
        role_id = role_id,
        week = %week,
        "week already locked; promotion skipped"
    );
}

/// Log a manual override of a proposed week.
pub fn week_overridden(role_id: i64, week: NaiveDate, picks: &[i64]) {
    tracing::info!(
        event = "week_overridden",
        role_id = role_id,
        week = %week,
        picks = ?picks,
        "week manually overridden"
    );
}

/// Log a rollover that aborted with an error.
pub fn rollover_failed(role_id: i64, error: &str) {
    tracing::error!(
        event = "rollover_failed",
        role_id = role_id,
        error = %error,
        "rollover failed"
    );
}
