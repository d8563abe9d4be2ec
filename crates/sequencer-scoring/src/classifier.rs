//! Low-confidence alert rules.
//!
//! Evaluated in order, first match wins:
//! critical: smoothed ≤ 0.20 and ≥ 10 observations over the last two weeks.
//! watch: smoothed ≤ 0.30, or one of the last two weeks averaged ≤ 0.20 with ≥ 5 observations.
//! ok: otherwise.

use chrono::NaiveDate;

use sequencer_core::models::{AlertStatus, WeekAggregate};

pub const CRITICAL_CONFIDENCE: f64 = 0.20;
pub const CRITICAL_MIN_OBSERVATIONS: u32 = 10;
pub const SEVERITY_CEILING: f64 = 0.25;
pub const WATCH_CONFIDENCE: f64 = 0.30;
pub const WATCH_WEEK_AVERAGE: f64 = 0.20;
pub const WATCH_WEEK_MIN_OBSERVATIONS: u32 = 5;

/// Number of recent completed weeks the rules look at.
pub const RECENT_WEEKS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub status: AlertStatus,
    /// Only set for critical alerts.
    pub severity: Option<f64>,
}

/// The most recent completed weeks with observations, newest first.
///
/// Only weeks strictly before `reference` count, so an in-progress week never
/// leaks in. Gap weeks (no aggregate, or `n == 0`) are skipped rather than
/// read as zero confidence.
pub fn recent_completed_weeks(weeks: &[WeekAggregate], reference: NaiveDate) -> Vec<WeekAggregate> {
    let mut completed: Vec<WeekAggregate> = weeks
        .iter()
        .filter(|w| w.week_start < reference && w.n > 0)
        .copied()
        .collect();
    completed.sort_by(|a, b| b.week_start.cmp(&a.week_start));
    completed.truncate(RECENT_WEEKS);
    completed
}

/// Classify a candidate from its smoothed confidence and recent weeks.
pub fn classify(smoothed: f64, recent: &[WeekAggregate]) -> Classification {
    let recent = &recent[..recent.len().min(RECENT_WEEKS)];
    let n_two_weeks: u32 = recent.iter().map(|w| w.n).sum();

    if smoothed <= CRITICAL_CONFIDENCE && n_two_weeks >= CRITICAL_MIN_OBSERVATIONS {
        let severity = ((SEVERITY_CEILING - smoothed) / SEVERITY_CEILING).clamp(0.0, 1.0);
        return Classification {
            status: AlertStatus::Critical,
            severity: Some(severity),
        };
    }

    let weak_week = recent
        .iter()
        .any(|w| w.avg <= WATCH_WEEK_AVERAGE && w.n >= WATCH_WEEK_MIN_OBSERVATIONS);
    if smoothed <= WATCH_CONFIDENCE || weak_week {
        return Classification {
            status: AlertStatus::Watch,
            severity: None,
        };
    }

    Classification {
        status: AlertStatus::Ok,
        severity: None,
    }
}
