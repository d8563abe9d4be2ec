use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::SequencerConfig;

use super::{RankedCandidate, WeekSet};

/// External trigger for one role's weekly rollover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverTrigger {
    pub role_id: i64,
    /// Instant the rollover is evaluated at; may be simulated.
    pub reference: DateTime<Utc>,
    /// IANA timezone of the role's location.
    pub timezone: String,
    /// Bypass the already-locked guard.
    #[serde(default)]
    pub force_promotion: bool,
    /// Compute everything, persist nothing.
    #[serde(default)]
    pub dry_run: bool,
    /// Per-invocation configuration override.
    #[serde(default)]
    pub config: Option<SequencerConfig>,
}

impl RolloverTrigger {
    pub fn new(role_id: i64, reference: DateTime<Utc>, timezone: impl Into<String>) -> Self {
        Self {
            role_id,
            reference,
            timezone: timezone.into(),
            force_promotion: false,
            dry_run: false,
            config: None,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force_promotion = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_config(mut self, config: SequencerConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Outcome of one rollover invocation.
///
/// `logs` is a human-readable trace; recoverable conditions appear there and
/// in the boolean flags rather than as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RolloverSummary {
    pub run_id: String,
    pub role_id: i64,
    pub success: bool,
    pub promoted: bool,
    pub dry_run: bool,
    pub week_locked: Option<NaiveDate>,
    pub week_proposed: Option<NaiveDate>,
    /// Move ids of the current (locked) week in display order.
    pub locked: Vec<i64>,
    /// Move ids of the next (proposed) week in display order.
    pub proposed: Vec<i64>,
    /// Ranking computed for the proposed week, empty when it was not recomputed.
    pub ranking: Vec<RankedCandidate>,
    pub logs: Vec<String>,
}

impl RolloverSummary {
    pub fn failed(run_id: String, role_id: i64, dry_run: bool, logs: Vec<String>) -> Self {
        Self {
            run_id,
            role_id,
            success: false,
            promoted: false,
            dry_run,
            week_locked: None,
            week_proposed: None,
            locked: Vec::new(),
            proposed: Vec::new(),
            ranking: Vec::new(),
            logs,
        }
    }
}

/// Everything one rollover persists, applied as a single conditional write.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloverWrite {
    pub role_id: i64,
    /// Current week rows, already transitioned to locked.
    pub lock: Option<WeekSet>,
    /// Next week rows, proposed. Replaces any automatic proposal for that week.
    pub propose: Option<WeekSet>,
    /// Abort with [`CommitOutcome::AlreadyLocked`] if the lock week already
    /// has locked rows when the write begins.
    pub require_unlocked: bool,
}

impl RolloverWrite {
    /// True when there is nothing to persist.
    pub fn is_empty(&self) -> bool {
        self.lock.is_none() && self.propose.is_none()
    }
}

/// Result of a conditional rollover write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Another invocation locked the week first; nothing was written.
    AlreadyLocked,
}
