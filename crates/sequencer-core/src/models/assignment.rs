use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::AssignmentError;

/// Lifecycle state of an assignment row.
///
/// Past locked weeks are historical by date alone; there is no third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssignmentStatus {
    Proposed,
    Locked,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Locked => "locked",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "proposed" => Some(Self::Proposed),
            "locked" => Some(Self::Locked),
            _ => None,
        }
    }
}

/// Who produced an assignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GenerationSource {
    Auto,
    Manual,
}

impl GenerationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// One pro-move placed into one role's week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub role_id: i64,
    pub week_start: NaiveDate,
    /// 1-based position within the week.
    pub display_order: u8,
    pub pro_move_id: i64,
    pub status: AssignmentStatus,
    pub source: GenerationSource,
    pub overridden: bool,
    pub locked_at: Option<DateTime<Utc>>,
}

/// The full set of assignment rows for one (role, week).
///
/// [`WeekSet::build`] is the only constructor that creates new rows, so both
/// the automatic and the manual path share the same invariants: no duplicate
/// moves, display order `1..=n`, and at most `k` rows (exactly `k` for manual
/// overrides).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSet {
    pub role_id: i64,
    pub week_start: NaiveDate,
    pub rows: Vec<Assignment>,
}

impl WeekSet {
    /// Build a fresh proposed week from an ordered list of move ids.
    pub fn build(
        role_id: i64,
        week_start: NaiveDate,
        pro_move_ids: &[i64],
        source: GenerationSource,
        pick_count: usize,
    ) -> Result<Self, AssignmentError> {
        let too_many = pro_move_ids.len() > pick_count;
        let manual_short = source == GenerationSource::Manual && pro_move_ids.len() != pick_count;
        if too_many || manual_short {
            return Err(AssignmentError::WrongPickCount {
                expected: pick_count,
                actual: pro_move_ids.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for id in pro_move_ids {
            if !seen.insert(*id) {
                return Err(AssignmentError::DuplicateMove { pro_move_id: *id });
            }
        }

        let overridden = source == GenerationSource::Manual;
        let rows = pro_move_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| Assignment {
                role_id,
                week_start,
                display_order: (idx + 1) as u8,
                pro_move_id: *id,
                status: AssignmentStatus::Proposed,
                source,
                overridden,
                locked_at: None,
            })
            .collect();

        Ok(Self {
            role_id,
            week_start,
            rows,
        })
    }

    /// Reassemble a set from stored rows, ordered by display order.
    pub fn from_rows(role_id: i64, week_start: NaiveDate, mut rows: Vec<Assignment>) -> Self {
        rows.sort_by_key(|r| r.display_order);
        Self {
            role_id,
            week_start,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Any locked row makes the whole week authoritative.
    pub fn is_locked(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.status == AssignmentStatus::Locked)
    }

    pub fn is_manual(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.source == GenerationSource::Manual)
    }

    pub fn pro_move_ids(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.pro_move_id).collect()
    }

    /// Transition every row to locked, stamping `at`.
    pub fn lock(&mut self, at: DateTime<Utc>) {
        for row in &mut self.rows {
            row.status = AssignmentStatus::Locked;
            row.locked_at = Some(at);
        }
    }
}
