use chrono::NaiveDate;

use crate::errors::SequencerResult;
use crate::models::{CommitOutcome, HistorySnapshot, ProMove, RolloverWrite, WeekSet};

/// The durable keyed store behind the sequencer.
///
/// Reads happen before scoring; exactly one write happens at the end of a
/// rollover. Implementations must make [`ISequencerStorage::commit_rollover`]
/// and [`ISequencerStorage::replace_proposed`] all-or-nothing.
pub trait ISequencerStorage: Send + Sync {
    // --- Catalog ---
    /// Active moves for the role, ordered by id.
    fn eligible_moves(&self, role_id: i64) -> SequencerResult<Vec<ProMove>>;
    /// Moves by id, active or retired. Unknown ids are omitted.
    fn get_pro_moves(&self, ids: &[i64]) -> SequencerResult<Vec<ProMove>>;

    // --- History ---
    /// Confidence, eval, selection and domain history for weeks in `[from, to)`.
    fn load_history(
        &self,
        role_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SequencerResult<HistorySnapshot>;

    // --- Assignments ---
    fn load_week(&self, role_id: i64, week_start: NaiveDate) -> SequencerResult<Option<WeekSet>>;
    /// Apply a rollover's lock and proposal atomically.
    fn commit_rollover(&self, write: &RolloverWrite) -> SequencerResult<CommitOutcome>;
    /// Replace a week's rows with a manual set unless the week is locked.
    fn replace_proposed(&self, set: &WeekSet) -> SequencerResult<CommitOutcome>;
}
