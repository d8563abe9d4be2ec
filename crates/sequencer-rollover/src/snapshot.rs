use chrono::NaiveDate;

use sequencer_core::calendar::{shift_weeks, window_start};
use sequencer_core::config::SequencerConfig;
use sequencer_core::errors::SequencerResult;
use sequencer_core::models::HistorySnapshot;
use sequencer_core::traits::ISequencerStorage;

/// Read every piece of history needed to score both `current` and the week
/// after it, in one pass.
///
/// Selections run through the following week's Monday (exclusive) so a
/// locked current week counts toward the next proposal's domain and recency
/// features. Confidence stops at `current`: that week is still in progress
/// whenever a rollover runs, early or late.
pub(crate) fn load<S: ISequencerStorage + ?Sized>(
    storage: &S,
    role_id: i64,
    current: NaiveDate,
    config: &SequencerConfig,
) -> SequencerResult<HistorySnapshot> {
    let span = config.lookback_weeks.max(config.domain_window_weeks);
    let from = window_start(current, span);
    let to = shift_weeks(current, 1);
    let mut snapshot = storage.load_history(role_id, from, to)?;
    snapshot.truncate_confidence(current);
    Ok(snapshot)
}
