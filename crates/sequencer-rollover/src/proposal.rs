use chrono::NaiveDate;

use sequencer_core::config::SequencerConfig;
use sequencer_core::errors::SequencerResult;
use sequencer_core::models::{AlertStatus, GenerationSource, HistorySnapshot, ProMove, RankedCandidate, WeekSet};
use sequencer_observability::{scoring_span, selection_span};
use sequencer_scoring::FeatureScorer;
use sequencer_selection::{select, SelectionParams};

use crate::trace::TraceLog;

/// An automatic week set plus the ranking it was drawn from.
pub(crate) struct Proposal {
    pub set: WeekSet,
    pub ranking: Vec<RankedCandidate>,
}

/// Score, select and build an automatic week set for `week`.
pub(crate) fn propose(
    role_id: i64,
    week: NaiveDate,
    moves: &[ProMove],
    snapshot: &HistorySnapshot,
    config: &SequencerConfig,
    trace: &mut TraceLog,
) -> SequencerResult<Proposal> {
    let ranking = {
        let span = scoring_span!(moves.len());
        let _entered = span.enter();
        FeatureScorer::from_config(config).rank(moves, snapshot, week)
    };

    let selection = {
        let span = selection_span!(ranking.len(), config.pick_count);
        let _entered = span.enter();
        select(&ranking, &SelectionParams::from_config(config))
    };

    if selection.cooling_down > 0 {
        trace.info(format!(
            "{} pro-moves in cooldown for {week}; {} eligible",
            selection.cooling_down, selection.eligible
        ));
    }
    // Selection has already logged its notes.
    for note in &selection.notes {
        trace.record(note.clone());
    }

    let critical = count_status(&ranking, AlertStatus::Critical);
    let watch = count_status(&ranking, AlertStatus::Watch);
    if critical + watch > 0 {
        trace.info(format!(
            "low-confidence alerts for {week}: {critical} critical, {watch} watch"
        ));
    }

    let ids = selection.pro_move_ids();
    let set = WeekSet::build(role_id, week, &ids, GenerationSource::Auto, config.pick_count)?;
    trace.info(format!("selected {ids:?} for {week}"));

    Ok(Proposal { set, ranking })
}

fn count_status(ranking: &[RankedCandidate], status: AlertStatus) -> usize {
    ranking.iter().filter(|c| c.status == status).count()
}
