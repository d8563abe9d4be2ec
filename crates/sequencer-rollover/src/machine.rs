//! The rollover decision: what to lock, what to propose, what to write.
//!
//! ```text
//! current week locked?  force?  next week          action
//! no                    -       auto / missing     lock current, propose next
//! no                    -       manual / locked    lock current, keep next
//! yes                   no      present            no-op
//! yes                   no      missing            propose next only (repair)
//! yes                   yes     auto / missing     re-stamp current, propose next
//! ```

use chrono::{DateTime, NaiveDate, Utc};

use sequencer_core::config::SequencerConfig;
use sequencer_core::errors::SequencerResult;
use sequencer_core::models::{RankedCandidate, RolloverWrite, WeekSet};
use sequencer_core::traits::ISequencerStorage;
use sequencer_observability::tracing_setup::events;

use crate::proposal::propose;
use crate::snapshot;
use crate::trace::TraceLog;

pub(crate) struct RolloverInputs<'a> {
    pub role_id: i64,
    pub current: NaiveDate,
    pub next: NaiveDate,
    pub locked_at: DateTime<Utc>,
    pub force: bool,
    pub config: &'a SequencerConfig,
}

pub(crate) struct RolloverPlan {
    pub write: RolloverWrite,
    pub promoted: bool,
    /// Ranking behind the new proposal, empty when none was computed.
    pub ranking: Vec<RankedCandidate>,
    /// Current week ids after the write.
    pub locked: Vec<i64>,
    /// Next week ids after the write.
    pub proposed: Vec<i64>,
}

pub(crate) fn plan<S: ISequencerStorage + ?Sized>(
    storage: &S,
    inputs: &RolloverInputs<'_>,
    trace: &mut TraceLog,
) -> SequencerResult<RolloverPlan> {
    let RolloverInputs {
        role_id,
        current,
        next,
        locked_at,
        force,
        config,
    } = *inputs;

    let moves = storage.eligible_moves(role_id)?;
    let mut snapshot = snapshot::load(storage, role_id, current, config)?;
    let current_set = storage.load_week(role_id, current)?;
    let next_set = storage.load_week(role_id, next)?;
    trace.info(format!("{} eligible pro-moves for role {role_id}", moves.len()));

    let already_locked = current_set.as_ref().is_some_and(WeekSet::is_locked);
    if already_locked && !force {
        events::promotion_skipped(role_id, current);
        trace.record(format!("week {current} already locked; promotion skipped"));
        let locked = current_set.map(|s| s.pro_move_ids()).unwrap_or_default();

        if let Some(existing) = next_set {
            return Ok(RolloverPlan {
                write: RolloverWrite {
                    role_id,
                    lock: None,
                    propose: None,
                    require_unlocked: true,
                },
                promoted: false,
                ranking: Vec::new(),
                locked,
                proposed: existing.pro_move_ids(),
            });
        }

        trace.warn(format!("proposal for {next} missing; repairing"));
        let proposal = propose(role_id, next, &moves, &snapshot, config, trace)?;
        let proposed = proposal.set.pro_move_ids();
        return Ok(RolloverPlan {
            write: RolloverWrite {
                role_id,
                lock: None,
                propose: Some(proposal.set),
                require_unlocked: false,
            },
            promoted: false,
            ranking: proposal.ranking,
            locked,
            proposed,
        });
    }

    let mut lock_set = match current_set {
        Some(set) if set.is_locked() => {
            trace.warn(format!("force: re-stamping locked week {current}"));
            set
        }
        Some(set) => {
            let source = if set.is_manual() { "manual" } else { "auto" };
            trace.info(format!(
                "promoting {} {source} pro-moves for {current}",
                set.len()
            ));
            set
        }
        None => {
            trace.warn(format!("no proposal for {current}; synthesizing one"));
            propose(role_id, current, &moves, &snapshot, config, trace)?.set
        }
    };
    lock_set.lock(locked_at);
    let locked = lock_set.pro_move_ids();

    let lock = if lock_set.is_empty() {
        trace.warn(format!("nothing to lock for {current}: no eligible pro-moves"));
        None
    } else {
        let locked_moves = storage.get_pro_moves(&locked)?;
        snapshot.record_selection(current, &locked_moves);
        Some(lock_set)
    };

    let (propose_set, ranking, proposed) = match next_set {
        Some(set) if set.is_locked() => {
            trace.warn(format!("week {next} already locked; proposal left unchanged"));
            (None, Vec::new(), set.pro_move_ids())
        }
        Some(set) if set.is_manual() => {
            trace.info(format!("manual proposal for {next} kept"));
            (None, Vec::new(), set.pro_move_ids())
        }
        _ => {
            let proposal = propose(role_id, next, &moves, &snapshot, config, trace)?;
            let ids = proposal.set.pro_move_ids();
            (Some(proposal.set), proposal.ranking, ids)
        }
    };

    Ok(RolloverPlan {
        promoted: lock.is_some(),
        write: RolloverWrite {
            role_id,
            lock,
            propose: propose_set,
            require_unlocked: !force,
        },
        ranking,
        locked,
        proposed,
    })
}
