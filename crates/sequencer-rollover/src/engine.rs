//! RolloverEngine: the public entry points over any [`ISequencerStorage`].

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use uuid::Uuid;

use sequencer_core::calendar::{local_week_start, monday_of, parse_timezone, shift_weeks};
use sequencer_core::config::SequencerConfig;
use sequencer_core::errors::{AssignmentError, SequencerError, SequencerResult};
use sequencer_core::models::{
    CommitOutcome, GenerationSource, RankedCandidate, RolloverSummary, RolloverTrigger, WeekSet,
};
use sequencer_core::traits::ISequencerStorage;
use sequencer_observability::rollover_span;
use sequencer_observability::tracing_setup::events;
use sequencer_scoring::FeatureScorer;

use crate::machine::{self, RolloverInputs};
use crate::snapshot;
use crate::trace::TraceLog;

/// Runs weekly rollovers, previews and manual overrides against a store.
pub struct RolloverEngine<S: ISequencerStorage> {
    storage: S,
    config: SequencerConfig,
}

impl<S: ISequencerStorage> RolloverEngine<S> {
    /// Create an engine with a default configuration. Fails on invalid config.
    pub fn new(storage: S, config: SequencerConfig) -> SequencerResult<Self> {
        config.validate()?;
        Ok(Self { storage, config })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Run one rollover.
    pub fn run(&self, trigger: &RolloverTrigger) -> SequencerResult<RolloverSummary> {
        self.execute(trigger, None)
    }

    /// Run one rollover, aborting with [`SequencerError::Timeout`] if
    /// `deadline` has passed by the time the write would happen.
    pub fn run_with_deadline(
        &self,
        trigger: &RolloverTrigger,
        deadline: Instant,
    ) -> SequencerResult<RolloverSummary> {
        self.execute(trigger, Some(deadline))
    }

    /// Run independent rollovers in parallel.
    ///
    /// A failing trigger yields a `success: false` summary carrying the error
    /// in its logs; the others are unaffected. Output order matches input.
    pub fn run_batch(&self, triggers: &[RolloverTrigger]) -> Vec<RolloverSummary> {
        triggers
            .par_iter()
            .map(|trigger| match self.run(trigger) {
                Ok(summary) => summary,
                Err(e) => {
                    events::rollover_failed(trigger.role_id, &e.to_string());
                    RolloverSummary::failed(
                        Uuid::new_v4().to_string(),
                        trigger.role_id,
                        trigger.dry_run,
                        vec![format!("rollover failed: {e}")],
                    )
                }
            })
            .collect()
    }

    /// Score the role's eligible pool at the week containing `reference`,
    /// without writing anything.
    ///
    /// Ranks the week the way the rollover that proposes it does: from the
    /// week before, with that week's confidence still in progress.
    pub fn rank(
        &self,
        role_id: i64,
        reference: DateTime<Utc>,
        timezone: &str,
        config: Option<&SequencerConfig>,
    ) -> SequencerResult<Vec<RankedCandidate>> {
        let config = self.effective_config(config)?;
        let week = local_week_start(reference, parse_timezone(timezone)?);
        let moves = self.storage.eligible_moves(role_id)?;
        let history = snapshot::load(&self.storage, role_id, shift_weeks(week, -1), &config)?;
        Ok(FeatureScorer::from_config(&config).rank(&moves, &history, week))
    }

    /// Replace a not-yet-locked week's picks with a manual selection.
    ///
    /// `pro_move_ids` must be exactly `pick_count` distinct active moves of
    /// the role, in display order.
    pub fn override_week(
        &self,
        role_id: i64,
        week_start: NaiveDate,
        pro_move_ids: &[i64],
    ) -> SequencerResult<WeekSet> {
        let week = monday_of(week_start);
        let set = WeekSet::build(
            role_id,
            week,
            pro_move_ids,
            GenerationSource::Manual,
            self.config.pick_count,
        )?;

        let known = self.storage.get_pro_moves(pro_move_ids)?;
        for id in pro_move_ids {
            match known.iter().find(|m| m.id == *id) {
                Some(m) if m.role_id != role_id => {
                    return Err(AssignmentError::UnknownMove { pro_move_id: *id, role_id }.into())
                }
                Some(m) if !m.active => {
                    return Err(AssignmentError::InactiveMove { pro_move_id: *id }.into())
                }
                Some(_) => {}
                None => {
                    return Err(AssignmentError::UnknownMove { pro_move_id: *id, role_id }.into())
                }
            }
        }

        match self.storage.replace_proposed(&set)? {
            CommitOutcome::Committed => {
                events::week_overridden(role_id, week, pro_move_ids);
                Ok(set)
            }
            CommitOutcome::AlreadyLocked => Err(AssignmentError::WeekLocked {
                role_id,
                week_start: week,
            }
            .into()),
        }
    }

    fn effective_config(&self, config: Option<&SequencerConfig>) -> SequencerResult<SequencerConfig> {
        match config {
            Some(config) => {
                config.validate()?;
                Ok(config.clone())
            }
            None => Ok(self.config.clone()),
        }
    }

    fn execute(
        &self,
        trigger: &RolloverTrigger,
        deadline: Option<Instant>,
    ) -> SequencerResult<RolloverSummary> {
        let config = self.effective_config(trigger.config.as_ref())?;
        let tz = parse_timezone(&trigger.timezone)?;
        let current = local_week_start(trigger.reference, tz);
        let next = shift_weeks(current, 1);
        let role_id = trigger.role_id;
        let run_id = Uuid::new_v4().to_string();

        let span = rollover_span!(role_id, current);
        let _entered = span.enter();

        let mut trace = TraceLog::new();
        trace.info(format!(
            "rollover {run_id}: role {role_id}, week {current} ({tz}){}{}",
            if trigger.force_promotion { ", forced" } else { "" },
            if trigger.dry_run { ", dry run" } else { "" },
        ));

        let plan = machine::plan(
            &self.storage,
            &RolloverInputs {
                role_id,
                current,
                next,
                locked_at: trigger.reference,
                force: trigger.force_promotion,
                config: &config,
            },
            &mut trace,
        )?;

        let mut promoted = plan.promoted;
        let mut locked = plan.locked;
        let mut proposed = plan.proposed;
        let mut ranking = plan.ranking;

        if plan.write.is_empty() {
            trace.info("nothing to write");
        } else if trigger.dry_run {
            trace.info("dry run: nothing persisted");
        } else {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                events::rollover_failed(role_id, "deadline passed before commit");
                return Err(SequencerError::Timeout { role_id });
            }
            match self.storage.commit_rollover(&plan.write)? {
                CommitOutcome::Committed => {
                    if let Some(lock) = &plan.write.lock {
                        events::week_locked(role_id, current, &lock.pro_move_ids(), trigger.force_promotion);
                    }
                    if let Some(proposal) = &plan.write.propose {
                        events::week_proposed(role_id, next, &proposal.pro_move_ids());
                    }
                    trace.info("committed");
                }
                CommitOutcome::AlreadyLocked => {
                    trace.warn("another rollover locked the week first; nothing written");
                    promoted = false;
                    ranking.clear();
                    locked = self.week_ids(role_id, current)?;
                    proposed = self.week_ids(role_id, next)?;
                }
            }
        }

        Ok(RolloverSummary {
            run_id,
            role_id,
            success: true,
            promoted,
            dry_run: trigger.dry_run,
            week_locked: (!locked.is_empty()).then_some(current),
            week_proposed: (!proposed.is_empty()).then_some(next),
            locked,
            proposed,
            ranking,
            logs: trace.into_lines(),
        })
    }

    fn week_ids(&self, role_id: i64, week: NaiveDate) -> SequencerResult<Vec<i64>> {
        Ok(self
            .storage
            .load_week(role_id, week)?
            .map(|set| set.pro_move_ids())
            .unwrap_or_default())
    }
}

impl<S: ISequencerStorage + 'static> RolloverEngine<S> {
    /// Run a rollover on tokio's blocking pool.
    pub async fn run_async(
        self: Arc<Self>,
        trigger: RolloverTrigger,
    ) -> SequencerResult<RolloverSummary> {
        tokio::task::spawn_blocking(move || self.run(&trigger))
            .await
            .map_err(|e| SequencerError::Aborted {
                reason: e.to_string(),
            })?
    }
}
