use std::collections::BTreeSet;

use sequencer_core::config::SequencerConfig;
use sequencer_core::models::RankedCandidate;

use crate::{cooldown, diversity};

/// Selection constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    pub pick_count: usize,
    pub cooldown_weeks: u32,
    pub min_distinct_domains: usize,
}

impl SelectionParams {
    pub fn from_config(config: &SequencerConfig) -> Self {
        Self {
            pick_count: config.pick_count,
            cooldown_weeks: config.cooldown_weeks,
            min_distinct_domains: config.diversity_min_domains,
        }
    }
}

/// Picks plus the bookkeeping callers surface in their trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected candidates in rank order.
    pub picks: Vec<RankedCandidate>,
    /// Candidates left after the cooldown filter.
    pub eligible: usize,
    /// Candidates excluded by cooldown.
    pub cooling_down: usize,
    /// Diversity was dropped to fill the remaining slots.
    pub relaxed: bool,
    /// Slots left empty because the eligible pool was too small.
    pub shortfall: usize,
    /// Human-readable notes for degraded outcomes.
    pub notes: Vec<String>,
}

impl Selection {
    pub fn pro_move_ids(&self) -> Vec<i64> {
        self.picks.iter().map(|c| c.pro_move_id).collect()
    }
}

/// Select up to `pick_count` candidates from a ranked list.
///
/// Never fabricates picks: an eligible pool smaller than `pick_count` yields
/// that many picks, and an empty pool yields none.
pub fn select(ranked: &[RankedCandidate], params: &SelectionParams) -> Selection {
    let eligible = cooldown::eligible(ranked, params.cooldown_weeks);
    let cooling_down = ranked.len() - eligible.len();
    let mut notes = Vec::new();

    let mut picked =
        diversity::greedy_walk(&eligible, params.pick_count, params.min_distinct_domains);

    let mut relaxed = false;
    if picked.len() < params.pick_count {
        let mut ids: BTreeSet<i64> = picked.iter().map(|i| eligible[*i].pro_move_id).collect();
        for (idx, candidate) in eligible.iter().enumerate() {
            if picked.len() >= params.pick_count {
                break;
            }
            if picked.contains(&idx) || !ids.insert(candidate.pro_move_id) {
                continue;
            }
            picked.push(idx);
            relaxed = true;
        }
        if relaxed {
            let note = format!(
                "diversity relaxed: fewer than {} distinct domains available for {} picks",
                params.min_distinct_domains, params.pick_count
            );
            tracing::warn!(
                min_domains = params.min_distinct_domains,
                pick_count = params.pick_count,
                eligible = eligible.len(),
                "{note}"
            );
            notes.push(note);
        }
    }

    picked.sort_unstable();
    let picks: Vec<RankedCandidate> = picked.iter().map(|i| eligible[*i].clone()).collect();

    let shortfall = params.pick_count.saturating_sub(picks.len());
    if shortfall > 0 {
        let note = if eligible.is_empty() {
            format!(
                "no eligible pro-moves ({} candidates, {} cooling down)",
                ranked.len(),
                cooling_down
            )
        } else {
            format!(
                "only {} eligible pro-moves; returning {} of {} picks",
                eligible.len(),
                picks.len(),
                params.pick_count
            )
        };
        tracing::warn!(
            eligible = eligible.len(),
            cooling_down,
            shortfall,
            "{note}"
        );
        notes.push(note);
    }

    Selection {
        picks,
        eligible: eligible.len(),
        cooling_down,
        relaxed,
        shortfall,
        notes,
    }
}
