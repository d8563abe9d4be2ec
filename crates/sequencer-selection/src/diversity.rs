use std::collections::BTreeSet;

use sequencer_core::models::RankedCandidate;

/// Greedy first-fit walk over the eligible list.
///
/// The first candidate is always taken. Later candidates from an already
/// represented domain are skipped only while fewer than `min_domains`
/// distinct domains have been picked. Returns indices into `eligible` in
/// walk order.
pub fn greedy_walk(eligible: &[&RankedCandidate], pick_count: usize, min_domains: usize) -> Vec<usize> {
    let mut picks = Vec::with_capacity(pick_count);
    let mut domains = BTreeSet::new();
    let mut ids = BTreeSet::new();

    for (idx, candidate) in eligible.iter().enumerate() {
        if picks.len() >= pick_count {
            break;
        }
        if ids.contains(&candidate.pro_move_id) {
            continue;
        }
        let quota_met = domains.len() >= min_domains;
        if !picks.is_empty() && !quota_met && domains.contains(&candidate.domain_id) {
            continue;
        }
        picks.push(idx);
        domains.insert(candidate.domain_id);
        ids.insert(candidate.pro_move_id);
    }

    picks
}

/// Distinct domains spanned by a set of candidates.
pub fn distinct_domains<'a, I>(candidates: I) -> usize
where
    I: IntoIterator<Item = &'a RankedCandidate>,
{
    candidates
        .into_iter()
        .map(|c| c.domain_id)
        .collect::<BTreeSet<_>>()
        .len()
}
