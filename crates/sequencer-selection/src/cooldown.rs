use sequencer_core::models::RankedCandidate;

/// Whether a candidate has rested long enough to be picked again.
pub fn is_eligible(candidate: &RankedCandidate, cooldown_weeks: u32) -> bool {
    candidate.weeks_since_seen >= cooldown_weeks
}

/// Candidates past their cooldown, in their original rank order.
pub fn eligible(ranked: &[RankedCandidate], cooldown_weeks: u32) -> Vec<&RankedCandidate> {
    ranked
        .iter()
        .filter(|c| is_eligible(c, cooldown_weeks))
        .collect()
}
