use sequencer_core::errors::SequencerResult;
use sequencer_core::models::RankedCandidate;

/// blake3 digest of the canonical JSON encoding of a ranking.
///
/// Two rankings with equal digests are byte-identical, which is how dry-run
/// and live output are compared.
pub fn ranking_digest(ranking: &[RankedCandidate]) -> SequencerResult<String> {
    let bytes = serde_json::to_vec(ranking)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
