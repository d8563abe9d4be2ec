use criterion::{criterion_group, criterion_main, Criterion};
use sequencer_core::config::SequencerConfig;
use sequencer_core::models::{HistorySnapshot, ProMove};
use sequencer_scoring::FeatureScorer;
use test_fixtures::{date, flat_history, pro_move};

fn bench_rank(c: &mut Criterion) {
    let reference = date(2025, 6, 2);
    let moves: Vec<ProMove> = (1..=200).map(|i| pro_move(i, i % 8)).collect();
    let mut snapshot = HistorySnapshot::default();
    for m in &moves {
        let avg = (m.id % 10) as f64 / 10.0;
        snapshot
            .confidence
            .insert(m.id, flat_history(reference, 18, avg, 12));
        snapshot.eval_scores.insert(m.competency_id, avg / 2.0);
    }
    let scorer = FeatureScorer::from_config(&SequencerConfig::default());

    c.bench_function("rank_200_moves_18_weeks", |b| {
        b.iter(|| scorer.rank(&moves, &snapshot, reference))
    });
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
