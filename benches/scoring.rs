use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cricket_scorer::core::{apply_action, summary_of, Match, ScoringEngine};
use cricket_scorer::types::ScoringAction;

fn twenty_overs() -> Match {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let pattern = [
        ScoringAction::Run { value: 1 },
        ScoringAction::Dot,
        ScoringAction::Run { value: 4 },
        ScoringAction::Wide,
        ScoringAction::Run { value: 2 },
        ScoringAction::Dot,
        ScoringAction::Run { value: 6 },
    ];
    let mut m = Match::new("bench", "Falcons", 20, created);
    while m.balls < 120 {
        for &action in &pattern {
            m = apply_action(&m, action);
        }
    }
    m
}

fn bench_apply(c: &mut Criterion) {
    let m = twenty_overs();

    c.bench_function("apply_run_copy", |b| {
        b.iter(|| apply_action(black_box(&m), ScoringAction::Run { value: 4 }))
    });

    let engine = ScoringEngine::default();
    let mut scratch = m.clone();
    c.bench_function("apply_then_undo_in_place", |b| {
        b.iter(|| {
            engine.apply_in_place(&mut scratch, black_box(ScoringAction::NoBall { off_bat_runs: 2 }));
            engine.apply_in_place(&mut scratch, ScoringAction::Undo);
        })
    });
}

fn bench_views(c: &mut Criterion) {
    let m = twenty_overs();

    c.bench_function("summaries_20_overs", |b| {
        b.iter(|| {
            for over in &m.overs_list {
                black_box(summary_of(over));
            }
        })
    });

    let json = serde_json::to_string(&m).unwrap_or_default();
    c.bench_function("load_20_overs", |b| {
        b.iter(|| cricket_scorer::core::match_from_str(black_box(&json)))
    });
}

criterion_group!(benches, bench_apply, bench_views);
criterion_main!(benches);
