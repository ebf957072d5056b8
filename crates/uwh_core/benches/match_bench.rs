use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use uwh_core::{run_headless, Match, MatchPhase, RunnerOptions, SimConfig};

fn running_match(seed: u64) -> Match {
    let mut config = SimConfig::default();
    config.rules.countdown_seconds = 0;
    Match::new(config, seed).expect("default config is valid")
}

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.bench_function("single_tick", |b| {
        b.iter_batched(
            || running_match(42),
            |mut game| black_box(game.tick()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("one_minute", |b| {
        b.iter_batched(
            || running_match(42),
            |mut game| {
                for _ in 0..60 * 60 {
                    if game.phase() == MatchPhase::Paused {
                        let _ = game.continue_after_goal();
                    }
                    game.tick();
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_headless(c: &mut Criterion) {
    c.bench_function("headless_30s", |b| {
        b.iter(|| {
            let options = RunnerOptions { running_seconds: 30, ..RunnerOptions::default() };
            black_box(run_headless(running_match(7), options).expect("headless run"))
        })
    });
}

criterion_group!(benches, bench_ticks, bench_headless);
criterion_main!(benches);
