//! Criterion microbenches for segment-field generation.
//!
//! - `generate_segments` on a single 400×400 region (default config).
//! - `generate_round`: both regions plus kings.
//! - `place_point` against a fixed field.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sightline::api::{
    generate_round, generate_segments, place_point, LayoutCfg, PlacementConfig, Playfield, Rect,
    ReplayToken,
};

fn bench_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    let cfg = PlacementConfig::default();
    let rect = Rect::new(0.0, 0.0, 400.0, 400.0);
    group.bench_function(BenchmarkId::new("generate_segments", "4x400"), |b| {
        b.iter_batched(
            || ReplayToken::new(42, 0),
            |mut tok| {
                tok.index = tok.index.wrapping_add(1);
                let mut rng = tok.to_std_rng();
                let _ = generate_segments(&rect, &cfg, &mut rng);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("place_point", "4x400"), |b| {
        b.iter_batched(
            || {
                let mut rng = ReplayToken::new(7, 99).to_std_rng();
                let segs = generate_segments(&rect, &cfg, &mut rng).unwrap();
                (segs, rng)
            },
            |(segs, mut rng)| {
                let _ = place_point(&segs, &rect, &cfg, &mut rng);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("round");
    let cfg = PlacementConfig::default();
    let field = Playfield::new(Rect::new(0.0, 0.0, 400.0, 800.0), LayoutCfg::default()).unwrap();
    for count in [4usize, 8] {
        let cfg = PlacementConfig {
            segment_count: count,
            ..cfg.clone()
        };
        group.bench_function(BenchmarkId::new("generate_round", count), |b| {
            b.iter_batched(
                || ReplayToken::new(2025, count as u64),
                |tok| {
                    let _ = generate_round(&field, &cfg, tok);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_segments, bench_round);
criterion_main!(benches);
