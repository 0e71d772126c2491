//! Criterion benches for the visibility sweep.
//!
//! Occluder fields are random segments around the viewpoint; sizes 4 (one
//! round's region), 8 (full round) and 64 (stress).

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use sightline::api::{
    compute_visibility_polygon, Piece, Point, ReplayToken, Segment, VisibilityConfig,
};

fn random_segments(n: usize, seed: u64) -> Vec<Segment> {
    let mut rng = ReplayToken::new(seed, n as u64).to_std_rng();
    (0..n)
        .map(|_| {
            let a = Point::new(rng.gen_range(-300.0..300.0), rng.gen_range(-300.0..300.0));
            let d = Point::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            Segment::new(a, a + d)
        })
        .collect()
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility");
    let piece = Piece::new(Point::zeros(), 0.3);
    for (label, cfg) in [
        ("20deg", VisibilityConfig::default()),
        (
            "full",
            VisibilityConfig {
                half_aperture: std::f64::consts::PI,
                ..VisibilityConfig::default()
            },
        ),
    ] {
        for n in [4usize, 8, 64] {
            let segs = random_segments(n, 11);
            group.bench_with_input(BenchmarkId::new(label, n), &segs, |b, segs| {
                b.iter(|| compute_visibility_polygon(&piece, segs, &cfg).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_sees(c: &mut Criterion) {
    let piece = Piece::new(Point::zeros(), 0.0);
    let cfg = VisibilityConfig::default();
    let segs = random_segments(8, 3);
    c.bench_function("sees/8", |b| {
        b.iter(|| piece.sees(Point::new(250.0, 30.0), &segs, &cfg).unwrap())
    });
}

criterion_group!(benches, bench_sweep, bench_sees);
criterion_main!(benches);
