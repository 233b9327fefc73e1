//! Benchmarks for the connection pass and a full engine frame.
//!
//! Run with: `cargo bench`

use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use particle_field::connections::all_pair_links;
use particle_field::{EngineConfig, ParticleField, ProximityIndex, ProximityStrategy, RecordingCanvas};

fn random_positions(count: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Vec2::new(rng.gen::<f32>() * 1920.0, rng.gen::<f32>() * 1080.0))
        .collect()
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("links");

    for count in [60, 250, 1000, 4000] {
        let positions = random_positions(count, 1);

        group.bench_with_input(BenchmarkId::new("all_pairs", count), &positions, |b, positions| {
            let mut out = Vec::new();
            b.iter(|| {
                out.clear();
                all_pair_links(black_box(positions), 120.0, &mut out);
                black_box(out.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("grid", count), &positions, |b, positions| {
            let mut index = ProximityIndex::new(ProximityStrategy::Grid, 120.0);
            let mut out = Vec::new();
            b.iter(|| {
                index.find_links(black_box(positions), &mut out);
                black_box(out.len())
            })
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for count in [60, 500] {
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            let config = EngineConfig::default().with_seed(9).with_particle_count(count);
            let mut field = match ParticleField::new(config) {
                Ok(field) => field,
                Err(e) => panic!("invalid bench config: {}", e),
            };
            let mut canvas = RecordingCanvas::default();
            field.mount(&mut canvas, 1920, 1080);
            field.pointer_moved(960.0, 540.0);
            b.iter(|| {
                canvas.commands.clear();
                black_box(field.frame(&mut canvas, Instant::now()))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_links, bench_frame);
criterion_main!(benches);
