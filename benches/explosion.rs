//! Benchmarks for charge generation and particle stepping
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fireworks::pattern;
use fireworks::{Charge, EffectKind, Firework, PatternKind, RadialParams, Rgb};
use glam::DVec2;

/// Pattern generation runs once per charge, all inside the explosion frame.
fn bench_generate(c: &mut Criterion) {
    let patterns = [
        ("normal", PatternKind::Radial(RadialParams::NORMAL)),
        ("fire_charge", PatternKind::Radial(RadialParams::FIRE_CHARGE)),
        ("star", PatternKind::StarOutline),
        ("creeper", PatternKind::CreeperSilhouette),
    ];

    let mut group = c.benchmark_group("generate");
    let mut rng = fastrand::Rng::with_seed(1);

    for (name, kind) in patterns {
        let charge = Charge::new(kind, EffectKind::Trail, Rgb::RED);
        group.bench_with_input(BenchmarkId::from_parameter(name), &charge, |b, charge| {
            b.iter(|| pattern::generate(black_box(charge), DVec2::ZERO, 5.0, &mut rng))
        });
    }

    group.finish();
}

/// One 60 Hz step of a firework shortly after it burst, with trails on.
///
/// This is the heaviest frame of a show: every particle spawns trail points.
fn bench_burst_step(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(2);
    let mut burst = Firework::new(
        DVec2::new(400.0, 500.0),
        5.0,
        0.0,
        vec![
            Charge::new(
                PatternKind::Radial(RadialParams::FIRE_CHARGE),
                EffectKind::TrailTwinkle,
                Rgb::RED,
            ),
            Charge::new(PatternKind::StarOutline, EffectKind::Trail, Rgb::YELLOW),
        ],
    );
    for _ in 0..10 {
        burst.update(1.0 / 60.0, &mut rng);
    }

    let mut group = c.benchmark_group("burst_step");
    group.throughput(Throughput::Elements(burst.particles().len() as u64));
    group.bench_function("trail_twinkle", |b| {
        b.iter_batched(
            || burst.clone(),
            |mut fw| {
                fw.update(black_box(1.0 / 60.0), &mut rng);
                fw
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_generate, bench_burst_step);
criterion_main!(benches);
