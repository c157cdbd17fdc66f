//! Charge pattern generation.
//!
//! Every pattern returns freshly launched particles at the explosion origin.
//! Radial bursts scatter particles in random directions. The outline
//! patterns fire each particle at a velocity proportional to its target
//! offset, so the cloud briefly "draws" the shape before drag and gravity
//! pull it apart; `SHAPE_SPEED_FACTOR` and `SHAPE_DURATION` are tuned as a
//! pair.

use crate::charge::{Charge, PatternKind, RadialParams};
use crate::particle::Particle;
use glam::DVec2;
use std::f64::consts::{PI, TAU};

const EXPLOSION_GRAVITY: f64 = 1.0;

const SHAPE_SPEED_FACTOR: f64 = 4.0;
const SHAPE_DURATION: f64 = 1.0;
const SHAPE_LIFESPAN_SPREAD: f64 = 0.15;
const FALLBACK_SPEED: f64 = 10.0;

const STAR_RADIUS: f64 = 80.0;
const STAR_INNER_RATIO: f64 = 0.4;
const STAR_VERTICES: usize = 10;
const STAR_PARTICLES_PER_EDGE: usize = 15;
const STAR_JITTER: f64 = 3.0;

const CREEPER_SCALE: f64 = 12.0;
const CREEPER_ASPECT: f64 = 1.1;
const CREEPER_CENTER: (f64, f64) = (8.0, 8.0);
const CREEPER_PARTICLES_PER_CELL: usize = 3;
const CREEPER_JITTER: f64 = 4.0;

// Outlined creeper face, '#' cells emit particles
const CREEPER: [&[u8; 16]; 12] = [
    b"################",
    b"#..............#",
    b"#.####....####.#",
    b"#.#..#....#..#.#",
    b"#.####....####.#",
    b"#.....####.....#",
    b"#...###..###...#",
    b"#...#......#...#",
    b"#...#......#...#",
    b"#...#.####.#...#",
    b"#...###..###...#",
    b"################",
];

pub fn generate(
    charge: &Charge,
    origin: DVec2,
    base_size: f64,
    rng: &mut fastrand::Rng,
) -> Vec<Particle> {
    let launches = match charge.pattern {
        PatternKind::Radial(params) => radial(&params, rng),
        PatternKind::StarOutline => star_outline(rng),
        PatternKind::CreeperSilhouette => creeper_silhouette(rng),
    };

    launches
        .into_iter()
        .map(|(velocity, lifespan)| {
            Particle::new(origin, velocity, base_size, lifespan, charge.color)
                .with_gravity(EXPLOSION_GRAVITY)
                .with_effect(charge.effect)
        })
        .collect()
}

pub(crate) fn uniform(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

fn radial(params: &RadialParams, rng: &mut fastrand::Rng) -> Vec<(DVec2, f64)> {
    let (speed_min, speed_max) = params.speed_range();
    (0..params.count)
        .map(|_| {
            let angle = rng.f64() * TAU;
            let speed = uniform(rng, speed_min, speed_max);
            let lifespan = uniform(
                rng,
                params.lifespan_center - 0.5,
                params.lifespan_center + 0.5,
            );
            (DVec2::from_angle(angle) * speed, lifespan)
        })
        .collect()
}

fn star_outline(rng: &mut fastrand::Rng) -> Vec<(DVec2, f64)> {
    let vertices: Vec<DVec2> = (0..STAR_VERTICES)
        .map(|i| {
            let angle = i as f64 * PI / 5.0 - PI / 2.0;
            let radius = if i % 2 == 0 {
                STAR_RADIUS
            } else {
                STAR_RADIUS * STAR_INNER_RATIO
            };
            DVec2::from_angle(angle) * radius
        })
        .collect();

    let mut launches = Vec::with_capacity(STAR_VERTICES * STAR_PARTICLES_PER_EDGE);
    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % STAR_VERTICES];
        for j in 0..STAR_PARTICLES_PER_EDGE {
            let t = j as f64 / (STAR_PARTICLES_PER_EDGE - 1) as f64;
            let target = start.lerp(end, t) + jitter(rng, STAR_JITTER);
            launches.push(ballistic_launch(target, rng));
        }
    }
    launches
}

fn creeper_silhouette(rng: &mut fastrand::Rng) -> Vec<(DVec2, f64)> {
    let mut launches = Vec::with_capacity(creeper_cell_count() * CREEPER_PARTICLES_PER_CELL);
    for (row, line) in CREEPER.iter().enumerate() {
        for (col, &cell) in line.iter().enumerate() {
            if cell != b'#' {
                continue;
            }
            let anchor = DVec2::new(
                (col as f64 - CREEPER_CENTER.0) * CREEPER_SCALE,
                (row as f64 - CREEPER_CENTER.1) * CREEPER_SCALE * CREEPER_ASPECT,
            );
            for _ in 0..CREEPER_PARTICLES_PER_CELL {
                let target = anchor + jitter(rng, CREEPER_JITTER);
                launches.push(ballistic_launch(target, rng));
            }
        }
    }
    launches
}

/// Number of lit cells in the creeper bitmap.
pub fn creeper_cell_count() -> usize {
    CREEPER
        .iter()
        .map(|line| line.iter().filter(|&&cell| cell == b'#').count())
        .sum()
}

fn jitter(rng: &mut fastrand::Rng, amount: f64) -> DVec2 {
    DVec2::new(uniform(rng, -amount, amount), uniform(rng, -amount, amount))
}

/// Velocity that carries a particle toward `target` (an offset from the
/// origin), plus a lifespan tied to the shape's hold time.
fn ballistic_launch(target: DVec2, rng: &mut fastrand::Rng) -> (DVec2, f64) {
    let distance = target.length();
    let velocity = if distance > 1e-6 {
        target / distance * (distance * SHAPE_SPEED_FACTOR)
    } else {
        jitter(rng, FALLBACK_SPEED)
    };
    let lifespan = uniform(rng, SHAPE_DURATION - SHAPE_LIFESPAN_SPREAD, SHAPE_DURATION);
    (velocity, lifespan)
}
