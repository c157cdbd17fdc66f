use crate::charge::{Charge, EffectKind};
use crate::color::Rgb;
use crate::particle::Particle;
use crate::pattern::{self, uniform};
use glam::DVec2;
use tracing::debug;

const ASCENT_SPEED: f64 = 300.0;
const SPARK_RATE: f64 = 30.0;
const SPARK_OFFSET_Y: f64 = 16.0;
const SPARK_LIFESPAN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkState {
    Ascending,
    Exploded,
}

/// A rocket that climbs for `flight_duration` seconds, then bursts into
/// every charge it carries. It keeps simulating its particles until the
/// owner drops it.
#[derive(Debug, Clone)]
pub struct Firework {
    position: DVec2,
    size: f64,
    flight_duration: f64,
    age: f64,
    charges: Vec<Charge>,
    particles: Vec<Particle>,
    has_exploded: bool,
}

impl Firework {
    pub fn new(origin: DVec2, size: f64, flight_duration: f64, charges: Vec<Charge>) -> Self {
        Self {
            position: origin,
            size,
            flight_duration,
            age: 0.0,
            charges,
            particles: Vec::new(),
            has_exploded: false,
        }
    }

    pub fn update(&mut self, dt: f64, rng: &mut fastrand::Rng) {
        if !self.has_exploded {
            if self.age >= self.flight_duration {
                self.explode(rng);
            } else {
                self.ascend(dt, rng);
            }
        }
        self.age += dt;

        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(|particle| !particle.is_expired());
    }

    fn ascend(&mut self, dt: f64, rng: &mut fastrand::Rng) {
        self.position.y -= dt * ASCENT_SPEED;

        if rng.f64() < dt * SPARK_RATE {
            let spark = Particle::new(
                DVec2::new(self.position.x, self.position.y + SPARK_OFFSET_Y),
                DVec2::new(uniform(rng, -40.0, 40.0), uniform(rng, -10.0, 0.0)),
                self.size,
                SPARK_LIFESPAN,
                Rgb::WHITE,
            )
            .with_effect(EffectKind::None);
            self.particles.push(spark);
        }
    }

    fn explode(&mut self, rng: &mut fastrand::Rng) {
        self.has_exploded = true;

        let before = self.particles.len();
        for charge in &self.charges {
            self.particles
                .extend(pattern::generate(charge, self.position, self.size, rng));
        }
        debug!(
            charges = self.charges.len(),
            particles = self.particles.len() - before,
            x = self.position.x,
            y = self.position.y,
            "firework exploded"
        );
    }

    pub fn state(&self) -> FireworkState {
        if self.has_exploded {
            FireworkState::Exploded
        } else {
            FireworkState::Ascending
        }
    }

    pub fn has_exploded(&self) -> bool {
        self.has_exploded
    }

    /// Exploded and every particle (and with it every trail) has burnt out.
    pub fn is_spent(&self) -> bool {
        self.has_exploded && self.particles.is_empty()
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
