use crate::charge::EffectKind;
use crate::color::Rgb;
use crate::sprite::{progress_frame, random_frame};
use crate::trail::TrailParticle;
use glam::DVec2;

// Gravity and drag are tuned per 60 Hz frame and scaled by dt * 60
const BASE_FPS: f64 = 60.0;
const DRAG_PER_FRAME: f64 = 0.98;

const TRAIL_INTERVAL_MIN: f64 = 0.008;
const TRAIL_INTERVAL_MAX: f64 = 0.02;

pub const DEFAULT_GRAVITY: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    color: Rgb,
    size: f64,
    lifespan: f64,
    age: f64,
    gravity: f64,
    effect: EffectKind,
    trail: Vec<TrailParticle>,
    trail_accumulator: f64,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, size: f64, lifespan: f64, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            color,
            size,
            lifespan,
            age: 0.0,
            gravity: DEFAULT_GRAVITY,
            effect: EffectKind::None,
            trail: Vec::new(),
            trail_accumulator: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_effect(mut self, effect: EffectKind) -> Self {
        self.effect = effect;
        self
    }

    pub fn update(&mut self, dt: f64) {
        let frames = dt * BASE_FPS;

        self.velocity.y += self.gravity * frames;
        self.position += self.velocity * dt;
        self.velocity *= DRAG_PER_FRAME.powf(frames);

        if self.effect.has_trail() {
            self.update_trail(dt);
        }

        self.age += dt;
    }

    fn update_trail(&mut self, dt: f64) {
        self.trail_accumulator += dt;

        if self.trail_accumulator > trail_interval(self.velocity.length()) {
            self.trail.push(TrailParticle::new(
                self.position,
                self.color,
                self.size,
                self.effect.has_twinkle(),
            ));
            self.trail_accumulator = 0.0;
        }

        self.trail.retain_mut(|point| point.update(dt));
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Sprite frame to draw: random while twinkling, otherwise age-based.
    pub fn frame_index(&self, rng: &mut fastrand::Rng) -> usize {
        if self.effect.has_twinkle() {
            random_frame(rng)
        } else {
            progress_frame(self.age / self.lifespan)
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Particles fade through their sprite frames rather than through alpha.
    pub fn alpha(&self) -> u8 {
        255
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn effect(&self) -> EffectKind {
        self.effect
    }

    pub fn trail(&self) -> &[TrailParticle] {
        &self.trail
    }
}

/// Seconds between trail points; faster particles space them further apart.
fn trail_interval(speed: f64) -> f64 {
    (0.01 + speed * 0.00001).clamp(TRAIL_INTERVAL_MIN, TRAIL_INTERVAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::FRAME_COUNT;
    use crate::trail::TRAIL_LIFESPAN;

    fn drifting(velocity: DVec2) -> Particle {
        Particle::new(DVec2::ZERO, velocity, 5.0, 10.0, Rgb::RED).with_gravity(0.0)
    }

    #[test]
    fn drag_does_not_depend_on_step_count() {
        let v0 = DVec2::new(120.0, -80.0);
        let expected = v0 * DRAG_PER_FRAME.powf(60.0 * 0.5);

        let mut coarse = drifting(v0);
        coarse.update(0.5);

        let mut fine = drifting(v0);
        for _ in 0..30 {
            fine.update(0.5 / 30.0);
        }

        let mut uneven = drifting(v0);
        for dt in [0.1, 0.05, 0.2, 0.15] {
            uneven.update(dt);
        }

        for p in [&coarse, &fine, &uneven] {
            assert!((p.velocity() - expected).length() < 1e-9, "{:?}", p.velocity());
        }
    }

    #[test]
    fn gravity_is_applied_before_moving() {
        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 5.0, 1.0, Rgb::RED).with_gravity(1.0);
        p.update(1.0 / 60.0);
        assert!((p.position().y - 1.0 / 60.0).abs() < 1e-12);
        assert!((p.velocity().y - 0.98).abs() < 1e-12);
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let mut p = drifting(DVec2::new(200.0, 10.0))
            .with_gravity(1.0)
            .with_effect(EffectKind::TrailTwinkle);
        for _ in 0..10 {
            p.update(1.0 / 60.0);
        }
        let before = p.clone();
        p.update(0.0);
        assert_eq!(p, before);
    }

    #[test]
    fn expires_once_age_reaches_lifespan() {
        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 5.0, 0.5, Rgb::WHITE);
        p.update(0.25);
        assert!(!p.is_expired());
        p.update(0.25);
        assert!(p.is_expired());
    }

    #[test]
    fn trail_only_grows_with_trail_effect() {
        let mut plain = drifting(DVec2::new(100.0, 0.0)).with_effect(EffectKind::Twinkle);
        let mut trailed = drifting(DVec2::new(100.0, 0.0)).with_effect(EffectKind::Trail);
        for _ in 0..30 {
            plain.update(1.0 / 60.0);
            trailed.update(1.0 / 60.0);
        }
        assert!(plain.trail().is_empty());
        assert!(!trailed.trail().is_empty());
    }

    #[test]
    fn trail_points_are_pruned_after_their_lifespan() {
        let mut p = drifting(DVec2::new(100.0, 0.0)).with_effect(EffectKind::Trail);
        for _ in 0..120 {
            p.update(1.0 / 60.0);
            assert!(p.trail().iter().all(|t| t.age() < TRAIL_LIFESPAN));
        }
        // at most one point per 60 Hz frame, each living 0.12 s
        assert!(p.trail().len() <= 8, "{} points", p.trail().len());
    }

    #[test]
    fn trail_points_stay_where_they_were_dropped() {
        let mut p = drifting(DVec2::new(100.0, 0.0)).with_effect(EffectKind::Trail);
        p.update(0.015);
        assert_eq!(p.trail().len(), 1);
        let dropped = p.trail()[0].position();
        p.update(0.005);
        assert_eq!(p.trail()[0].position(), dropped);
        assert!(p.position().x > dropped.x);
    }

    #[test]
    fn trail_interval_widens_with_speed_within_bounds() {
        assert!((trail_interval(0.0) - 0.01).abs() < 1e-12);
        assert!((trail_interval(500.0) - 0.015).abs() < 1e-12);
        assert_eq!(trail_interval(2_000.0), TRAIL_INTERVAL_MAX);
        assert_eq!(trail_interval(1e9), TRAIL_INTERVAL_MAX);
        for speed in [0.0, 1.0, 250.0, 999.0, 5e4] {
            let interval = trail_interval(speed);
            assert!((TRAIL_INTERVAL_MIN..=TRAIL_INTERVAL_MAX).contains(&interval));
        }
    }

    #[test]
    fn fast_particles_drop_points_less_often() {
        let step = 0.009;
        let mut slow = drifting(DVec2::new(1.0, 0.0)).with_effect(EffectKind::Trail);
        let mut fast = drifting(DVec2::new(1e5, 0.0)).with_effect(EffectKind::Trail);

        slow.update(step);
        fast.update(step);
        assert!(slow.trail().is_empty() && fast.trail().is_empty());

        // 0.018 s accumulated: past the 0.01 s interval, short of the 0.02 s cap
        slow.update(step);
        fast.update(step);
        assert_eq!(slow.trail().len(), 1);
        assert!(fast.trail().is_empty());

        fast.update(step);
        assert_eq!(fast.trail().len(), 1);
    }

    #[test]
    fn twinkling_particles_pick_random_frames() {
        let mut rng = fastrand::Rng::with_seed(12);
        let p = Particle::new(DVec2::ZERO, DVec2::ZERO, 5.0, 1.0, Rgb::RED)
            .with_effect(EffectKind::Twinkle);

        let mut seen = [false; FRAME_COUNT];
        for _ in 0..200 {
            let frame = p.frame_index(&mut rng);
            assert!(frame < FRAME_COUNT);
            seen[frame] = true;
        }
        // at age zero an age-based pick would always be frame 0
        assert!(seen.iter().filter(|&&hit| hit).count() > 1);
        assert!(seen[1..].iter().any(|&hit| hit));
    }

    #[test]
    fn frame_progresses_with_age() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 5.0, 1.0, Rgb::RED);
        assert_eq!(p.frame_index(&mut rng), 0);
        p.update(0.5);
        assert_eq!(p.frame_index(&mut rng), 2);
        p.update(0.5);
        assert_eq!(p.frame_index(&mut rng), FRAME_COUNT - 1);
    }
}
