use crate::color::Rgb;
use crate::sprite::{progress_frame, random_frame};
use glam::DVec2;

pub const TRAIL_LIFESPAN: f64 = 0.12;

// Below this fade a trail point is too faint to be worth drawing
const VISIBLE_FADE: f64 = 0.01;

/// A frozen echo of a particle's past position. It never moves; it only
/// ages and fades out.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailParticle {
    position: DVec2,
    lifespan: f64,
    age: f64,
    color: Rgb,
    size: f64,
    twinkle: bool,
}

impl TrailParticle {
    pub fn new(position: DVec2, color: Rgb, size: f64, twinkle: bool) -> Self {
        Self {
            position,
            lifespan: TRAIL_LIFESPAN,
            age: 0.0,
            color,
            size,
            twinkle,
        }
    }

    /// Ages the point and reports whether it is still alive.
    pub fn update(&mut self, dt: f64) -> bool {
        self.age += dt;
        self.age < self.lifespan
    }

    pub fn fade(&self) -> f64 {
        (1.0 - self.age / self.lifespan).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.fade() > VISIBLE_FADE
    }

    pub fn draw_size(&self) -> f64 {
        (self.size * self.fade()).max(2.0)
    }

    /// Quadratic fade so the tail end vanishes quickly.
    pub fn alpha(&self) -> u8 {
        let f = self.fade();
        (255.0 * f * f).round() as u8
    }

    pub fn frame_index(&self, rng: &mut fastrand::Rng) -> usize {
        if self.twinkle {
            random_frame(rng)
        } else {
            progress_frame(1.0 - self.fade())
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }
}
