use crate::color::Rgb;
use serde::Deserialize;

/// Parameters of a radial burst: `count` particles fired in uniformly random
/// directions at `[speed_min, speed_max] * speed_multiplier`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialParams {
    pub count: usize,
    pub speed_min: f64,
    pub speed_max: f64,
    /// Lifespans are drawn from `lifespan_center ± 0.5`.
    pub lifespan_center: f64,
    pub speed_multiplier: f64,
}

impl RadialParams {
    pub const NORMAL: RadialParams = RadialParams {
        count: 100,
        speed_min: 50.0,
        speed_max: 250.0,
        lifespan_center: 1.0,
        speed_multiplier: 1.0,
    };

    pub const FIRE_CHARGE: RadialParams = RadialParams {
        count: 200,
        speed_min: 50.0,
        speed_max: 250.0,
        lifespan_center: 1.5,
        speed_multiplier: 1.5,
    };

    pub fn speed_range(&self) -> (f64, f64) {
        (
            self.speed_min * self.speed_multiplier,
            self.speed_max * self.speed_multiplier,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternKind {
    Radial(RadialParams),
    StarOutline,
    CreeperSilhouette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    #[default]
    None,
    Trail,
    Twinkle,
    TrailTwinkle,
}

impl EffectKind {
    pub fn has_trail(self) -> bool {
        matches!(self, EffectKind::Trail | EffectKind::TrailTwinkle)
    }

    pub fn has_twinkle(self) -> bool {
        matches!(self, EffectKind::Twinkle | EffectKind::TrailTwinkle)
    }
}

/// One explosion of a firework: what shape it makes, how its particles
/// shimmer, and what colour they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub pattern: PatternKind,
    pub effect: EffectKind,
    pub color: Rgb,
}

impl Charge {
    pub fn new(pattern: PatternKind, effect: EffectKind, color: Rgb) -> Self {
        Self {
            pattern,
            effect,
            color,
        }
    }
}
