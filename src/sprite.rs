//! Particle sprite frames and the per-colour tint cache.
//!
//! A sprite set is [`FRAME_COUNT`] frames running from a fresh, bright spark
//! down to a burnt-out ember. Frames are tinted toward a charge colour with a
//! multiply blend; each colour is tinted once and shared by every particle
//! that carries it.

use crate::color::Rgb;
use std::collections::HashMap;
use std::rc::Rc;

pub const FRAME_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    pub color: Rgb,
    /// Fraction of the particle's sprite size this frame covers.
    pub scale: f64,
    /// Glow intensity fed to the canvas before alpha is applied.
    pub glow: f32,
}

#[rustfmt::skip]
const BASE_FRAMES: [SpriteFrame; FRAME_COUNT] = [
    SpriteFrame { color: Rgb(255, 255, 255), scale: 1.0, glow: 2.6 },
    SpriteFrame { color: Rgb(238, 238, 238), scale: 0.9, glow: 2.2 },
    SpriteFrame { color: Rgb(212, 212, 212), scale: 0.8, glow: 1.9 },
    SpriteFrame { color: Rgb(178, 178, 178), scale: 0.65, glow: 1.5 },
    SpriteFrame { color: Rgb(138, 138, 138), scale: 0.5, glow: 1.1 },
    SpriteFrame { color: Rgb(96, 96, 96), scale: 0.35, glow: 0.7 },
];

/// Frame for a `[0, 1]` progress value: `floor(p * (FRAME_COUNT - 1))`.
pub fn progress_frame(progress: f64) -> usize {
    (progress.clamp(0.0, 1.0) * (FRAME_COUNT - 1) as f64).floor() as usize
}

pub fn random_frame(rng: &mut fastrand::Rng) -> usize {
    rng.usize(0..FRAME_COUNT)
}

#[derive(Debug, Default)]
pub struct SpriteAtlas {
    tinted: HashMap<Rgb, Rc<[SpriteFrame]>>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames tinted for `color`, built on first request.
    pub fn frames(&mut self, color: Rgb) -> Rc<[SpriteFrame]> {
        self.tinted
            .entry(color)
            .or_insert_with(|| tint_frames(color))
            .clone()
    }

    pub fn cached_colors(&self) -> usize {
        self.tinted.len()
    }
}

fn tint_frames(color: Rgb) -> Rc<[SpriteFrame]> {
    if color == Rgb::WHITE {
        return Rc::from(BASE_FRAMES.as_slice());
    }
    BASE_FRAMES
        .iter()
        .map(|frame| SpriteFrame {
            color: frame.color.multiply(color),
            ..*frame
        })
        .collect()
}
