//! Firework simulation: a rocket climbs, bursts into one or more charges,
//! and each charge throws out a particle pattern that falls, drags, trails
//! and fades.
//!
//! The simulation core ([`firework`], [`pattern`], [`particle`], [`trail`])
//! is frame-stepped and single-threaded; all randomness comes from a
//! caller-owned [`fastrand::Rng`], so a seeded generator replays a show
//! exactly. [`render`] and [`show`] turn that state into a terminal
//! animation.

pub mod charge;
pub mod color;
pub mod config;
pub mod error;
pub mod firework;
pub mod particle;
pub mod pattern;
pub mod render;
pub mod show;
pub mod sprite;
pub mod trail;

pub use charge::{Charge, EffectKind, PatternKind, RadialParams};
pub use color::Rgb;
pub use error::{Error, Result};
pub use firework::{Firework, FireworkState};
pub use particle::Particle;
pub use trail::TrailParticle;
