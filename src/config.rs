//! Show configuration loaded from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! built-in show: one rocket from the bottom centre of an 800×600 sky that
//! bursts into a trailing fire charge and a twinkling star. See
//! `assets/show.toml` for a commented example.

use crate::charge::{Charge, EffectKind, PatternKind, RadialParams};
use crate::color::Rgb;
use crate::firework::Firework;
use crate::{Error, Result};
use glam::DVec2;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    pub background: Option<Rgb>,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Stop once the first firework has burnt out instead of relaunching.
    pub once: bool,
    pub sky: SkyConfig,
    pub firework: FireworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FireworkConfig {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub flight_duration: f64,
    pub charges: Vec<ChargeConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternName {
    Normal,
    FireCharge,
    Burst,
    Star,
    Creeper,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChargeConfig {
    pub pattern: PatternName,
    #[serde(default)]
    pub effect: EffectKind,
    pub color: Rgb,
    // Radial overrides
    pub count: Option<usize>,
    pub speed_min: Option<f64>,
    pub speed_max: Option<f64>,
    pub lifespan_center: Option<f64>,
    pub speed_multiplier: Option<f64>,
}

/// A validated firework template the show can launch any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    pub origin: DVec2,
    pub size: f64,
    pub flight_duration: f64,
    pub charges: Vec<Charge>,
}

impl LaunchPlan {
    pub fn launch(&self) -> Firework {
        Firework::new(
            self.origin,
            self.size,
            self.flight_duration,
            self.charges.clone(),
        )
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            background: None,
            seed: None,
            once: false,
            sky: SkyConfig::default(),
            firework: FireworkConfig::default(),
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for FireworkConfig {
    fn default() -> Self {
        Self {
            x: 400.0,
            y: 500.0,
            size: 5.0,
            flight_duration: 1.0,
            charges: vec![
                ChargeConfig::preset(PatternName::FireCharge, EffectKind::Trail, Rgb::RED),
                ChargeConfig::preset(PatternName::Star, EffectKind::Twinkle, Rgb::YELLOW),
            ],
        }
    }
}

impl ShowConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ShowConfig = toml::from_str(text)?;
        config.sky.validate()?;
        Ok(config)
    }

    pub fn background(&self) -> Rgb {
        self.background.unwrap_or(Rgb::NIGHT)
    }
}

impl SkyConfig {
    fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "sky must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl FireworkConfig {
    pub fn plan(&self) -> Result<LaunchPlan> {
        if !(self.size >= 0.0) {
            return Err(Error::InvalidConfig(format!("negative firework size {}", self.size)));
        }
        if !(self.flight_duration >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "negative flight duration {}",
                self.flight_duration
            )));
        }
        if self.charges.is_empty() {
            return Err(Error::InvalidConfig("firework has no charges".to_string()));
        }

        let charges = self
            .charges
            .iter()
            .map(ChargeConfig::charge)
            .collect::<Result<Vec<_>>>()?;

        Ok(LaunchPlan {
            origin: DVec2::new(self.x, self.y),
            size: self.size,
            flight_duration: self.flight_duration,
            charges,
        })
    }
}

impl ChargeConfig {
    pub fn preset(pattern: PatternName, effect: EffectKind, color: Rgb) -> Self {
        Self {
            pattern,
            effect,
            color,
            count: None,
            speed_min: None,
            speed_max: None,
            lifespan_center: None,
            speed_multiplier: None,
        }
    }

    pub fn charge(&self) -> Result<Charge> {
        let pattern = match self.pattern {
            PatternName::Normal | PatternName::Burst => {
                PatternKind::Radial(self.radial(RadialParams::NORMAL)?)
            }
            PatternName::FireCharge => PatternKind::Radial(self.radial(RadialParams::FIRE_CHARGE)?),
            PatternName::Star => {
                self.reject_radial_overrides("star")?;
                PatternKind::StarOutline
            }
            PatternName::Creeper => {
                self.reject_radial_overrides("creeper")?;
                PatternKind::CreeperSilhouette
            }
        };
        Ok(Charge::new(pattern, self.effect, self.color))
    }

    fn reject_radial_overrides(&self, pattern: &str) -> Result<()> {
        let overrides = [
            ("count", self.count.is_some()),
            ("speed_min", self.speed_min.is_some()),
            ("speed_max", self.speed_max.is_some()),
            ("lifespan_center", self.lifespan_center.is_some()),
            ("speed_multiplier", self.speed_multiplier.is_some()),
        ];
        match overrides.iter().find(|(_, set)| *set) {
            Some((key, _)) => Err(Error::InvalidConfig(format!(
                "`{key}` only applies to radial charges, not {pattern}"
            ))),
            None => Ok(()),
        }
    }

    fn radial(&self, base: RadialParams) -> Result<RadialParams> {
        let params = RadialParams {
            count: self.count.unwrap_or(base.count),
            speed_min: self.speed_min.unwrap_or(base.speed_min),
            speed_max: self.speed_max.unwrap_or(base.speed_max),
            lifespan_center: self.lifespan_center.unwrap_or(base.lifespan_center),
            speed_multiplier: self.speed_multiplier.unwrap_or(base.speed_multiplier),
        };

        if params.count == 0 {
            return Err(Error::InvalidConfig("radial charge with zero particles".to_string()));
        }
        if !(params.speed_min >= 0.0 && params.speed_min <= params.speed_max) {
            return Err(Error::InvalidConfig(format!(
                "radial speed range {}..{} is empty or negative",
                params.speed_min, params.speed_max
            )));
        }
        // lifespans are drawn from center ± 0.5 and must stay positive
        if !(params.lifespan_center > 0.5) {
            return Err(Error::InvalidConfig(format!(
                "radial lifespan_center {} must exceed 0.5",
                params.lifespan_center
            )));
        }
        if !(params.speed_multiplier >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "negative speed multiplier {}",
                params.speed_multiplier
            )));
        }
        Ok(params)
    }
}
