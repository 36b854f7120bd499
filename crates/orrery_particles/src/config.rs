//! Per-kind particle buffer configuration
//!
//! Colors are packed `0xRRGGBB` values. Option payloads are merged over
//! each kind's defaults, and a buffer's config never changes after creation.

use glam::Vec3;
use orrery_core::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background star field with optional twinkle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StarsConfig {
    pub count: usize,
    pub size: f32,
    /// Tint applied over the per-star blue-white base
    pub color: u32,
    /// Side of the cube the stars are scattered in
    pub spread: f32,
    pub twinkle: bool,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 2.0,
            color: 0xffffff,
            spread: 100.0,
            twinkle: true,
        }
    }
}

/// Looping column of rising embers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FireConfig {
    pub position: Vec3,
    pub count: usize,
    pub size: f32,
    /// Rise before an ember restarts from its base
    pub height: f32,
    pub spread: f32,
    pub intensity: f32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            count: 200,
            size: 0.5,
            height: 3.0,
            spread: 1.0,
            intensity: 1.0,
        }
    }
}

/// Drifting, pulsing sparkles in a sphere
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MagicConfig {
    pub position: Vec3,
    pub count: usize,
    pub size: f32,
    pub colors: Vec<u32>,
    /// Sphere radius
    pub spread: f32,
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            count: 100,
            size: 0.3,
            colors: vec![0xff00ff, 0x00ffff, 0xffff00],
            spread: 5.0,
        }
    }
}

/// Endless snowfall inside a cube of side `area`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SnowConfig {
    pub count: usize,
    pub size: f32,
    pub area: f32,
    pub fall_speed: f32,
    pub wind_strength: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 500,
            size: 0.2,
            area: 50.0,
            fall_speed: 1.0,
            wind_strength: 0.5,
        }
    }
}

/// One-shot radial burst that removes itself after `duration` seconds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ExplosionConfig {
    pub position: Vec3,
    pub count: usize,
    pub size: f32,
    pub speed: f32,
    pub duration: f32,
    pub colors: Vec<u32>,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            count: 300,
            size: 0.4,
            speed: 5.0,
            duration: 3.0,
            colors: vec![0xff4500, 0xff6600, 0xffaa00, 0xffffff],
        }
    }
}

/// Particle effect kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Stars,
    Fire,
    Magic,
    Snow,
    Explosion,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 5] = [
        ParticleKind::Stars,
        ParticleKind::Fire,
        ParticleKind::Magic,
        ParticleKind::Snow,
        ParticleKind::Explosion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Stars => "stars",
            ParticleKind::Fire => "fire",
            ParticleKind::Magic => "magic",
            ParticleKind::Snow => "snow",
            ParticleKind::Explosion => "explosion",
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParticleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        ParticleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| ConfigError::UnknownParticleType(s.to_string()))
    }
}

/// Typed configuration for one particle buffer
#[derive(Clone, Debug, PartialEq)]
pub enum ParticleConfig {
    Stars(StarsConfig),
    Fire(FireConfig),
    Magic(MagicConfig),
    Snow(SnowConfig),
    Explosion(ExplosionConfig),
}

impl ParticleConfig {
    pub fn default_for(kind: ParticleKind) -> Self {
        match kind {
            ParticleKind::Stars => ParticleConfig::Stars(StarsConfig::default()),
            ParticleKind::Fire => ParticleConfig::Fire(FireConfig::default()),
            ParticleKind::Magic => ParticleConfig::Magic(MagicConfig::default()),
            ParticleKind::Snow => ParticleConfig::Snow(SnowConfig::default()),
            ParticleKind::Explosion => ParticleConfig::Explosion(ExplosionConfig::default()),
        }
    }

    /// Decode a kind name plus a partial options object; `null` selects the defaults
    pub fn from_json(kind: &str, options: serde_json::Value) -> Result<Self> {
        let kind: ParticleKind = kind.parse()?;
        let config = match kind {
            ParticleKind::Stars => ParticleConfig::Stars(decode(kind, options)?),
            ParticleKind::Fire => ParticleConfig::Fire(decode(kind, options)?),
            ParticleKind::Magic => ParticleConfig::Magic(decode(kind, options)?),
            ParticleKind::Snow => ParticleConfig::Snow(decode(kind, options)?),
            ParticleKind::Explosion => ParticleConfig::Explosion(decode(kind, options)?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn kind(&self) -> ParticleKind {
        match self {
            ParticleConfig::Stars(_) => ParticleKind::Stars,
            ParticleConfig::Fire(_) => ParticleKind::Fire,
            ParticleConfig::Magic(_) => ParticleKind::Magic,
            ParticleConfig::Snow(_) => ParticleKind::Snow,
            ParticleConfig::Explosion(_) => ParticleKind::Explosion,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            ParticleConfig::Stars(c) => c.count,
            ParticleConfig::Fire(c) => c.count,
            ParticleConfig::Magic(c) => c.count,
            ParticleConfig::Snow(c) => c.count,
            ParticleConfig::Explosion(c) => c.count,
        }
    }

    /// Lifetime in seconds for buffers that remove themselves
    pub fn lifetime(&self) -> Option<f32> {
        match self {
            ParticleConfig::Explosion(c) => Some(c.duration),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ParticleConfig::Stars(c) => {
                non_negative("size", c.size)?;
                non_negative("spread", c.spread)
            }
            ParticleConfig::Fire(c) => {
                finite_vec("position", c.position)?;
                non_negative("size", c.size)?;
                non_negative("spread", c.spread)?;
                non_negative("intensity", c.intensity)?;
                positive("height", c.height)
            }
            ParticleConfig::Magic(c) => {
                finite_vec("position", c.position)?;
                non_negative("size", c.size)?;
                non_negative("spread", c.spread)?;
                palette("colors", &c.colors)
            }
            ParticleConfig::Snow(c) => {
                non_negative("size", c.size)?;
                positive("area", c.area)?;
                finite("fallSpeed", c.fall_speed)?;
                finite("windStrength", c.wind_strength)
            }
            ParticleConfig::Explosion(c) => {
                finite_vec("position", c.position)?;
                non_negative("size", c.size)?;
                finite("speed", c.speed)?;
                positive("duration", c.duration)?;
                palette("colors", &c.colors)
            }
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid_value(field, "must not be negative"));
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::invalid_value(field, "must be positive"));
    }
    Ok(())
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(field, "must be finite"))
    }
}

fn palette(field: &'static str, colors: &[u32]) -> Result<()> {
    if colors.is_empty() {
        return Err(ConfigError::invalid_value(field, "palette is empty"));
    }
    Ok(())
}

fn decode<T: DeserializeOwned + Default>(kind: ParticleKind, options: serde_json::Value) -> Result<T> {
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options).map_err(|e| ConfigError::InvalidOptions {
        kind: kind.to_string(),
        message: e.to_string(),
    })
}

macro_rules! impl_from_config {
    ($($variant:ident => $config:ty),* $(,)?) => {
        $(
            impl From<$config> for ParticleConfig {
                fn from(config: $config) -> Self {
                    ParticleConfig::$variant(config)
                }
            }
        )*
    };
}

impl_from_config! {
    Stars => StarsConfig,
    Fire => FireConfig,
    Magic => MagicConfig,
    Snow => SnowConfig,
    Explosion => ExplosionConfig,
}
