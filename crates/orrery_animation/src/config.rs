//! Per-kind animation configuration
//!
//! Each config struct's `Default` holds the per-kind defaults. Partial option
//! payloads are merged over those defaults when decoded, and the resulting
//! config is immutable once registered.

use glam::Vec3;
use orrery_core::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::easing::Easing;

/// A single cartesian axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(ConfigError::UnknownAxis(s.to_string())),
        }
    }
}

/// Rotation axis; `All` spins the three Euler angles together
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    X,
    #[default]
    Y,
    Z,
    All,
}

impl FromStr for RotationAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RotationAxis::All),
            other => other.parse::<Axis>().map(RotationAxis::from),
        }
    }
}

impl From<Axis> for RotationAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => RotationAxis::X,
            Axis::Y => RotationAxis::Y,
            Axis::Z => RotationAxis::Z,
        }
    }
}

/// Continuous spin around one or all axes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RotateConfig {
    pub axis: RotationAxis,
    /// Radians per reference frame
    pub speed: f32,
    /// +1 or -1
    pub direction: f32,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            axis: RotationAxis::Y,
            speed: 0.01,
            direction: 1.0,
        }
    }
}

/// Sinusoidal bob along one axis around the captured start position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FloatConfig {
    pub amplitude: f32,
    pub frequency: f32,
    pub axis: Axis,
    pub offset: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: 1.0,
            axis: Axis::Y,
            offset: 0.0,
        }
    }
}

/// Periodic scale oscillation relative to the captured start scale
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PulseConfig {
    /// `[min, max]` scale multipliers
    pub scale: [f32; 2],
    /// Seconds per cycle
    pub duration: f32,
    pub easing: Easing,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            scale: [0.8, 1.2],
            duration: 2.0,
            easing: Easing::Sine,
        }
    }
}

/// Circular path around `center` in the plane orthogonal to `axis`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OrbitConfig {
    pub center: Vec3,
    pub radius: f32,
    /// Radians per reference frame
    pub speed: f32,
    pub axis: Axis,
    pub clockwise: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 5.0,
            speed: 0.01,
            axis: Axis::Y,
            clockwise: true,
        }
    }
}

/// Perpetual vertical bounce above the captured start height
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BounceConfig {
    /// Apex height of a full launch
    pub height: f32,
    pub gravity: f32,
    /// Fraction of speed kept after each ground contact
    pub damping: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            gravity: 9.8,
            damping: 0.8,
        }
    }
}

impl BounceConfig {
    /// Upward speed that reaches `height` under `gravity`
    pub fn launch_velocity(&self) -> f32 {
        (2.0 * self.gravity * self.height).max(0.0).sqrt()
    }
}

/// Finite random jitter around the captured start position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ShakeConfig {
    pub intensity: f32,
    pub frequency: f32,
    /// Seconds until the shake ends and the start position is restored
    pub duration: f32,
    /// Fade intensity linearly to zero over the duration
    pub decay: bool,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            intensity: 0.1,
            frequency: 10.0,
            duration: 1.0,
            decay: true,
        }
    }
}

/// Helix that climbs `height` per unit of progress, then wraps
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpiralConfig {
    pub radius: f32,
    pub height: f32,
    /// Progress per reference frame
    pub speed: f32,
    /// Revolutions per unit of progress
    pub turns: f32,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            height: 5.0,
            speed: 0.02,
            turns: 3.0,
        }
    }
}

/// Closed set of animation kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Rotate,
    Float,
    Pulse,
    Orbit,
    Bounce,
    Shake,
    Spiral,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 7] = [
        AnimationKind::Rotate,
        AnimationKind::Float,
        AnimationKind::Pulse,
        AnimationKind::Orbit,
        AnimationKind::Bounce,
        AnimationKind::Shake,
        AnimationKind::Spiral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::Rotate => "rotate",
            AnimationKind::Float => "float",
            AnimationKind::Pulse => "pulse",
            AnimationKind::Orbit => "orbit",
            AnimationKind::Bounce => "bounce",
            AnimationKind::Shake => "shake",
            AnimationKind::Spiral => "spiral",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        AnimationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| ConfigError::UnknownAnimationType(s.to_string()))
    }
}

/// Typed configuration for one animation instance
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationConfig {
    Rotate(RotateConfig),
    Float(FloatConfig),
    Pulse(PulseConfig),
    Orbit(OrbitConfig),
    Bounce(BounceConfig),
    Shake(ShakeConfig),
    Spiral(SpiralConfig),
}

impl AnimationConfig {
    /// Defaults for `kind`
    pub fn default_for(kind: AnimationKind) -> Self {
        match kind {
            AnimationKind::Rotate => AnimationConfig::Rotate(RotateConfig::default()),
            AnimationKind::Float => AnimationConfig::Float(FloatConfig::default()),
            AnimationKind::Pulse => AnimationConfig::Pulse(PulseConfig::default()),
            AnimationKind::Orbit => AnimationConfig::Orbit(OrbitConfig::default()),
            AnimationKind::Bounce => AnimationConfig::Bounce(BounceConfig::default()),
            AnimationKind::Shake => AnimationConfig::Shake(ShakeConfig::default()),
            AnimationKind::Spiral => AnimationConfig::Spiral(SpiralConfig::default()),
        }
    }

    /// Decode a kind name plus a partial options object, merged over the kind's defaults.
    ///
    /// `null` options select the defaults. Unknown kinds, unknown option
    /// fields and out-of-range values are rejected.
    pub fn from_json(kind: &str, options: serde_json::Value) -> Result<Self> {
        let kind: AnimationKind = kind.parse()?;
        let config = match kind {
            AnimationKind::Rotate => AnimationConfig::Rotate(decode(kind, options)?),
            AnimationKind::Float => AnimationConfig::Float(decode(kind, options)?),
            AnimationKind::Pulse => AnimationConfig::Pulse(decode(kind, options)?),
            AnimationKind::Orbit => AnimationConfig::Orbit(decode(kind, options)?),
            AnimationKind::Bounce => AnimationConfig::Bounce(decode(kind, options)?),
            AnimationKind::Shake => AnimationConfig::Shake(decode(kind, options)?),
            AnimationKind::Spiral => AnimationConfig::Spiral(decode(kind, options)?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn kind(&self) -> AnimationKind {
        match self {
            AnimationConfig::Rotate(_) => AnimationKind::Rotate,
            AnimationConfig::Float(_) => AnimationKind::Float,
            AnimationConfig::Pulse(_) => AnimationKind::Pulse,
            AnimationConfig::Orbit(_) => AnimationKind::Orbit,
            AnimationConfig::Bounce(_) => AnimationKind::Bounce,
            AnimationConfig::Shake(_) => AnimationKind::Shake,
            AnimationConfig::Spiral(_) => AnimationKind::Spiral,
        }
    }

    /// Reject values that would poison transform state (non-finite numbers,
    /// zero-length cycles, negative durations)
    pub fn validate(&self) -> Result<()> {
        match self {
            AnimationConfig::Rotate(c) => {
                finite("speed", c.speed)?;
                finite("direction", c.direction)
            }
            AnimationConfig::Float(c) => {
                finite("amplitude", c.amplitude)?;
                finite("frequency", c.frequency)?;
                finite("offset", c.offset)
            }
            AnimationConfig::Pulse(c) => {
                finite("scale", c.scale[0])?;
                finite("scale", c.scale[1])?;
                finite("duration", c.duration)?;
                if c.duration <= 0.0 {
                    return Err(ConfigError::invalid_value("duration", "must be positive"));
                }
                Ok(())
            }
            AnimationConfig::Orbit(c) => {
                if !c.center.is_finite() {
                    return Err(ConfigError::invalid_value("center", "must be finite"));
                }
                finite("radius", c.radius)?;
                finite("speed", c.speed)
            }
            AnimationConfig::Bounce(c) => {
                finite("height", c.height)?;
                finite("gravity", c.gravity)?;
                finite("damping", c.damping)?;
                if c.gravity < 0.0 || c.height < 0.0 {
                    return Err(ConfigError::invalid_value(
                        "gravity",
                        "gravity and height must be non-negative",
                    ));
                }
                Ok(())
            }
            AnimationConfig::Shake(c) => {
                finite("intensity", c.intensity)?;
                finite("frequency", c.frequency)?;
                finite("duration", c.duration)?;
                if c.duration < 0.0 {
                    return Err(ConfigError::invalid_value("duration", "must not be negative"));
                }
                Ok(())
            }
            AnimationConfig::Spiral(c) => {
                finite("radius", c.radius)?;
                finite("height", c.height)?;
                finite("speed", c.speed)?;
                finite("turns", c.turns)
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

fn decode<T: DeserializeOwned + Default>(kind: AnimationKind, options: serde_json::Value) -> Result<T> {
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
            impl From<$config> for AnimationConfig {
                fn from(config: $config) -> Self {
                    AnimationConfig::$variant(config)
                }
            }
        )*
    };
}

impl_from_config! {
    Rotate => RotateConfig,
    Float => FloatConfig,
    Pulse => PulseConfig,
    Orbit => OrbitConfig,
    Bounce => BounceConfig,
    Shake => ShakeConfig,
    Spiral => SpiralConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_options_merge_over_defaults() {
        let config = AnimationConfig::from_json("rotate", json!({ "axis": "x" })).unwrap();
        assert_eq!(
            config,
            AnimationConfig::Rotate(RotateConfig {
                axis: RotationAxis::X,
                ..Default::default()
            })
        );

        let config = AnimationConfig::from_json("snow", json!(null));
        assert_eq!(
            config,
            Err(ConfigError::UnknownAnimationType("snow".to_string()))
        );
    }

    #[test]
    fn test_null_options_select_defaults() {
        for kind in AnimationKind::ALL {
            let config = AnimationConfig::from_json(kind.name(), serde_json::Value::Null).unwrap();
            assert_eq!(config, AnimationConfig::default_for(kind));
            assert_eq!(config.kind(), kind);
        }
    }

    #[test]
    fn test_camel_case_and_unknown_fields() {
        let config = AnimationConfig::from_json(
            "pulse",
            json!({ "scale": [0.5, 1.5], "easing": "linear" }),
        )
        .unwrap();
        assert_eq!(
            config,
            AnimationConfig::Pulse(PulseConfig {
                scale: [0.5, 1.5],
                duration: 2.0,
                easing: Easing::Linear,
            })
        );

        let err = AnimationConfig::from_json("float", json!({ "amplitde": 2.0 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions { .. }));

        let err = AnimationConfig::from_json("orbit", json!({ "axis": "w" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions { .. }));
    }

    #[test]
    fn test_validation_rejects_zero_length_pulse() {
        let err = AnimationConfig::from_json("pulse", json!({ "duration": 0.0 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "duration", .. }));
    }

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!("Spiral".parse::<AnimationKind>(), Ok(AnimationKind::Spiral));
        assert_eq!("all".parse::<RotationAxis>(), Ok(RotationAxis::All));
        assert_eq!("Z".parse::<RotationAxis>(), Ok(RotationAxis::Z));
        assert!("diagonal".parse::<Axis>().is_err());
    }

    #[test]
    fn test_bounce_launch_velocity() {
        let config = BounceConfig {
            height: 5.0,
            gravity: 10.0,
            damping: 0.5,
        };
        assert!((config.launch_velocity() - 10.0).abs() < 1e-6);
    }
}
