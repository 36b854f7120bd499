//! Easing curves for periodic animations

use orrery_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::str::FromStr;

/// Wave shape used by pulse animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[default]
    Sine,
    Linear,
}

impl Easing {
    /// Map cycle progress (0.0 to 1.0) to a wave value in -1.0..=1.0
    pub fn wave(&self, progress: f32) -> f32 {
        match self {
            Easing::Sine => (progress * TAU).sin(),
            Easing::Linear => progress * 2.0 - 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Sine => "sine",
            Easing::Linear => "linear",
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" => Ok(Easing::Sine),
            "linear" => Ok(Easing::Linear),
            _ => Err(ConfigError::UnknownEasing(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_quarter_points() {
        assert!(Easing::Sine.wave(0.0).abs() < 1e-6);
        assert!((Easing::Sine.wave(0.25) - 1.0).abs() < 1e-6);
        assert!((Easing::Sine.wave(0.75) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_wave_spans_range() {
        assert_eq!(Easing::Linear.wave(0.0), -1.0);
        assert_eq!(Easing::Linear.wave(0.5), 0.0);
        assert_eq!(Easing::Linear.wave(1.0), 1.0);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("Sine".parse::<Easing>(), Ok(Easing::Sine));
        assert!(matches!(
            "bouncy".parse::<Easing>(),
            Err(ConfigError::UnknownEasing(_))
        ));
    }
}
