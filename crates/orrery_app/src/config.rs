//! Engine configuration file handling

use anyhow::{bail, Context, Result};
use orrery_particles::{Backend, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up when a directory is given
pub const CONFIG_FILE: &str = "orrery.toml";

/// Top-level engine configuration (orrery.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed for shake noise, spawn distributions and snow respawns; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Upper bound on a single frame delta in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delta: Option<f32>,
    #[serde(default)]
    pub particles: ParticlesConfig,
}

/// Particle evaluation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParticlesConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// Smallest buffer the parallel backend will split across threads
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Serial,
    Parallel,
}

impl EngineConfig {
    /// Load configuration from a file, or from `orrery.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_delta {
            if !max.is_finite() || max <= 0.0 {
                bail!("max_delta must be a positive number of seconds, got {max}");
            }
        }
        Ok(())
    }

    /// Particle backend selected by this config
    pub fn backend(&self) -> Backend {
        match self.particles.backend {
            BackendKind::Serial => Backend::Serial,
            BackendKind::Parallel => Backend::Parallel {
                min_particles: self.particles.parallel_threshold,
            },
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.backend(), Backend::Serial);
    }

    #[test]
    fn test_parallel_backend_with_threshold() {
        let config = EngineConfig::from_toml(
            r#"
seed = 42
max_delta = 0.1

[particles]
backend = "parallel"
parallel_threshold = 256
"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_delta, Some(0.1));
        assert_eq!(config.backend(), Backend::Parallel { min_particles: 256 });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(EngineConfig::from_toml("max_delta = -1.0").is_err());
        assert!(EngineConfig::from_toml("fps = 60").is_err());
        assert!(EngineConfig::from_toml("[particles]\nbackend = \"gpu\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig {
            seed: Some(7),
            max_delta: None,
            particles: ParticlesConfig {
                backend: BackendKind::Parallel,
                parallel_threshold: 1024,
            },
        };
        let text = config.to_toml().unwrap();
        assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
    }
}
