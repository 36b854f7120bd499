//! Scenario definition for headless engine runs.

use anyhow::{Context, Result};
use orrery_core::Transform;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Named nodes plus an ordered list of steps to run against a fresh engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Initial transforms, keyed by node name
    #[serde(default)]
    pub nodes: BTreeMap<String, Transform>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("Failed to parse scenario")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

/// One scenario step; options objects are merged over the kind's defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Animate {
        node: String,
        kind: String,
        #[serde(default)]
        options: serde_json::Value,
    },
    Chain {
        node: String,
        steps: Vec<ChainStepSpec>,
    },
    Particles {
        label: String,
        kind: String,
        #[serde(default)]
        options: serde_json::Value,
    },
    RemoveParticles {
        label: String,
    },
    StopAll {
        node: String,
    },
    Clear,
    /// Run `seconds` of simulated time in frames of `1 / fps`
    Advance {
        seconds: f32,
        #[serde(default = "default_fps")]
        fps: f32,
    },
    /// Run exactly `frames` frames of `1 / fps`
    Tick {
        frames: u32,
        #[serde(default = "default_fps")]
        fps: f32,
    },
}

impl ScenarioStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Animate { .. } => "animate",
            ScenarioStep::Chain { .. } => "chain",
            ScenarioStep::Particles { .. } => "particles",
            ScenarioStep::RemoveParticles { .. } => "remove_particles",
            ScenarioStep::StopAll { .. } => "stop_all",
            ScenarioStep::Clear => "clear",
            ScenarioStep::Advance { .. } => "advance",
            ScenarioStep::Tick { .. } => "tick",
        }
    }
}

/// A chain step as written in a scenario file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainStepSpec {
    pub kind: String,
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default)]
    pub duration: Option<f32>,
}

fn default_fps() -> f32 {
    orrery_core::REFERENCE_FPS
}
