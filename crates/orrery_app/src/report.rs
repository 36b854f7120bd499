//! Report output model for headless scenario runs.

use anyhow::{bail, Result};
use orrery_core::Transform;
use orrery_particles::ParticleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Component, Path};

/// Summary of one particle buffer still alive at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferSummary {
    pub label: String,
    pub kind: ParticleKind,
    pub particles: usize,
    pub elapsed: f32,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub frames: u64,
    pub simulated_seconds: f64,
    pub active_animations: usize,
    pub active_chains: usize,
    pub particle_buffers: Vec<BufferSummary>,
    /// Final transform of every scenario node
    pub transforms: BTreeMap<String, Transform>,
}

impl ScenarioReport {
    pub fn live_particle_buffers(&self) -> usize {
        self.particle_buffers.len()
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
