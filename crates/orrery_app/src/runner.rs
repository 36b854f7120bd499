//! Scenario runner that drives a fresh engine through a scenario's steps.

use anyhow::{anyhow, bail, Context, Result};
use orrery_animation::{AnimationConfig, ChainStep};
use orrery_core::TransformHandle;
use orrery_particles::ParticleHandle;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::report::{BufferSummary, ScenarioReport};
use crate::scenario::{Scenario, ScenarioStep};

/// Execute scenario JSON with the given engine config.
pub fn run_scenario(input: &str, config: &EngineConfig) -> Result<ScenarioReport> {
    let scenario = Scenario::from_json(input)?;
    run_loaded_scenario(&scenario, config)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(scenario: &Scenario, config: &EngineConfig) -> Result<ScenarioReport> {
    let mut run = ScenarioRun::new(scenario, config);
    for (step_index, step) in scenario.steps.iter().enumerate() {
        run.apply(step)
            .with_context(|| format!("step {step_index} ({}) failed", step.name()))?;
    }
    Ok(run.report())
}

struct ScenarioRun {
    engine: Engine,
    nodes: BTreeMap<String, TransformHandle>,
    labels: FxHashMap<String, ParticleHandle>,
}

impl ScenarioRun {
    fn new(scenario: &Scenario, config: &EngineConfig) -> Self {
        let nodes = scenario
            .nodes
            .iter()
            .map(|(name, transform)| (name.clone(), TransformHandle::new(*transform)))
            .collect();
        Self {
            engine: Engine::with_config(config),
            nodes,
            labels: FxHashMap::default(),
        }
    }

    fn node(&self, name: &str) -> Result<&TransformHandle> {
        self.nodes
            .get(name)
            .ok_or_else(|| anyhow!("unknown node '{name}'"))
    }

    fn apply(&mut self, step: &ScenarioStep) -> Result<()> {
        match step {
            ScenarioStep::Animate {
                node,
                kind,
                options,
            } => {
                let target = self.node(node)?.clone();
                self.engine.register_named(&target, kind, options.clone())?;
            }
            ScenarioStep::Chain { node, steps } => {
                let target = self.node(node)?.clone();
                let steps = steps
                    .iter()
                    .map(|spec| -> Result<ChainStep> {
                        let config = AnimationConfig::from_json(&spec.kind, spec.options.clone())?;
                        Ok(ChainStep {
                            config,
                            duration: spec.duration,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.engine.chain(&target, steps);
            }
            ScenarioStep::Particles {
                label,
                kind,
                options,
            } => {
                if self.labels.contains_key(label) {
                    bail!("particle label '{label}' is already in use");
                }
                let handle = self.engine.create_particles_named(kind, options.clone())?;
                self.labels.insert(label.clone(), handle);
            }
            ScenarioStep::RemoveParticles { label } => {
                let handle = self
                    .labels
                    .remove(label)
                    .ok_or_else(|| anyhow!("unknown particle label '{label}'"))?;
                self.engine.remove_particles(handle);
            }
            ScenarioStep::StopAll { node } => {
                let target = self.node(node)?.clone();
                self.engine.stop_all(&target);
            }
            ScenarioStep::Clear => self.engine.clear(),
            ScenarioStep::Advance { seconds, fps } => {
                let tick = frame_delta(*fps)?;
                if !seconds.is_finite() || *seconds < 0.0 {
                    bail!("advance seconds must be a non-negative number, got {seconds}");
                }
                // The last frame takes whatever is left, so no sliver frame is emitted.
                let frames = ((seconds * fps) - FRAME_SLACK).ceil().max(0.0) as u64;
                let mut remaining = *seconds;
                for frame in 1..=frames {
                    let dt = if frame == frames {
                        remaining.max(0.0)
                    } else {
                        tick.min(remaining)
                    };
                    self.engine.advance(dt);
                    remaining -= dt;
                }
            }
            ScenarioStep::Tick { frames, fps } => {
                let tick = frame_delta(*fps)?;
                for _ in 0..*frames {
                    self.engine.advance(tick);
                }
            }
        }
        Ok(())
    }

    fn report(&self) -> ScenarioReport {
        let stats = self.engine.stats();
        let mut particle_buffers: Vec<BufferSummary> = self
            .labels
            .iter()
            .filter_map(|(label, &handle)| {
                self.engine.particles(handle).map(|buffer| BufferSummary {
                    label: label.clone(),
                    kind: buffer.kind(),
                    particles: buffer.len(),
                    elapsed: buffer.elapsed(),
                })
            })
            .collect();
        particle_buffers.sort_by(|a, b| a.label.cmp(&b.label));

        ScenarioReport {
            frames: stats.frames,
            simulated_seconds: stats.simulated_seconds,
            active_animations: self.engine.active_count(),
            active_chains: self.engine.animations().chain_count(),
            particle_buffers,
            transforms: self
                .nodes
                .iter()
                .map(|(name, handle)| (name.clone(), handle.get()))
                .collect(),
        }
    }
}

/// Fraction of a frame ignored when splitting seconds into frames
const FRAME_SLACK: f32 = 1e-3;

fn frame_delta(fps: f32) -> Result<f32> {
    if !fps.is_finite() || fps <= 0.0 {
        bail!("fps must be a positive number, got {fps}");
    }
    Ok(1.0 / fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> EngineConfig {
        EngineConfig {
            seed: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_advance_splits_into_frames() {
        let report = run_scenario(
            r#"{
                "nodes": { "a": {} },
                "steps": [
                    { "type": "animate", "node": "a", "kind": "rotate" },
                    { "type": "advance", "seconds": 0.25, "fps": 10.0 }
                ]
            }"#,
            &seeded(),
        )
        .unwrap();

        // 0.1 + 0.1 + 0.05
        assert_eq!(report.frames, 3);
        assert!((report.simulated_seconds - 0.25).abs() < 1e-5);
        assert!((report.transforms["a"].rotation.y - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_node_names_the_step() {
        let err = run_scenario(
            r#"{ "steps": [
                { "type": "tick", "frames": 1 },
                { "type": "stop_all", "node": "ghost" }
            ] }"#,
            &seeded(),
        )
        .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("step 1 (stop_all)"));
        assert!(message.contains("ghost"));
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let err = run_scenario(
            r#"{ "steps": [
                { "type": "particles", "label": "p", "kind": "magic" },
                { "type": "particles", "label": "p", "kind": "magic" }
            ] }"#,
            &seeded(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_bad_fps_is_rejected() {
        let err = run_scenario(
            r#"{ "steps": [{ "type": "tick", "frames": 2, "fps": 0.0 }] }"#,
            &seeded(),
        );
        assert!(err.is_err());
    }
}
