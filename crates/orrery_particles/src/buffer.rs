//! Structure-of-arrays particle storage

use glam::Vec3;
use orrery_core::Color;

use crate::config::{ParticleConfig, ParticleKind};

/// Per-particle state fixed at spawn time
///
/// `seed` is a lifetime offset in `[0, 1)` for fire and explosion, a phase in
/// `[0, 2π)` for magic, and unused otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnState {
    pub spawn_position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub base_color: Vec<Color>,
    pub base_size: Vec<f32>,
    pub seed: Vec<f32>,
}

impl SpawnState {
    pub fn with_capacity(count: usize) -> Self {
        Self {
            spawn_position: Vec::with_capacity(count),
            velocity: Vec::with_capacity(count),
            base_color: Vec::with_capacity(count),
            base_size: Vec::with_capacity(count),
            seed: Vec::with_capacity(count),
        }
    }

    pub fn push(&mut self, particle: SpawnSample) {
        self.spawn_position.push(particle.position);
        self.velocity.push(particle.velocity);
        self.base_color.push(particle.color);
        self.base_size.push(particle.size);
        self.seed.push(particle.seed);
    }

    pub fn len(&self) -> usize {
        self.spawn_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawn_position.is_empty()
    }

    pub fn sample(&self, index: usize) -> SpawnSample {
        SpawnSample {
            position: self.spawn_position[index],
            velocity: self.velocity[index],
            color: self.base_color[index],
            size: self.base_size[index],
            seed: self.seed[index],
        }
    }
}

/// Spawn state of a single particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnSample {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub size: f32,
    pub seed: f32,
}

/// One live particle effect: its config, clock, spawn state and evaluated attributes
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    config: ParticleConfig,
    elapsed: f32,
    pub(crate) spawn: SpawnState,
    pub(crate) position: Vec<Vec3>,
    pub(crate) color: Vec<Color>,
    pub(crate) alpha: Vec<f32>,
    pub(crate) size: Vec<f32>,
}

impl ParticleBuffer {
    /// Wrap freshly spawned state; evaluated arrays start at the spawn values
    pub fn new(config: ParticleConfig, spawn: SpawnState) -> Self {
        let count = spawn.len();
        Self {
            position: spawn.spawn_position.clone(),
            color: spawn.base_color.clone(),
            alpha: vec![1.0; count],
            size: spawn.base_size.clone(),
            config,
            elapsed: 0.0,
            spawn,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        self.config.kind()
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Seconds since creation
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub(crate) fn tick_clock(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Finite buffers past their lifetime
    pub fn is_expired(&self) -> bool {
        self.config
            .lifetime()
            .is_some_and(|lifetime| self.elapsed >= lifetime)
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn spawn(&self) -> &SpawnState {
        &self.spawn
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.position
    }

    pub fn colors(&self) -> &[Color] {
        &self.color
    }

    pub fn alphas(&self) -> &[f32] {
        &self.alpha
    }

    pub fn sizes(&self) -> &[f32] {
        &self.size
    }
}
