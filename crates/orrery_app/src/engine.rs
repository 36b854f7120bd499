//! Engine facade
//!
//! One `advance` call per frame drives the animation scheduler, chain
//! countdowns and every particle buffer with the same sanitised delta.

use orrery_animation::{
    AnimationConfig, AnimationId, AnimationScheduler, ChainId, ChainStep,
};
use orrery_core::{seeded_rng, ConfigError, DeltaClamp, TransformHandle};
use orrery_particles::{ParticleBuffer, ParticleConfig, ParticleHandle, ParticleSystem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Running totals since the engine was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frames: u64,
    /// Sum of the deltas actually applied, after sanitising and clamping
    pub simulated_seconds: f64,
}

/// Animation scheduler plus particle system behind a single per-frame entry point
pub struct Engine {
    animations: AnimationScheduler,
    particles: ParticleSystem,
    clamp: DeltaClamp,
    stats: FrameStats,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let mut master = seeded_rng(config.seed);
        let animations = AnimationScheduler::from_rng(StdRng::seed_from_u64(master.gen()));
        let mut particles = ParticleSystem::from_rng(StdRng::seed_from_u64(master.gen()));
        particles.set_backend(config.backend());

        tracing::debug!(
            seed = ?config.seed,
            max_delta = ?config.max_delta,
            backend = ?config.backend(),
            "engine created"
        );

        Self {
            animations,
            particles,
            clamp: DeltaClamp::new(config.max_delta),
            stats: FrameStats::default(),
        }
    }

    /// Advance everything by `dt` seconds. Invalid deltas become a zero tick.
    pub fn advance(&mut self, dt: f32) {
        let dt = self.clamp.apply(dt);
        self.animations.advance(dt);
        self.particles.advance(dt);

        self.stats.frames += 1;
        self.stats.simulated_seconds += f64::from(dt);
        tracing::trace!(
            frame = self.stats.frames,
            dt,
            animations = self.animations.active_count(),
            particle_buffers = self.particles.live_count(),
            "frame advanced"
        );
    }

    pub fn register(
        &mut self,
        target: &TransformHandle,
        config: impl Into<AnimationConfig>,
    ) -> AnimationId {
        self.animations.register(target, config)
    }

    /// Register by kind name with a partial JSON options object
    pub fn register_named(
        &mut self,
        target: &TransformHandle,
        kind: &str,
        options: serde_json::Value,
    ) -> Result<AnimationId, ConfigError> {
        let config = AnimationConfig::from_json(kind, options)?;
        Ok(self.animations.register(target, config))
    }

    pub fn stop(&mut self, id: AnimationId) -> bool {
        self.animations.stop(id)
    }

    pub fn stop_all(&mut self, target: &TransformHandle) -> usize {
        self.animations.stop_all(target)
    }

    /// Remove every animation and chain. Particle buffers are left alone.
    pub fn clear(&mut self) {
        self.animations.clear();
    }

    pub fn active_count(&self) -> usize {
        self.animations.active_count()
    }

    pub fn chain(
        &mut self,
        target: &TransformHandle,
        steps: impl IntoIterator<Item = ChainStep>,
    ) -> ChainId {
        self.animations.chain(target, steps)
    }

    pub fn cancel_chain(&mut self, id: ChainId) -> bool {
        self.animations.cancel_chain(id)
    }

    pub fn create_particles(&mut self, config: impl Into<ParticleConfig>) -> ParticleHandle {
        self.particles.create(config)
    }

    /// Create a particle buffer by kind name with a partial JSON options object
    pub fn create_particles_named(
        &mut self,
        kind: &str,
        options: serde_json::Value,
    ) -> Result<ParticleHandle, ConfigError> {
        let config = ParticleConfig::from_json(kind, options)?;
        Ok(self.particles.create(config))
    }

    pub fn remove_particles(&mut self, handle: ParticleHandle) -> bool {
        self.particles.remove(handle)
    }

    pub fn particles(&self, handle: ParticleHandle) -> Option<&ParticleBuffer> {
        self.particles.get(handle)
    }

    /// Live particle buffers in creation order, for the renderer
    pub fn particle_buffers(&self) -> impl Iterator<Item = (ParticleHandle, &ParticleBuffer)> + '_ {
        self.particles.iter()
    }

    pub fn animations(&self) -> &AnimationScheduler {
        &self.animations
    }

    pub fn particle_system(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
