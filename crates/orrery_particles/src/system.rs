//! Particle buffer lifecycle
//!
//! The system owns every live buffer. Buffers are created from a config,
//! advanced together once per frame, and released by `remove` or when a
//! finite effect outlives its duration.

use orrery_core::{sanitize_delta, seeded_rng};
use rand::rngs::StdRng;
use slotmap::{new_key_type, SlotMap};

use crate::backend::Backend;
use crate::buffer::ParticleBuffer;
use crate::config::ParticleConfig;
use crate::rules::{integrate_snow, Rule};
use crate::spawn::spawn;

new_key_type! {
    /// Generation-tagged handle to a particle buffer
    pub struct ParticleHandle;
}

struct Entry {
    rule: Rule,
    buffer: ParticleBuffer,
}

/// Owner of all live particle buffers
pub struct ParticleSystem {
    entries: SlotMap<ParticleHandle, Entry>,
    order: Vec<ParticleHandle>,
    backend: Backend,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::from_rng(seeded_rng(None))
    }

    /// System whose spawn distributions and snow respawns are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(seeded_rng(Some(seed)))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            backend: Backend::default(),
            rng,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    /// Spawn a buffer; its evaluated arrays are valid immediately
    pub fn create(&mut self, config: impl Into<ParticleConfig>) -> ParticleHandle {
        let config = config.into();
        let kind = config.kind();
        let rule = Rule::for_config(&config);
        let state = spawn(&config, &mut self.rng);

        let mut buffer = ParticleBuffer::new(config, state);
        self.backend.evaluate(&rule, &mut buffer);

        let count = buffer.len();
        let handle = self.entries.insert(Entry { rule, buffer });
        self.order.push(handle);
        tracing::debug!(?handle, %kind, count, "particle buffer created");
        handle
    }

    /// Release a buffer; unknown or already-removed handles are ignored
    pub fn remove(&mut self, handle: ParticleHandle) -> bool {
        if self.entries.remove(handle).is_none() {
            return false;
        }
        self.order.retain(|&other| other != handle);
        tracing::debug!(?handle, "particle buffer removed");
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Advance every live buffer by `dt` seconds, then drop expired ones
    pub fn advance(&mut self, dt: f32) {
        let dt = sanitize_delta(dt);
        let Self {
            entries,
            order,
            backend,
            rng,
        } = self;

        let mut expired = Vec::new();
        for &handle in order.iter() {
            let Some(Entry { rule, buffer }) = entries.get_mut(handle) else {
                continue;
            };
            buffer.tick_clock(dt);

            if let Rule::Snow { area } = *rule {
                let (positions, velocities) = (&mut buffer.position, &buffer.spawn.velocity);
                for (position, velocity) in positions.iter_mut().zip(velocities) {
                    integrate_snow(position, *velocity, dt, area, rng);
                }
            }
            backend.evaluate(rule, buffer);

            if buffer.is_expired() {
                expired.push(handle);
            }
        }

        for handle in expired {
            tracing::debug!(?handle, "particle buffer expired");
            self.remove(handle);
        }
        tracing::trace!(live = self.entries.len(), dt, "particles advanced");
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&ParticleBuffer> {
        self.entries.get(handle).map(|entry| &entry.buffer)
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.entries.contains_key(handle)
    }

    /// Live buffers in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &ParticleBuffer)> + '_ {
        self.order
            .iter()
            .filter_map(|&handle| self.get(handle).map(|buffer| (handle, buffer)))
    }

    /// Number of live buffers
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
