//! Orrery Particle System
//!
//! Structure-of-arrays particle buffers advanced once per frame.
//!
//! # Features
//!
//! - **Effects**: stars, fire, magic, snow, explosion
//! - **Pure update rules**: every kind but snow is a function of spawn state and elapsed time
//! - **Backends**: serial loop or rayon data-parallel evaluation with identical output
//! - **Lifecycle**: generation-tagged handles, idempotent removal, self-expiring explosions
//!
//! # Example
//!
//! ```rust
//! use orrery_particles::{ExplosionConfig, ParticleSystem};
//!
//! let mut particles = ParticleSystem::with_seed(7);
//! let burst = particles.create(ExplosionConfig { duration: 1.0, ..Default::default() });
//!
//! particles.advance(0.5);
//! assert_eq!(particles.get(burst).map(|b| b.len()), Some(300));
//!
//! particles.advance(0.6);
//! assert!(particles.get(burst).is_none());
//! ```

pub mod backend;
pub mod buffer;
pub mod config;
pub mod rules;
pub mod spawn;
pub mod system;

pub use backend::{Backend, DEFAULT_PARALLEL_THRESHOLD};
pub use buffer::{ParticleBuffer, SpawnSample, SpawnState};
pub use config::{
    ExplosionConfig, FireConfig, MagicConfig, ParticleConfig, ParticleKind, SnowConfig,
    StarsConfig,
};
pub use rules::{evaluate, sprite_coverage, ParticleSample, Rule};
pub use system::{ParticleHandle, ParticleSystem};
