//! Orrery Animation System
//!
//! Procedural motion applied to externally-owned transforms, advanced once per frame.
//!
//! # Features
//!
//! - **Motion Evaluators**: rotate, float, pulse, orbit, bounce, shake, spiral
//! - **Scheduler**: generation-tagged ids, insertion-ordered evaluation, idempotent stop
//! - **Chains**: per-target step sequences timed on the simulation clock
//!
//! # Example
//!
//! ```rust
//! use orrery_animation::{AnimationScheduler, RotateConfig};
//! use orrery_core::TransformHandle;
//!
//! let mut scheduler = AnimationScheduler::with_seed(1);
//! let node = TransformHandle::default();
//!
//! scheduler.register(&node, RotateConfig::default());
//! scheduler.advance(1.0 / 60.0);
//!
//! assert!((node.rotation().y - 0.01).abs() < 1e-6);
//! ```

pub mod chain;
pub mod config;
pub mod easing;
pub mod motion;
pub mod scheduler;

pub use chain::{ChainId, ChainStep};
pub use config::{
    AnimationConfig, AnimationKind, Axis, BounceConfig, FloatConfig, OrbitConfig, PulseConfig,
    RotateConfig, RotationAxis, ShakeConfig, SpiralConfig,
};
pub use easing::Easing;
pub use motion::{Motion, StepOutcome};
pub use scheduler::{AnimationId, AnimationScheduler};
