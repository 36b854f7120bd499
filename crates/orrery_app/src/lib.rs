//! Orrery Application Layer
//!
//! The [`Engine`] facade a host render loop calls once per frame, its TOML
//! configuration, and a headless scenario runner that reports final state as
//! JSON.
//!
//! # Example
//!
//! ```rust
//! use orrery_app::{Engine, EngineConfig};
//! use orrery_core::TransformHandle;
//! use serde_json::json;
//!
//! let mut engine = Engine::with_config(&EngineConfig { seed: Some(1), ..Default::default() });
//! let cube = TransformHandle::default();
//!
//! engine.register_named(&cube, "spiral", json!({ "radius": 2.0 })).unwrap();
//! engine.create_particles_named("snow", json!({ "count": 50 })).unwrap();
//! engine.advance(1.0 / 60.0);
//!
//! assert_eq!(engine.active_count(), 1);
//! assert_eq!(engine.particle_buffers().count(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::{BackendKind, EngineConfig, ParticlesConfig, CONFIG_FILE};
pub use engine::{Engine, FrameStats};
pub use report::{BufferSummary, ScenarioReport};
pub use runner::{run_loaded_scenario, run_scenario};
pub use scenario::{ChainStepSpec, Scenario, ScenarioStep};
