//! Orrery Core
//!
//! Shared primitives for the Orrery animation and particle engine:
//!
//! - **Transforms**: shared handles to a scene node's position/rotation/scale
//! - **Colors**: hex and HSL construction for particle palettes
//! - **Time**: delta-time sanitising so a corrupt frame never reaches state
//! - **Errors**: `ConfigError` for rejected kinds and option payloads
//!
//! # Example
//!
//! ```rust
//! use orrery_core::{Transform, TransformHandle};
//! use glam::Vec3;
//!
//! let node = TransformHandle::new(Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
//! let alias = node.clone();
//!
//! alias.set_rotation(Vec3::new(0.0, 0.5, 0.0));
//! assert_eq!(node.rotation().y, 0.5);
//! assert!(node.same_node(&alias));
//! ```

pub mod color;
pub mod error;
pub mod rng;
pub mod time;
pub mod transform;

pub use color::Color;
pub use error::{ConfigError, Result};
pub use rng::seeded_rng;
pub use time::{sanitize_delta, DeltaClamp};
pub use transform::{Transform, TransformHandle};

/// Frame-rate normalisation factor: configured per-frame speeds are authored at 60fps.
pub const REFERENCE_FPS: f32 = 60.0;
