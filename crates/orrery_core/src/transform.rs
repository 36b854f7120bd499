//! Transform handles
//!
//! The scene graph owns its nodes; the engine only holds shared handles and
//! reads/writes the position, rotation and scale fields through them.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Position, Euler rotation (radians) and scale of a renderable node
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Shared handle to a node's transform.
///
/// Cloning a handle aliases the same node; equality is identity, not value.
#[derive(Clone, Default)]
pub struct TransformHandle(Rc<RefCell<Transform>>);

impl TransformHandle {
    pub fn new(transform: Transform) -> Self {
        Self(Rc::new(RefCell::new(transform)))
    }

    /// Copy of the current transform
    pub fn get(&self) -> Transform {
        *self.0.borrow()
    }

    /// Replace the whole transform
    pub fn set(&self, transform: Transform) {
        *self.0.borrow_mut() = transform;
    }

    /// Mutate the transform in place
    pub fn update<R>(&self, f: impl FnOnce(&mut Transform) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn position(&self) -> Vec3 {
        self.0.borrow().position
    }

    pub fn set_position(&self, position: Vec3) {
        self.0.borrow_mut().position = position;
    }

    pub fn rotation(&self) -> Vec3 {
        self.0.borrow().rotation
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.0.borrow_mut().rotation = rotation;
    }

    pub fn scale(&self) -> Vec3 {
        self.0.borrow().scale
    }

    pub fn set_scale(&self, scale: Vec3) {
        self.0.borrow_mut().scale = scale;
    }

    pub fn set_uniform_scale(&self, scale: f32) {
        self.0.borrow_mut().scale = Vec3::splat(scale);
    }

    /// Whether both handles refer to the same node
    pub fn same_node(&self, other: &TransformHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TransformHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl Eq for TransformHandle {}

impl fmt::Debug for TransformHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransformHandle").field(&self.get()).finish()
    }
}

impl From<Transform> for TransformHandle {
    fn from(transform: Transform) -> Self {
        Self::new(transform)
    }
}
