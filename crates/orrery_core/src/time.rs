//! Frame delta sanitising
//!
//! A single NaN or negative delta would otherwise be integrated into every
//! position and velocity it touches, so invalid deltas become a zero tick.

use serde::{Deserialize, Serialize};

/// Optional upper bound applied to finite deltas (e.g. after a suspended frame)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaClamp {
    pub max_delta: Option<f32>,
}

impl DeltaClamp {
    pub fn new(max_delta: Option<f32>) -> Self {
        Self { max_delta }
    }

    /// Sanitise `dt`, then cap it at `max_delta` when configured
    pub fn apply(&self, dt: f32) -> f32 {
        let dt = sanitize_delta(dt);
        match self.max_delta {
            Some(max) if max.is_finite() && max >= 0.0 => dt.min(max),
            _ => dt,
        }
    }
}

/// Return `dt` unchanged when it is finite and non-negative, otherwise `0.0`
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        tracing::warn!(dt, "invalid frame delta clamped to zero");
        0.0
    }
}
