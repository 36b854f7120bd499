//! Configuration error types

use thiserror::Error;

/// Errors raised while building animations or particle buffers from
/// caller-supplied kinds and options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Animation kind name not recognised
    #[error("Unknown animation type: {0}")]
    UnknownAnimationType(String),

    /// Particle kind name not recognised
    #[error("Unknown particle type: {0}")]
    UnknownParticleType(String),

    /// Axis name not recognised
    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    /// Easing name not recognised
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// Options payload could not be decoded for the given kind
    #[error("Invalid options for {kind}: {message}")]
    InvalidOptions { kind: String, message: String },

    /// A field holds a value the engine cannot simulate
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
