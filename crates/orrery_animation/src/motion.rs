//! Motion evaluators
//!
//! Each animation kind is a variant carrying its immutable config plus the
//! mutable state captured at registration. `Motion::step` dispatches to a
//! per-kind step function that reads the config and state, advances the
//! state by `dt`, and writes the new value into the target transform.

use glam::Vec3;
use orrery_core::{Transform, REFERENCE_FPS};
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::{
    AnimationConfig, AnimationKind, Axis, BounceConfig, FloatConfig, OrbitConfig, PulseConfig,
    RotateConfig, RotationAxis, ShakeConfig, SpiralConfig,
};

/// Bounce speeds below this after a ground contact trigger a fresh launch
pub const BOUNCE_RELAUNCH_THRESHOLD: f32 = 0.1;

/// What the scheduler should do with an instance after a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The instance finished on its own and must be removed
    Finished,
}

/// An animation's config and mutable state, tagged by kind
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    Rotate {
        config: RotateConfig,
    },
    Float {
        config: FloatConfig,
        start: Vec3,
        time: f32,
    },
    Pulse {
        config: PulseConfig,
        start_scale: Vec3,
        time: f32,
    },
    Orbit {
        config: OrbitConfig,
        angle: f32,
    },
    Bounce {
        config: BounceConfig,
        start_y: f32,
        velocity: f32,
        height: f32,
    },
    Shake {
        config: ShakeConfig,
        start: Vec3,
        time: f32,
    },
    Spiral {
        config: SpiralConfig,
        start: Vec3,
        progress: f32,
    },
}

impl Motion {
    /// Capture start state from the target's current transform
    pub fn new(config: AnimationConfig, initial: &Transform) -> Self {
        match config {
            AnimationConfig::Rotate(config) => Motion::Rotate { config },
            AnimationConfig::Float(config) => Motion::Float {
                config,
                start: initial.position,
                time: 0.0,
            },
            AnimationConfig::Pulse(config) => Motion::Pulse {
                config,
                start_scale: initial.scale,
                time: 0.0,
            },
            AnimationConfig::Orbit(config) => Motion::Orbit { config, angle: 0.0 },
            AnimationConfig::Bounce(config) => Motion::Bounce {
                velocity: config.launch_velocity(),
                config,
                start_y: initial.position.y,
                height: 0.0,
            },
            AnimationConfig::Shake(config) => Motion::Shake {
                config,
                start: initial.position,
                time: 0.0,
            },
            AnimationConfig::Spiral(config) => Motion::Spiral {
                config,
                start: initial.position,
                progress: 0.0,
            },
        }
    }

    pub fn kind(&self) -> AnimationKind {
        match self {
            Motion::Rotate { .. } => AnimationKind::Rotate,
            Motion::Float { .. } => AnimationKind::Float,
            Motion::Pulse { .. } => AnimationKind::Pulse,
            Motion::Orbit { .. } => AnimationKind::Orbit,
            Motion::Bounce { .. } => AnimationKind::Bounce,
            Motion::Shake { .. } => AnimationKind::Shake,
            Motion::Spiral { .. } => AnimationKind::Spiral,
        }
    }

    /// The config this motion was created with
    pub fn config(&self) -> AnimationConfig {
        match self {
            Motion::Rotate { config } => config.clone().into(),
            Motion::Float { config, .. } => config.clone().into(),
            Motion::Pulse { config, .. } => config.clone().into(),
            Motion::Orbit { config, .. } => config.clone().into(),
            Motion::Bounce { config, .. } => config.clone().into(),
            Motion::Shake { config, .. } => config.clone().into(),
            Motion::Spiral { config, .. } => config.clone().into(),
        }
    }

    /// Advance by `dt` seconds and write the result into `transform`
    pub fn step<R: Rng>(
        &mut self,
        dt: f32,
        transform: &mut Transform,
        rng: &mut R,
    ) -> StepOutcome {
        match self {
            Motion::Rotate { config } => {
                rotate(config, dt, &mut transform.rotation);
                StepOutcome::Continue
            }
            Motion::Float {
                config,
                start,
                time,
            } => {
                *time += dt * config.frequency;
                transform.position[config.axis.index()] = float_value(config, *start, *time);
                StepOutcome::Continue
            }
            Motion::Pulse {
                config,
                start_scale,
                time,
            } => {
                *time += dt;
                transform.scale = *start_scale * pulse_factor(config, *time);
                StepOutcome::Continue
            }
            Motion::Orbit { config, angle } => {
                let direction = if config.clockwise { 1.0 } else { -1.0 };
                *angle += config.speed * direction * dt * REFERENCE_FPS;
                transform.position = orbit_position(config, *angle);
                StepOutcome::Continue
            }
            Motion::Bounce {
                config,
                start_y,
                velocity,
                height,
            } => {
                bounce(config, dt, velocity, height);
                transform.position.y = *start_y + *height;
                StepOutcome::Continue
            }
            Motion::Shake {
                config,
                start,
                time,
            } => {
                *time += dt;
                if *time >= config.duration {
                    transform.position = *start;
                    return StepOutcome::Finished;
                }
                let jitter = Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                );
                transform.position = *start + jitter * shake_amplitude(config, *time);
                StepOutcome::Continue
            }
            Motion::Spiral {
                config,
                start,
                progress,
            } => {
                *progress += config.speed * dt * REFERENCE_FPS;
                transform.position = *start + spiral_offset(config, *progress);
                StepOutcome::Continue
            }
        }
    }
}

fn rotate(config: &RotateConfig, dt: f32, rotation: &mut Vec3) {
    let delta = config.speed * config.direction * dt * REFERENCE_FPS;
    match config.axis {
        RotationAxis::X => rotation.x += delta,
        RotationAxis::Y => rotation.y += delta,
        RotationAxis::Z => rotation.z += delta,
        RotationAxis::All => *rotation += Vec3::splat(delta),
    }
}

/// Coordinate on the float axis after `time` (already scaled by frequency)
pub fn float_value(config: &FloatConfig, start: Vec3, time: f32) -> f32 {
    start[config.axis.index()] + time.sin() * config.amplitude + config.offset
}

/// Scale multiplier after `time` seconds
pub fn pulse_factor(config: &PulseConfig, time: f32) -> f32 {
    let [min, max] = config.scale;
    let progress = if config.duration > 0.0 {
        time.rem_euclid(config.duration) / config.duration
    } else {
        0.0
    };
    let eased = config.easing.wave(progress);
    min + (eased + 1.0) * 0.5 * (max - min)
}

/// Position on the orbit circle at `angle`
pub fn orbit_position(config: &OrbitConfig, angle: f32) -> Vec3 {
    let c = config.center;
    let (sin, cos) = angle.sin_cos();
    let r = config.radius;
    match config.axis {
        Axis::X => Vec3::new(c.x, c.y + cos * r, c.z + sin * r),
        Axis::Y => Vec3::new(c.x + cos * r, c.y, c.z + sin * r),
        Axis::Z => Vec3::new(c.x + cos * r, c.y + sin * r, c.z),
    }
}

/// Semi-implicit Euler step with a damped ground rebound.
///
/// Speeds that fall below the relaunch threshold are reset to a full launch,
/// so the bounce loops forever instead of settling.
fn bounce(config: &BounceConfig, dt: f32, velocity: &mut f32, height: &mut f32) {
    *velocity -= config.gravity * dt;
    *height += *velocity * dt;

    if *height <= 0.0 {
        *height = 0.0;
        *velocity = velocity.abs() * config.damping;

        if *velocity < BOUNCE_RELAUNCH_THRESHOLD {
            *velocity = config.launch_velocity();
        }
    }
}

fn shake_amplitude(config: &ShakeConfig, time: f32) -> f32 {
    let mut intensity = config.intensity;
    if config.decay && config.duration > 0.0 {
        intensity *= 1.0 - time / config.duration;
    }
    intensity * (time * config.frequency).sin()
}

/// Offset from the start position at `progress`
pub fn spiral_offset(config: &SpiralConfig, progress: f32) -> Vec3 {
    let angle = progress * config.turns * TAU;
    let height_frac = progress.rem_euclid(1.0);
    Vec3::new(
        angle.cos() * config.radius,
        height_frac * config.height,
        angle.sin() * config.radius,
    )
}
