//! Evaluation backends
//!
//! Both backends call the same pure rule per particle, so their output is
//! identical; the parallel one only changes how the work is scheduled.

use glam::Vec3;
use orrery_core::Color;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::ParticleBuffer;
use crate::rules::{evaluate, Rule};

/// Buffers smaller than this are evaluated serially by default
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// How time-pure particle rules are evaluated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Backend {
    /// Plain loop on the calling thread
    #[default]
    Serial,
    /// Rayon data-parallel loop for buffers with at least `min_particles`
    Parallel { min_particles: usize },
}

impl Backend {
    pub fn parallel() -> Self {
        Backend::Parallel {
            min_particles: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    fn runs_parallel(&self, len: usize) -> bool {
        match *self {
            Backend::Serial => false,
            Backend::Parallel { min_particles } => len >= min_particles,
        }
    }

    /// Re-evaluate every particle of `buffer` at its current elapsed time
    pub fn evaluate(&self, rule: &Rule, buffer: &mut ParticleBuffer) {
        let elapsed = buffer.elapsed();
        let integrated = rule.is_integrated();
        let ParticleBuffer {
            spawn,
            position,
            color,
            alpha,
            size,
            ..
        } = buffer;

        let spawn = &*spawn;
        let write = |index: usize,
                     position: &mut Vec3,
                     color: &mut Color,
                     alpha: &mut f32,
                     size: &mut f32| {
            let sample = evaluate(rule, spawn.sample(index), elapsed);
            if !integrated {
                *position = sample.position;
            }
            *color = sample.color;
            *alpha = sample.alpha;
            *size = sample.size;
        };

        if self.runs_parallel(position.len()) {
            position
                .par_iter_mut()
                .zip(color.par_iter_mut())
                .zip(alpha.par_iter_mut().zip(size.par_iter_mut()))
                .enumerate()
                .for_each(|(index, ((p, c), (a, s)))| write(index, p, c, a, s));
        } else {
            position
                .iter_mut()
                .zip(color.iter_mut())
                .zip(alpha.iter_mut().zip(size.iter_mut()))
                .enumerate()
                .for_each(|(index, ((p, c), (a, s)))| write(index, p, c, a, s));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FireConfig, ParticleConfig};
    use crate::spawn::spawn;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_threshold_selects_serial_for_small_buffers() {
        let backend = Backend::Parallel { min_particles: 100 };
        assert!(!backend.runs_parallel(99));
        assert!(backend.runs_parallel(100));
        assert!(!Backend::Serial.runs_parallel(1_000_000));
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let config: ParticleConfig = FireConfig {
            count: 512,
            ..Default::default()
        }
        .into();
        let rule = Rule::for_config(&config);
        let state = spawn(&config, &mut StdRng::seed_from_u64(2));

        let mut serial = ParticleBuffer::new(config.clone(), state.clone());
        let mut parallel = ParticleBuffer::new(config, state);
        serial.tick_clock(1.7);
        parallel.tick_clock(1.7);

        Backend::Serial.evaluate(&rule, &mut serial);
        Backend::Parallel { min_particles: 1 }.evaluate(&rule, &mut parallel);

        assert_eq!(serial.positions(), parallel.positions());
        assert_eq!(serial.colors(), parallel.colors());
        assert_eq!(serial.alphas(), parallel.alphas());
        assert_eq!(serial.sizes(), parallel.sizes());
    }
}
