//! Per-particle update rules
//!
//! Every kind except snow is a pure function of spawn state and the buffer's
//! elapsed time, so any particle can be evaluated independently. Snow is
//! integrated in place and respawns at the top of its volume.

use glam::Vec3;
use orrery_core::Color;
use rand::Rng;

use crate::buffer::SpawnSample;
use crate::config::ParticleConfig;

/// Local time span of one fire cycle, in seconds
pub const FIRE_CYCLE: f32 = 10.0;
/// Ember color at the top of the column
pub const FIRE_TIP: Color = Color::rgb(1.0, 1.0, 0.0);
pub const SNOW_ALPHA: f32 = 0.8;

/// Evaluated attributes of one particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSample {
    pub position: Vec3,
    pub color: Color,
    pub alpha: f32,
    pub size: f32,
}

/// The parameters each update rule reads, extracted once per buffer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    Stars { twinkle: bool },
    Fire { height: f32, intensity: f32 },
    Magic,
    Snow { area: f32 },
    Explosion { duration: f32 },
}

impl Rule {
    pub fn for_config(config: &ParticleConfig) -> Self {
        match config {
            ParticleConfig::Stars(c) => Rule::Stars { twinkle: c.twinkle },
            ParticleConfig::Fire(c) => Rule::Fire {
                height: c.height,
                intensity: c.intensity,
            },
            ParticleConfig::Magic(_) => Rule::Magic,
            ParticleConfig::Snow(c) => Rule::Snow { area: c.area },
            ParticleConfig::Explosion(c) => Rule::Explosion {
                duration: c.duration,
            },
        }
    }

    /// Whether positions are integrated frame by frame instead of evaluated
    pub fn is_integrated(&self) -> bool {
        matches!(self, Rule::Snow { .. })
    }
}

/// Evaluate one particle `elapsed` seconds after its buffer was created.
///
/// For snow this yields the static attributes only; positions come from
/// [`integrate_snow`].
pub fn evaluate(rule: &Rule, spawn: SpawnSample, elapsed: f32) -> ParticleSample {
    match *rule {
        Rule::Stars { twinkle } => {
            let size = if twinkle {
                spawn.size * (0.5 + 0.5 * (elapsed * 3.0 + spawn.position.x * 0.1).sin())
            } else {
                spawn.size
            };
            ParticleSample {
                position: spawn.position,
                color: spawn.color,
                alpha: 1.0,
                size,
            }
        }
        Rule::Fire { height, intensity } => fire(spawn, elapsed, height, intensity),
        Rule::Magic => {
            let phase = spawn.seed;
            let drift = Vec3::new(
                (elapsed * 1.5 + phase).cos() * 0.3,
                (elapsed * 2.0 + phase).sin() * 0.5,
                0.0,
            );
            let alpha = 0.5 + 0.5 * (elapsed * 4.0 + phase).sin();
            ParticleSample {
                position: spawn.position + drift,
                color: spawn.color,
                alpha,
                size: spawn.size * alpha,
            }
        }
        Rule::Snow { .. } => ParticleSample {
            position: spawn.position,
            color: spawn.color,
            alpha: SNOW_ALPHA,
            size: spawn.size,
        },
        Rule::Explosion { duration } => {
            let life = (elapsed + spawn.seed * duration).rem_euclid(duration) / duration;
            let alpha = 1.0 - life;
            ParticleSample {
                position: spawn.position + spawn.velocity * elapsed,
                color: spawn.color,
                alpha,
                size: spawn.size * alpha,
            }
        }
    }
}

fn fire(spawn: SpawnSample, elapsed: f32, height: f32, intensity: f32) -> ParticleSample {
    let mut local = (elapsed + spawn.seed * FIRE_CYCLE).rem_euclid(FIRE_CYCLE);
    let life = local / FIRE_CYCLE;

    // Rising faster than `height` per cycle: restart from the base each rise period.
    let climb = spawn.velocity.y * 2.0;
    if climb > 0.0 && climb * local > height {
        local = local.rem_euclid(height / climb);
    }

    let position = spawn.position + spawn.velocity * local * 2.0;
    let ratio = ((position.y - spawn.position.y) / height).clamp(0.0, 1.0);

    ParticleSample {
        position,
        color: spawn.color.lerp(FIRE_TIP, ratio),
        alpha: (1.0 - life) * intensity,
        size: spawn.size * (1.0 - ratio),
    }
}

/// Move a snowflake by `velocity * dt`, respawning it at the top of the
/// volume with fresh x/z once it falls below `-area / 2`
pub fn integrate_snow<R: Rng>(
    position: &mut Vec3,
    velocity: Vec3,
    dt: f32,
    area: f32,
    rng: &mut R,
) -> bool {
    *position += velocity * dt;
    if position.y < -area / 2.0 {
        position.x = (rng.gen::<f32>() - 0.5) * area;
        position.y = area / 2.0;
        position.z = (rng.gen::<f32>() - 0.5) * area;
        return true;
    }
    false
}

/// Coverage of a round point sprite at `distance` from its center (in sprite
/// units, 0.5 at the edge). `None` means the fragment is discarded.
pub fn sprite_coverage(distance: f32) -> Option<f32> {
    if distance > 0.5 {
        return None;
    }
    Some(1.0 - smoothstep(0.0, 0.5, distance))
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::FIRE_BASE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-4;

    fn sample(position: Vec3, velocity: Vec3, seed: f32) -> SpawnSample {
        SpawnSample {
            position,
            velocity,
            color: FIRE_BASE,
            size: 1.0,
            seed,
        }
    }

    #[test]
    fn test_fire_starts_at_base_and_rises() {
        let rule = Rule::Fire {
            height: 3.0,
            intensity: 1.0,
        };
        let spawn = sample(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 0.0);

        let at_start = evaluate(&rule, spawn, 0.0);
        assert_eq!(at_start.position, Vec3::ZERO);
        assert_eq!(at_start.color, FIRE_BASE);
        assert_eq!(at_start.size, 1.0);

        let rising = evaluate(&rule, spawn, 0.75);
        assert!((rising.position.y - 1.5).abs() < EPS);
        assert!((rising.color.g - 0.6).abs() < EPS);
        assert!((rising.size - 0.5).abs() < EPS);
    }

    #[test]
    fn test_fire_never_exceeds_height() {
        let rule = Rule::Fire {
            height: 3.0,
            intensity: 0.5,
        };
        let spawn = sample(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.1, 2.5, -0.1), 0.3);
        for frame in 0..1200 {
            let s = evaluate(&rule, spawn, frame as f32 / 60.0);
            let rise = s.position.y - 2.0;
            assert!((0.0..=3.0 + EPS).contains(&rise));
            assert!(s.alpha <= 0.5 && s.alpha >= 0.0);
        }
    }

    #[test]
    fn test_fire_recurs_after_a_full_cycle() {
        let rule = Rule::Fire {
            height: 3.0,
            intensity: 1.0,
        };
        let spawn = sample(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 0.0);
        let first = evaluate(&rule, spawn, 0.5);
        let later = evaluate(&rule, spawn, 0.5 + FIRE_CYCLE);
        assert!((first.position - later.position).length() < EPS);
    }

    #[test]
    fn test_explosion_fades_with_lifetime_offset() {
        let rule = Rule::Explosion { duration: 3.0 };
        let spawn = sample(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), 0.5);

        let s = evaluate(&rule, spawn, 0.0);
        assert!((s.alpha - 0.5).abs() < EPS);
        assert!((s.size - 0.5).abs() < EPS);

        let s = evaluate(&rule, spawn, 1.0);
        assert!((s.position.x - 5.0).abs() < EPS);
        assert!((s.alpha - (1.0 - 2.5 / 3.0)).abs() < EPS);
    }

    #[test]
    fn test_magic_drift_and_pulse() {
        let spawn = sample(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, 0.0);
        let s = evaluate(&Rule::Magic, spawn, 0.0);
        assert!((s.position - Vec3::new(1.3, 1.0, 1.0)).length() < EPS);
        assert!((s.alpha - 0.5).abs() < EPS);
        assert!((s.size - 0.5).abs() < EPS);
    }

    #[test]
    fn test_stars_twinkle_only_when_enabled() {
        let spawn = sample(Vec3::ZERO, Vec3::ZERO, 0.0);
        let t = std::f32::consts::FRAC_PI_2 / 3.0;

        let twinkling = evaluate(&Rule::Stars { twinkle: true }, spawn, t);
        assert!((twinkling.size - 1.0).abs() < EPS);
        let later = evaluate(&Rule::Stars { twinkle: true }, spawn, 3.0 * t);
        assert!(later.size.abs() < EPS);

        let steady = evaluate(&Rule::Stars { twinkle: false }, spawn, 3.0 * t);
        assert_eq!(steady.size, 1.0);
        assert_eq!(steady.position, Vec3::ZERO);
        assert_eq!(steady.alpha, 1.0);
    }

    #[test]
    fn test_snow_respawns_at_top() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut position = Vec3::new(3.0, -24.9, 3.0);
        let velocity = Vec3::new(0.0, -1.0, 0.0);

        assert!(integrate_snow(&mut position, velocity, 0.5, 50.0, &mut rng));
        assert_eq!(position.y, 25.0);
        assert!(position.x.abs() <= 25.0 && position.z.abs() <= 25.0);

        assert!(!integrate_snow(&mut position, velocity, 0.5, 50.0, &mut rng));
        assert_eq!(position.y, 24.5);
    }

    #[test]
    fn test_sprite_coverage() {
        assert_eq!(sprite_coverage(0.0), Some(1.0));
        assert_eq!(sprite_coverage(0.5), Some(0.0));
        assert_eq!(sprite_coverage(0.51), None);
        assert_eq!(sprite_coverage(0.25), Some(0.5));
    }
}
