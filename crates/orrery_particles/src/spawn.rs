//! Spawn distributions

use glam::Vec3;
use orrery_core::Color;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::buffer::{SpawnSample, SpawnState};
use crate::config::{
    ExplosionConfig, FireConfig, MagicConfig, ParticleConfig, SnowConfig, StarsConfig,
};

/// Base ember color before the height gradient is applied
pub const FIRE_BASE: Color = Color::rgb(1.0, 0.2, 0.0);

/// Draw the initial state of every particle in `config`
pub fn spawn<R: Rng>(config: &ParticleConfig, rng: &mut R) -> SpawnState {
    let mut state = SpawnState::with_capacity(config.count());
    match config {
        ParticleConfig::Stars(c) => fill(&mut state, c.count, || star(c, rng)),
        ParticleConfig::Fire(c) => fill(&mut state, c.count, || ember(c, rng)),
        ParticleConfig::Magic(c) => fill(&mut state, c.count, || sparkle(c, rng)),
        ParticleConfig::Snow(c) => fill(&mut state, c.count, || flake(c, rng)),
        ParticleConfig::Explosion(c) => fill(&mut state, c.count, || shard(c, rng)),
    }
    state
}

fn fill(state: &mut SpawnState, count: usize, mut next: impl FnMut() -> SpawnSample) {
    for _ in 0..count {
        state.push(next());
    }
}

/// Uniform in `[-0.5, 0.5) * extent`
fn centered<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}

/// `base * [0.5, 1.0)`
fn varied<R: Rng>(rng: &mut R, base: f32) -> f32 {
    base * (0.5 + rng.gen::<f32>() * 0.5)
}

/// Point on a sphere of `radius` from two uniform angles
fn spherical<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = rng.gen::<f32>() * PI;
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

fn pick<R: Rng>(rng: &mut R, palette: &[u32]) -> Color {
    match palette.len() {
        0 => Color::WHITE,
        len => Color::from_hex(palette[rng.gen_range(0..len)]),
    }
}

fn star<R: Rng>(c: &StarsConfig, rng: &mut R) -> SpawnSample {
    let position = Vec3::new(
        centered(rng, c.spread),
        centered(rng, c.spread),
        centered(rng, c.spread),
    );
    let lightness = 0.9 + rng.gen::<f32>() * 0.1;
    SpawnSample {
        position,
        velocity: Vec3::ZERO,
        color: Color::from_hsl(0.6, 0.2, lightness).tint(Color::from_hex(c.color)),
        size: varied(rng, c.size),
        seed: 0.0,
    }
}

fn ember<R: Rng>(c: &FireConfig, rng: &mut R) -> SpawnSample {
    let position = c.position + Vec3::new(centered(rng, c.spread), 0.0, centered(rng, c.spread));
    let velocity = Vec3::new(
        centered(rng, 0.5),
        1.0 + rng.gen::<f32>() * 2.0,
        centered(rng, 0.5),
    );
    SpawnSample {
        position,
        velocity,
        color: FIRE_BASE,
        seed: rng.gen::<f32>(),
        size: varied(rng, c.size),
    }
}

fn sparkle<R: Rng>(c: &MagicConfig, rng: &mut R) -> SpawnSample {
    let radius = rng.gen::<f32>() * c.spread;
    let position = c.position + spherical(rng, radius);
    SpawnSample {
        position,
        velocity: Vec3::ZERO,
        color: pick(rng, &c.colors),
        size: varied(rng, c.size),
        seed: rng.gen::<f32>() * TAU,
    }
}

fn flake<R: Rng>(c: &SnowConfig, rng: &mut R) -> SpawnSample {
    let position = Vec3::new(
        centered(rng, c.area),
        rng.gen::<f32>() * c.area,
        centered(rng, c.area),
    );
    let velocity = Vec3::new(
        centered(rng, c.wind_strength),
        -varied(rng, c.fall_speed),
        centered(rng, c.wind_strength),
    );
    SpawnSample {
        position,
        velocity,
        color: Color::WHITE,
        size: varied(rng, c.size),
        seed: 0.0,
    }
}

fn shard<R: Rng>(c: &ExplosionConfig, rng: &mut R) -> SpawnSample {
    let speed = varied(rng, c.speed);
    SpawnSample {
        position: c.position,
        velocity: spherical(rng, speed),
        color: pick(rng, &c.colors),
        size: c.size,
        seed: rng.gen::<f32>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_every_array_has_count_entries() {
        let config: ParticleConfig = MagicConfig {
            count: 37,
            ..Default::default()
        }
        .into();
        let state = spawn(&config, &mut rng());
        assert_eq!(state.len(), 37);
        assert_eq!(state.velocity.len(), 37);
        assert_eq!(state.base_color.len(), 37);
        assert_eq!(state.base_size.len(), 37);
        assert_eq!(state.seed.len(), 37);
    }

    #[test]
    fn test_stars_stay_inside_cube() {
        let config: ParticleConfig = StarsConfig::default().into();
        let state = spawn(&config, &mut rng());
        for (p, size) in state.spawn_position.iter().zip(&state.base_size) {
            assert!(p.abs().max_element() <= 50.0);
            assert!((1.0..=2.0).contains(size));
        }
    }

    #[test]
    fn test_fire_velocity_ranges() {
        let config: ParticleConfig = FireConfig::default().into();
        let state = spawn(&config, &mut rng());
        for i in 0..state.len() {
            let s = state.sample(i);
            assert_eq!(s.position.y, 0.0);
            assert!(s.position.x.abs() <= 0.5 && s.position.z.abs() <= 0.5);
            assert!((1.0..3.0).contains(&s.velocity.y));
            assert!(s.velocity.x.abs() <= 0.25 && s.velocity.z.abs() <= 0.25);
            assert!((0.0..1.0).contains(&s.seed));
        }
    }

    #[test]
    fn test_magic_stays_in_sphere_and_uses_palette() {
        let center = Vec3::new(2.0, 0.0, -1.0);
        let config: ParticleConfig = MagicConfig {
            position: center,
            ..Default::default()
        }
        .into();
        let palette: Vec<Color> = [0xff00ff, 0x00ffff, 0xffff00]
            .into_iter()
            .map(Color::from_hex)
            .collect();

        let state = spawn(&config, &mut rng());
        for i in 0..state.len() {
            let s = state.sample(i);
            assert!(s.position.distance(center) <= 5.0 + 1e-4);
            assert!(palette.contains(&s.color));
            assert!((0.0..TAU).contains(&s.seed));
        }
    }

    #[test]
    fn test_snow_volume_and_fall() {
        let config: ParticleConfig = SnowConfig::default().into();
        let state = spawn(&config, &mut rng());
        for i in 0..state.len() {
            let s = state.sample(i);
            assert!(s.position.x.abs() <= 25.0 && s.position.z.abs() <= 25.0);
            assert!((0.0..50.0).contains(&s.position.y));
            assert!(s.velocity.y <= -0.5 && s.velocity.y > -1.0);
            assert!(s.velocity.x.abs() <= 0.25);
        }
    }

    #[test]
    fn test_explosion_starts_at_center() {
        let center = Vec3::new(0.0, 4.0, 0.0);
        let config: ParticleConfig = ExplosionConfig {
            position: center,
            ..Default::default()
        }
        .into();
        let state = spawn(&config, &mut rng());
        for i in 0..state.len() {
            let s = state.sample(i);
            assert_eq!(s.position, center);
            let speed = s.velocity.length();
            assert!((2.5 - 1e-4..=5.0 + 1e-4).contains(&speed));
        }
    }
}
