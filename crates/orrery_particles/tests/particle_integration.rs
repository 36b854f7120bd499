//! Integration tests for particle buffers driven through the public API

use glam::Vec3;
use orrery_core::ConfigError;
use orrery_particles::{
    Backend, ExplosionConfig, FireConfig, MagicConfig, ParticleConfig, ParticleKind,
    ParticleSystem, SnowConfig, StarsConfig,
};
use serde_json::json;

fn run(system: &mut ParticleSystem, seconds: f32) {
    let frames = (seconds * 60.0).round() as usize;
    for _ in 0..frames {
        system.advance(1.0 / 60.0);
    }
}

#[test]
fn test_explosion_is_gone_after_two_seconds() {
    let mut system = ParticleSystem::with_seed(3);
    let config = ParticleConfig::from_json("explosion", json!({ "duration": 2.0 })).unwrap();
    let burst = system.create(config);
    let stars = system.create(StarsConfig::default());

    run(&mut system, 2.1);

    assert!(system.get(burst).is_none());
    assert!(system.get(stars).is_some());
    assert_eq!(system.live_count(), 1);
}

#[test]
fn test_serial_and_parallel_systems_match() {
    let configs: Vec<ParticleConfig> = vec![
        StarsConfig::default().into(),
        FireConfig::default().into(),
        MagicConfig::default().into(),
        ExplosionConfig::default().into(),
    ];

    let mut serial = ParticleSystem::with_seed(21);
    let mut parallel = ParticleSystem::with_seed(21);
    parallel.set_backend(Backend::Parallel { min_particles: 16 });

    let a: Vec<_> = configs.iter().cloned().map(|c| serial.create(c)).collect();
    let b: Vec<_> = configs.into_iter().map(|c| parallel.create(c)).collect();

    run(&mut serial, 1.25);
    run(&mut parallel, 1.25);

    for (x, y) in a.into_iter().zip(b) {
        let (x, y) = (serial.get(x).unwrap(), parallel.get(y).unwrap());
        assert_eq!(x.positions(), y.positions());
        assert_eq!(x.colors(), y.colors());
        assert_eq!(x.alphas(), y.alphas());
        assert_eq!(x.sizes(), y.sizes());
    }
}

#[test]
fn test_snow_respawns_at_top_of_volume() {
    let mut system = ParticleSystem::with_seed(8);
    let handle = system.create(SnowConfig {
        count: 200,
        area: 10.0,
        fall_speed: 4.0,
        wind_strength: 0.0,
        ..Default::default()
    });

    // Slowest flake falls 2 units/s; 10 units of volume plus 5 below the floor
    // takes at most 7.5s, so every flake has wrapped at least once.
    run(&mut system, 8.0);

    let buffer = system.get(handle).unwrap();
    for (now, spawned) in buffer.positions().iter().zip(&buffer.spawn().spawn_position) {
        assert!(now.y >= -5.0 && now.y <= 5.0);
        assert!(now.x.abs() <= 5.0 && now.z.abs() <= 5.0);
        assert_ne!(*now, *spawned);
    }
}

#[test]
fn test_buffers_advance_in_creation_order_and_keep_length() {
    let mut system = ParticleSystem::with_seed(2);
    let fire = system.create(FireConfig {
        count: 17,
        position: Vec3::new(0.0, 1.0, 0.0),
        ..Default::default()
    });
    let magic = system.create(MagicConfig {
        count: 9,
        ..Default::default()
    });

    run(&mut system, 3.0);

    let kinds: Vec<ParticleKind> = system.iter().map(|(_, b)| b.kind()).collect();
    assert_eq!(kinds, vec![ParticleKind::Fire, ParticleKind::Magic]);
    assert_eq!(system.get(fire).unwrap().len(), 17);
    assert_eq!(system.get(magic).unwrap().alphas().len(), 9);

    for p in system.get(fire).unwrap().positions() {
        assert!(p.y >= 1.0 && p.y <= 4.0 + 1e-4);
    }
}

#[test]
fn test_unknown_particle_kind() {
    assert!(matches!(
        ParticleConfig::from_json("confetti", json!(null)),
        Err(ConfigError::UnknownParticleType(name)) if name == "confetti"
    ));
}
