//! Integration tests for the animation scheduler and chain sequencer
//!
//! These drive the public API only, the way a host render loop would.

use glam::Vec3;
use orrery_animation::{
    AnimationConfig, AnimationKind, AnimationScheduler, BounceConfig, ChainStep, FloatConfig,
    PulseConfig, RotateConfig, ShakeConfig,
};
use orrery_core::{ConfigError, Transform, TransformHandle};
use serde_json::json;

fn run(scheduler: &mut AnimationScheduler, seconds: f32, fps: f32) {
    let frames = (seconds * fps).round() as usize;
    for _ in 0..frames {
        scheduler.advance(1.0 / fps);
    }
}

/// Rotation depends on elapsed time, not on how it is sliced into frames
#[test]
fn test_rotate_is_frame_rate_independent() {
    let at_60 = TransformHandle::default();
    let at_30 = TransformHandle::default();
    let mut a = AnimationScheduler::with_seed(1);
    let mut b = AnimationScheduler::with_seed(1);
    a.register(&at_60, RotateConfig::default());
    b.register(&at_30, RotateConfig::default());

    run(&mut a, 2.0, 60.0);
    run(&mut b, 2.0, 30.0);

    assert!((at_60.rotation().y - 1.2).abs() < 1e-3);
    assert!((at_60.rotation().y - at_30.rotation().y).abs() < 1e-3);
}

#[test]
fn test_float_returns_to_start_after_full_period() {
    let start = Vec3::new(0.0, 1.5, 0.0);
    let node = TransformHandle::new(Transform::from_position(start));
    let mut scheduler = AnimationScheduler::with_seed(1);
    scheduler.register(&node, FloatConfig::default());

    // sin(time) with frequency 1 has period 2π seconds
    let period = std::f32::consts::TAU;
    let frames = 600;
    for _ in 0..frames {
        scheduler.advance(period / frames as f32);
    }

    assert!((node.position().y - start.y).abs() < 1e-2);
}

#[test]
fn test_pulse_midpoint_scale() {
    let node = TransformHandle::new(Transform::default().with_scale(Vec3::splat(2.0)));
    let mut scheduler = AnimationScheduler::with_seed(1);
    scheduler.register(&node, PulseConfig::default());

    // Half a cycle in: sin(π) = 0, so the factor is the midpoint of [0.8, 1.2].
    scheduler.advance(1.0);

    assert!((node.scale() - Vec3::splat(2.0)).abs().max_element() < 1e-4);
}

#[test]
fn test_bounce_never_goes_below_start() {
    let node = TransformHandle::new(Transform::from_position(Vec3::new(0.0, 3.0, 0.0)));
    let mut scheduler = AnimationScheduler::with_seed(1);
    scheduler.register(&node, BounceConfig::default());

    let mut peak: f32 = 0.0;
    for _ in 0..600 {
        scheduler.advance(1.0 / 60.0);
        let y = node.position().y;
        assert!(y >= 3.0);
        peak = peak.max(y - 3.0);
    }

    // Never exceeds the launch apex by more than one integration step.
    assert!(peak <= 2.0 + 0.2);
}

#[test]
fn test_shake_restores_start_exactly() {
    let start = Vec3::new(-4.0, 0.25, 9.0);
    let node = TransformHandle::new(Transform::from_position(start));
    let mut scheduler = AnimationScheduler::with_seed(42);
    let id = scheduler.register(&node, ShakeConfig::default());

    scheduler.advance(0.5);
    assert!(scheduler.contains(id));

    run(&mut scheduler, 1.0, 60.0);
    assert!(!scheduler.contains(id));
    assert_eq!(node.position(), start);
}

#[test]
fn test_dynamic_registration_by_kind_name() {
    let node = TransformHandle::default();
    let mut scheduler = AnimationScheduler::with_seed(1);

    let config = AnimationConfig::from_json("rotate", json!({ "speed": 0.02, "axis": "x" }))
        .expect("rotate options are valid");
    let id = scheduler.register(&node, config);
    assert_eq!(scheduler.kind_of(id), Some(AnimationKind::Rotate));

    scheduler.advance(1.0 / 60.0);
    assert!((node.rotation().x - 0.02).abs() < 1e-6);

    assert_eq!(
        AnimationConfig::from_json("wobble", json!({})),
        Err(ConfigError::UnknownAnimationType("wobble".to_string()))
    );
}

/// A chain's timeline does not depend on frame size
#[test]
fn test_chain_timing_matches_across_frame_sizes() {
    let steps = || {
        [
            ChainStep::timed(RotateConfig::default(), 0.5),
            ChainStep::timed(
                RotateConfig {
                    direction: -1.0,
                    ..Default::default()
                },
                0.25,
            ),
        ]
    };

    let fine = TransformHandle::default();
    let coarse = TransformHandle::default();
    let mut a = AnimationScheduler::with_seed(1);
    let mut b = AnimationScheduler::with_seed(1);
    let chain_a = a.chain(&fine, steps());
    let chain_b = b.chain(&coarse, steps());

    for _ in 0..48 {
        a.advance(1.0 / 64.0);
    }
    b.advance(0.25);
    b.advance(0.25);
    b.advance(0.125);
    b.advance(0.125);

    assert!(a.is_chain_finished(chain_a));
    assert!(b.is_chain_finished(chain_b));
    // +0.3 then -0.15 on y in both cases
    assert!((fine.rotation().y - 0.15).abs() < 1e-3);
    assert!((coarse.rotation().y - 0.15).abs() < 1e-3);
}

#[test]
fn test_duration_less_steps_keep_running_after_chain() {
    let node = TransformHandle::default();
    let mut scheduler = AnimationScheduler::with_seed(1);

    let id = scheduler.chain(
        &node,
        [
            ChainStep::new(RotateConfig::default()),
            ChainStep::timed(FloatConfig::default(), 0.5),
        ],
    );
    assert_eq!(scheduler.active_count(), 2);

    run(&mut scheduler, 1.0, 60.0);

    assert!(scheduler.is_chain_finished(id));
    assert_eq!(scheduler.active_count(), 1);
    assert!((node.rotation().y - 0.6).abs() < 1e-3);
}
