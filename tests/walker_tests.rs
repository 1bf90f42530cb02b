// Host-side tests for the pure pose-animation core.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/constants.rs"]
mod constants;
#[path = "../src/core/walker.rs"]
mod walker;

use constants::*;
use walker::*;
use glam::{Vec2, Vec3};

/// Joint table with every default-bound joint present at a zero rest pose.
fn zero_rest_table() -> JointMap {
    let mut joints = JointMap::new();
    let bindings = JointBindings::default();
    for role in JointRole::ALL {
        joints.insert(bindings.name(role).unwrap(), Vec3::ZERO);
    }
    joints
}

fn bound_walker(joints: &JointMap) -> Walker {
    Walker::bind(WalkerParams::default(), JointBindings::default(), joints)
}

#[test]
fn proximity_is_clamped_and_monotonic() {
    let params = WalkerParams::default();
    assert_eq!(proximity(&params, 0.0), 0.0);
    assert_eq!(proximity(&params, STOP_DISTANCE), 0.0);
    assert_eq!(proximity(&params, REACH_DISTANCE), 1.0);
    assert_eq!(proximity(&params, 50.0), 1.0);

    let mut prev = 0.0;
    for i in 0..=100 {
        let p = proximity(&params, i as f32 * 0.05);
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= prev, "proximity decreased at distance {}", i as f32 * 0.05);
        // continuity: a 0.05-unit distance step moves proximity by < 0.02
        assert!(p - prev < 0.02);
        prev = p;
    }
}

#[test]
fn stride_amplitude_vanishes_when_arrived() {
    let params = WalkerParams::default();
    assert_eq!(stride_amplitude(&params, 0.0), 0.0);
    assert!((stride_amplitude(&params, 1.0) - WALK_AMPLITUDE).abs() < 1e-6);

    let mut prev = 0.0;
    for i in 0..=100 {
        let amp = stride_amplitude(&params, i as f32 / 100.0);
        assert!(amp >= prev);
        prev = amp;
    }
}

#[test]
fn reach_amount_is_inert_until_threshold() {
    let mut prev = f32::MIN;
    for i in 0..=100 {
        let p = i as f32 / 100.0;
        let reach = reach_amount(p);
        if p <= REACH_THRESHOLD {
            assert!(reach <= 0.0, "reach active at proximity {p}");
        } else {
            assert!(reach > 0.0);
        }
        assert!(reach >= prev);
        // continuity under a 0.01 proximity step
        if prev > f32::MIN {
            assert!(reach - prev < 0.02);
        }
        prev = reach;
    }
    assert_eq!(reach_amount(REACH_THRESHOLD), 0.0);
}

#[test]
fn root_holds_within_stop_distance() {
    let mut joints = zero_rest_table();
    let mut walker = bound_walker(&joints);
    for _ in 0..10 {
        walker.update(0.016, Vec2::new(0.4, 0.2), &mut joints);
    }
    assert_eq!(walker.position(), Vec2::ZERO);
}

#[test]
fn far_target_moves_root_by_exactly_move_speed() {
    let mut joints = zero_rest_table();
    let mut walker = bound_walker(&joints);
    walker.update(0.1, Vec2::new(10.0, 0.0), &mut joints);
    assert!((walker.position().x - MOVE_SPEED).abs() < 1e-6);
    assert_eq!(walker.position().y, 0.0);
}

#[test]
fn heading_converges_monotonically_within_clamp() {
    let mut joints = zero_rest_table();
    let mut walker = bound_walker(&joints);
    let mut prev = walker.heading();
    assert_eq!(prev, 0.0);
    for _ in 0..500 {
        walker.update(0.016, Vec2::new(100.0, 0.0), &mut joints);
        let h = walker.heading();
        assert!(h >= prev, "heading regressed");
        assert!(h <= MAX_TURN + 1e-6, "heading exceeded clamp");
        prev = h;
    }
    assert!(MAX_TURN - prev < 0.01, "heading failed to converge: {prev}");
}

#[test]
fn legs_swing_opposite_and_arms_counter_swing() {
    let mut joints = zero_rest_table();
    let mut walker = bound_walker(&joints);
    // distance 100 => proximity saturates at 1, so splay is zero
    walker.update(0.05, Vec2::new(100.0, 0.0), &mut joints);

    let phase = (0.05_f32 * WALK_SPEED).sin() * WALK_AMPLITUDE;
    let reach = reach_amount(1.0);
    let left_leg = joints.get("L_leg_01").unwrap();
    let right_leg = joints.get("R_leg_07").unwrap();
    assert!((left_leg.x - phase).abs() < 1e-6);
    assert!((right_leg.x + phase).abs() < 1e-6);

    let left_shoulder = joints.get("L_shoulder_015").unwrap();
    let right_shoulder = joints.get("R_shoulder_031").unwrap();
    assert!((left_shoulder.x - (-phase - reach)).abs() < 1e-6);
    assert!((right_shoulder.x - (phase - reach)).abs() < 1e-6);
    assert_eq!(left_shoulder.z, 0.0);
    assert_eq!(right_shoulder.z, 0.0);

    // arm joints share their shoulder's motion
    assert_eq!(joints.get("L_arm_019").unwrap(), left_shoulder);
    assert_eq!(joints.get("R_arm_035").unwrap(), right_shoulder);
}

#[test]
fn idle_pose_lifts_and_splays_arms() {
    let mut joints = zero_rest_table();
    let mut walker = bound_walker(&joints);
    // target at the root: proximity 0, no stride, idle arm lift + full splay
    walker.update(0.05, Vec2::ZERO, &mut joints);

    let lift = REACH_THRESHOLD * REACH_SCALE;
    let left_shoulder = joints.get("L_shoulder_015").unwrap();
    let right_shoulder = joints.get("R_shoulder_031").unwrap();
    assert!((left_shoulder.x - lift).abs() < 1e-5);
    assert!((right_shoulder.x - lift).abs() < 1e-5);
    assert!((left_shoulder.z - ARM_SPLAY).abs() < 1e-6);
    assert!((right_shoulder.z + ARM_SPLAY).abs() < 1e-6);

    assert_eq!(joints.get("L_leg_01").unwrap().x, 0.0);
    assert_eq!(joints.get("R_leg_07").unwrap().x, 0.0);
}

#[test]
fn rest_pose_is_the_additive_baseline() {
    let mut joints = zero_rest_table();
    let rest = Vec3::new(0.3, 0.1, -0.2);
    joints.insert("L_leg_01", rest);
    let mut walker = bound_walker(&joints);
    walker.update(0.05, Vec2::new(100.0, 0.0), &mut joints);

    let phase = (0.05_f32 * WALK_SPEED).sin() * WALK_AMPLITUDE;
    let left_leg = joints.get("L_leg_01").unwrap();
    assert!((left_leg.x - (rest.x + phase)).abs() < 1e-6);
    assert_eq!(left_leg.y, rest.y);
    assert_eq!(left_leg.z, rest.z);
}

#[test]
fn missing_joints_are_skipped_silently() {
    let mut joints = JointMap::new();
    let mut walker = bound_walker(&joints);
    walker.update(0.016, Vec2::new(100.0, 0.0), &mut joints);
    // nothing bound, nothing written; the root still moves
    assert!(joints.is_empty());
    assert!(walker.position().x > 0.0);

    // a partial rig animates only what exists
    let mut joints = JointMap::new();
    joints.insert("L_leg_01", Vec3::ZERO);
    let mut walker = bound_walker(&joints);
    walker.update(0.05, Vec2::new(100.0, 0.0), &mut joints);
    assert_eq!(joints.len(), 1);
    assert!(joints.get("L_leg_01").unwrap().x != 0.0);
}

#[test]
fn negative_dt_is_clamped_to_zero() {
    let mut joints_a = zero_rest_table();
    let mut walker_a = bound_walker(&joints_a);
    walker_a.update(0.0, Vec2::new(100.0, 0.0), &mut joints_a);

    let mut joints_b = zero_rest_table();
    let mut walker_b = bound_walker(&joints_b);
    walker_b.update(-3.0, Vec2::new(100.0, 0.0), &mut joints_b);

    assert_eq!(walker_a.time(), walker_b.time());
    assert_eq!(walker_a.position(), walker_b.position());
    assert_eq!(joints_a.get("L_leg_01"), joints_b.get("L_leg_01"));
}

#[test]
fn custom_bindings_redirect_joint_names() {
    let mut bindings = JointBindings::empty();
    bindings.set(JointRole::LeftLeg, "hip.L");
    let mut joints = JointMap::new();
    joints.insert("hip.L", Vec3::ZERO);

    let mut walker = Walker::bind(WalkerParams::default(), bindings, &joints);
    walker.update(0.05, Vec2::new(100.0, 0.0), &mut joints);
    assert!(joints.get("hip.L").unwrap().x != 0.0);
}
