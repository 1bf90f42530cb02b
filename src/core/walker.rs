//! Walk-and-reach pose animation for an articulated model.
//!
//! The animator never owns joints: the rendering engine keeps the joint
//! hierarchy and exposes it through [`JointTable`] (read / mutate a rotation
//! by name). At bind time the animator captures each bound joint's rest
//! rotation once; every update writes `rest + procedural offset` back through
//! the table. Joints missing from the table are skipped silently.

use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

use super::constants::{
    ARM_SPLAY, HEADING_GAIN, MAX_TURN, MOVE_SPEED, REACH_DISTANCE, REACH_SCALE, REACH_THRESHOLD,
    STOP_DISTANCE, WALK_AMPLITUDE, WALK_SPEED,
};

/// The fixed subset of joints the animator drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JointRole {
    LeftShoulder,
    RightShoulder,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl JointRole {
    pub const ALL: [JointRole; 6] = [
        JointRole::LeftShoulder,
        JointRole::RightShoulder,
        JointRole::LeftArm,
        JointRole::RightArm,
        JointRole::LeftLeg,
        JointRole::RightLeg,
    ];

    /// Parse the snake_case key used by the JS bridge.
    pub fn from_key(key: &str) -> Option<JointRole> {
        match key {
            "left_shoulder" => Some(JointRole::LeftShoulder),
            "right_shoulder" => Some(JointRole::RightShoulder),
            "left_arm" => Some(JointRole::LeftArm),
            "right_arm" => Some(JointRole::RightArm),
            "left_leg" => Some(JointRole::LeftLeg),
            "right_leg" => Some(JointRole::RightLeg),
            _ => None,
        }
    }
}

/// Role-to-joint-name mapping. Defaults match the shipped robot model's bone
/// names; hosts with a different skeleton override names per role.
#[derive(Clone, Debug)]
pub struct JointBindings {
    names: FnvHashMap<JointRole, String>,
}

impl Default for JointBindings {
    fn default() -> Self {
        let mut bindings = JointBindings::empty();
        bindings.set(JointRole::LeftShoulder, "L_shoulder_015");
        bindings.set(JointRole::RightShoulder, "R_shoulder_031");
        bindings.set(JointRole::LeftArm, "L_arm_019");
        bindings.set(JointRole::RightArm, "R_arm_035");
        bindings.set(JointRole::LeftLeg, "L_leg_01");
        bindings.set(JointRole::RightLeg, "R_leg_07");
        bindings
    }
}

impl JointBindings {
    pub fn empty() -> Self {
        Self {
            names: FnvHashMap::default(),
        }
    }

    pub fn set(&mut self, role: JointRole, name: impl Into<String>) {
        self.names.insert(role, name.into());
    }

    pub fn name(&self, role: JointRole) -> Option<&str> {
        self.names.get(&role).map(String::as_str)
    }
}

/// Non-owning access to the engine's joint hierarchy: read and mutate a local
/// rotation (Euler radians) by joint name.
pub trait JointTable {
    fn rotation(&self, name: &str) -> Option<Vec3>;
    fn set_rotation(&mut self, name: &str, rotation: Vec3);
}

/// Plain name-keyed joint store. Backs the JS bridge (where the host registers
/// each loaded joint once) and the native tests.
#[derive(Clone, Debug, Default)]
pub struct JointMap {
    rotations: FnvHashMap<String, Vec3>,
}

impl JointMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rotation: Vec3) {
        self.rotations.insert(name.into(), rotation);
    }

    pub fn get(&self, name: &str) -> Option<Vec3> {
        self.rotations.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }
}

impl JointTable for JointMap {
    fn rotation(&self, name: &str) -> Option<Vec3> {
        self.get(name)
    }

    fn set_rotation(&mut self, name: &str, rotation: Vec3) {
        self.rotations.insert(name.to_owned(), rotation);
    }
}

/// Locomotion and gait tuning.
#[derive(Clone, Debug)]
pub struct WalkerParams {
    pub stop_distance: f32,
    pub reach_distance: f32,
    pub move_speed: f32,
    pub walk_speed: f32,
    pub walk_amplitude: f32,
    pub max_turn: f32,
}

impl Default for WalkerParams {
    fn default() -> Self {
        Self {
            stop_distance: STOP_DISTANCE,
            reach_distance: REACH_DISTANCE,
            move_speed: MOVE_SPEED,
            walk_speed: WALK_SPEED,
            walk_amplitude: WALK_AMPLITUDE,
            max_turn: MAX_TURN,
        }
    }
}

/// Normalized [0, 1] measure of target distance within the stop/reach band.
/// Master blend factor for gait and reach animation.
pub fn proximity(params: &WalkerParams, distance: f32) -> f32 {
    ((distance - params.stop_distance) / (params.reach_distance - params.stop_distance))
        .clamp(0.0, 1.0)
}

/// Peak leg/shoulder swing in radians at the given proximity.
pub fn stride_amplitude(params: &WalkerParams, proximity: f32) -> f32 {
    params.walk_amplitude * proximity
}

/// Shoulder lift blend; at or below [`REACH_THRESHOLD`] the value is negative
/// and the pose holds its idle arm lift instead of reaching.
pub fn reach_amount(proximity: f32) -> f32 {
    (proximity - REACH_THRESHOLD) * REACH_SCALE
}

pub struct Walker {
    params: WalkerParams,
    bindings: JointBindings,
    rest_pose: FnvHashMap<JointRole, Vec3>,
    time: f32,
    heading: f32,
    position: Vec2,
}

impl Walker {
    /// Capture the rest pose of every bound joint present in `joints` and
    /// start at the origin. Absent joints simply never animate.
    pub fn bind(params: WalkerParams, bindings: JointBindings, joints: &dyn JointTable) -> Self {
        let mut rest_pose = FnvHashMap::default();
        for role in JointRole::ALL {
            if let Some(rotation) = bindings.name(role).and_then(|name| joints.rotation(name)) {
                rest_pose.insert(role, rotation);
            }
        }
        Self {
            params,
            bindings,
            rest_pose,
            time: 0.0,
            heading: 0.0,
            position: Vec2::ZERO,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Smoothed root heading in radians, clamped to `±max_turn`.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the gait by `dt` seconds (negative values clamp to 0) and move
    /// the root toward `target`, writing the resulting pose through `joints`.
    pub fn update(&mut self, dt: f32, target: Vec2, joints: &mut dyn JointTable) {
        self.time += dt.max(0.0);

        let delta = target - self.position;
        let distance = delta.length();
        let proximity = proximity(&self.params, distance);

        // Move toward the target; the step shrinks both as the remaining
        // distance approaches stop_distance and as proximity drops, so the
        // root never overshoots the stop ring.
        if distance > self.params.stop_distance {
            let step = self
                .params
                .move_speed
                .min(distance - self.params.stop_distance)
                * proximity;
            self.position += delta / distance * step;
        }

        // Face the target, smoothed per update rather than per second (the
        // caller runs at display refresh).
        let desired = (delta.x * 0.5).clamp(-self.params.max_turn, self.params.max_turn);
        self.heading += (desired - self.heading) * HEADING_GAIN;

        // Gait swing fades out as the walker arrives.
        let walk_phase = (self.time * self.params.walk_speed).sin() * stride_amplitude(&self.params, proximity);
        let reach = reach_amount(proximity);
        let splay = (1.0 - proximity) * ARM_SPLAY;

        self.apply(joints, JointRole::LeftLeg, Vec3::new(walk_phase, 0.0, 0.0));
        self.apply(joints, JointRole::RightLeg, Vec3::new(-walk_phase, 0.0, 0.0));

        // Arms swing opposite the legs; arm joints share their shoulder's
        // motion.
        let left_upper = Vec3::new(-walk_phase - reach, 0.0, splay);
        let right_upper = Vec3::new(walk_phase - reach, 0.0, -splay);
        self.apply(joints, JointRole::LeftShoulder, left_upper);
        self.apply(joints, JointRole::RightShoulder, right_upper);
        self.apply(joints, JointRole::LeftArm, left_upper);
        self.apply(joints, JointRole::RightArm, right_upper);
    }

    fn apply(&self, joints: &mut dyn JointTable, role: JointRole, offset: Vec3) {
        let (Some(name), Some(rest)) = (self.bindings.name(role), self.rest_pose.get(&role)) else {
            return;
        };
        joints.set_rotation(name, *rest + offset);
    }
}
