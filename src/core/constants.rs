use glam::Vec2;
use std::f32::consts::PI;

// Shared tuning constants for both effects, used by the web frontend.

// Walker locomotion
pub const STOP_DISTANCE: f32 = 0.5; // world units; closer than this the root holds still
pub const REACH_DISTANCE: f32 = 3.2; // world units; at or beyond this proximity saturates at 1
pub const MOVE_SPEED: f32 = 0.02; // world units per update at full proximity
pub const WALK_SPEED: f32 = 6.0; // gait frequency (radians per second of accumulated time)
pub const WALK_AMPLITUDE: f32 = 0.4; // radians of leg/shoulder swing at full proximity

// Walker heading
pub const MAX_TURN: f32 = PI * 0.4; // clamp on the desired heading angle
pub const HEADING_GAIN: f32 = 0.08; // per-update smoothing toward the desired heading (60 fps caller assumed)

// Walker reach pose
pub const REACH_THRESHOLD: f32 = 0.8; // proximity above which the reach blend becomes positive
pub const REACH_SCALE: f32 = PI * 0.4; // radians of shoulder lift per unit of proximity past the threshold
pub const ARM_SPLAY: f32 = 0.3; // lateral shoulder rotation as proximity falls from 1

// Plasma configuration defaults
pub const DEFAULT_BALL_SIZE: f32 = 0.15; // ball radius as a fraction of the shorter surface side
pub const DEFAULT_REACH_MULTIPLIER: f32 = 4.0; // pointer trigger distance in ball radii
pub const DEFAULT_SPEED: f32 = 0.3; // bolt refresh cadence; 0.1 = slow/persistent, 1.0 = fast/flickery

// Plasma frame stepping
// Synthetic per-frame step: bolts advance per frame count, not wall clock,
// so visual speed tracks the display refresh rate.
pub const SYNTHETIC_FRAME_STEP: f32 = 0.016;

// Sentinel pointer position meaning "not over the surface".
pub const OFF_SURFACE: Vec2 = Vec2::new(-9999.0, -9999.0);

// Internal bolt generation (fractions of the ball radius)
pub const INTERNAL_BOLTS_MIN: u32 = 6; // base arcs per batch: 6..=9
pub const INTERNAL_BOLTS_EXTRA: u32 = 4;
pub const INNER_BAND_MIN: f32 = 0.15; // start-point radius band 15%..45%
pub const INNER_BAND_SPAN: f32 = 0.3;
pub const OUTER_BAND_MIN: f32 = 0.6; // end-point radius band 60%..95%
pub const OUTER_BAND_SPAN: f32 = 0.35;
pub const INTERNAL_HUE_MIN: f32 = 240.0; // hue range [240, 300)
pub const INTERNAL_HUE_SPAN: f32 = 60.0;
pub const INTERNAL_DETAIL: f32 = 8.0; // px of chord length per path segment
pub const INTERNAL_JITTER_FRAC: f32 = 0.2; // perpendicular jitter as a fraction of the ball radius
pub const FORK_PROBABILITY: f32 = 0.4; // chance a base arc spawns a forked sub-arc

// External bolt generation
pub const EXTERNAL_BAND_INNER: f32 = 0.5; // arcs only when pointer distance exceeds this many radii
pub const MIN_EXTERNAL_INTENSITY: f32 = 0.05; // falloff intensities at or below this draw nothing
pub const EXTERNAL_HUE_MIN: f32 = 250.0; // hue range [250, 290)
pub const EXTERNAL_HUE_SPAN: f32 = 40.0;
pub const EXTERNAL_DETAIL: f32 = 12.0;
pub const EXTERNAL_JITTER_FRAC: f32 = 0.15; // perpendicular jitter as a fraction of the arc length
