use glam::Vec2;
use rand::Rng;

/// A single procedural arc: an ordered jagged point path plus render styling.
///
/// Bolts are pure rendering descriptors; once generated they are never
/// mutated, only drawn or replaced wholesale when the cache refreshes.
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub points: Vec<Vec2>,
    pub alpha: f32,
    pub width: f32,
    pub hue: f32,
}

/// Fractal midpoint-displacement path from `from` to `to`.
///
/// The chord is split into `max(4, length / detail)` segments and every
/// intermediate point is displaced perpendicular to the chord by a random
/// amount in `[-jitter/2, jitter/2]`. Endpoints stay anchored.
pub fn displaced_path(
    rng: &mut impl Rng,
    from: Vec2,
    to: Vec2,
    detail: f32,
    jitter: f32,
) -> Vec<Vec2> {
    let delta = to - from;
    let len = delta.length();
    if len <= f32::EPSILON {
        return vec![from, to];
    }
    let segments = ((len / detail) as usize).max(4);
    let normal = Vec2::new(-delta.y, delta.x) / len;

    let mut points = Vec::with_capacity(segments + 1);
    points.push(from);
    for i in 1..segments {
        let t = i as f32 / segments as f32;
        let offset = (rng.gen::<f32>() - 0.5) * jitter;
        points.push(from + delta * t + normal * offset);
    }
    points.push(to);
    points
}
