//! Drawing-surface abstraction for the plasma effect.
//!
//! The effect core never talks to a browser canvas directly; it issues draw
//! calls against this trait so the per-frame logic stays target-agnostic and
//! natively testable. The web frontend implements it over
//! `CanvasRenderingContext2d`.

use glam::Vec2;
use smallvec::SmallVec;

/// HSLA color matching the CSS `hsla()` model.
///
/// `hue` is in degrees; `saturation`, `lightness` and `alpha` are 0..=1
/// fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub const TRANSPARENT: Hsla = Hsla::new(0.0, 0.0, 0.0, 0.0);
}

/// One ramp entry of a radial gradient; `offset` is 0..=1 along the ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Hsla,
}

/// Two-circle radial gradient ramp, mirroring Canvas2D semantics.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub from: Vec2,
    pub from_radius: f32,
    pub to: Vec2,
    pub to_radius: f32,
    pub stops: SmallVec<[GradientStop; 4]>,
}

impl RadialGradient {
    pub fn new(from: Vec2, from_radius: f32, to: Vec2, to_radius: f32) -> Self {
        Self {
            from,
            from_radius,
            to,
            to_radius,
            stops: SmallVec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Hsla) -> Self {
        self.stops.push(GradientStop { offset, color });
        self
    }
}

/// Glow parameters applied to a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Hsla,
    pub blur: f32,
}

/// Stroke styling for polylines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Hsla,
    pub width: f32,
    pub shadow: Option<Shadow>,
}

/// Capabilities the plasma effect needs from a 2D drawing surface:
/// path construction, strokes with width/color/blur, radial gradient fills,
/// clear, and circle primitives.
pub trait Surface {
    /// Erase the whole surface.
    fn clear(&mut self);
    /// Fill the entire surface rectangle with a radial gradient.
    fn fill_rect_radial(&mut self, gradient: &RadialGradient);
    /// Fill a circle with a solid color.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla);
    /// Fill a circle with a radial gradient.
    fn fill_circle_radial(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient);
    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Hsla, width: f32);
    /// Stroke an open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Vec2], stroke: &Stroke);
    /// Restrict subsequent drawing to a circle. Must be balanced by
    /// [`Surface::pop_clip`].
    fn push_clip_circle(&mut self, center: Vec2, radius: f32);
    /// Undo the most recent clip.
    fn pop_clip(&mut self);
}
