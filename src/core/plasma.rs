//! Interactive plasma-ball effect: a glassy sphere filled with cached fractal
//! lightning, arcing out toward the pointer when it comes near.
//!
//! The per-frame function is a pure callback against [`Surface`]; scheduling
//! belongs to the web wrapper. Time advances by a fixed synthetic step per
//! frame (not wall clock) so the flicker cadence tracks the display refresh
//! rate — the walker integrates real delta time, this effect deliberately does
//! not.

use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;
use thiserror::Error;

use super::bolt::{displaced_path, Bolt};
use super::constants::{
    DEFAULT_BALL_SIZE, DEFAULT_REACH_MULTIPLIER, DEFAULT_SPEED, EXTERNAL_BAND_INNER,
    EXTERNAL_DETAIL, EXTERNAL_HUE_MIN, EXTERNAL_HUE_SPAN, EXTERNAL_JITTER_FRAC, FORK_PROBABILITY,
    INNER_BAND_MIN, INNER_BAND_SPAN, INTERNAL_BOLTS_EXTRA, INTERNAL_BOLTS_MIN, INTERNAL_DETAIL,
    INTERNAL_HUE_MIN, INTERNAL_HUE_SPAN, INTERNAL_JITTER_FRAC, MIN_EXTERNAL_INTENSITY,
    OFF_SURFACE, OUTER_BAND_MIN, OUTER_BAND_SPAN, SYNTHETIC_FRAME_STEP,
};
use super::surface::{Hsla, RadialGradient, Shadow, Stroke, Surface};

#[derive(Debug, Error, PartialEq)]
pub enum PlasmaConfigError {
    #[error("ball size fraction must be in (0, 0.5], got {0}")]
    BallSize(f32),
    #[error("speed must be positive, got {0}")]
    Speed(f32),
    #[error("reach multiplier must exceed 1, got {0}")]
    ReachMultiplier(f32),
}

#[derive(Clone, Debug)]
pub struct PlasmaConfig {
    /// Ball radius as a fraction of the container's shorter side.
    pub ball_size: f32,
    /// Pointer trigger distance as a multiple of the ball radius.
    pub reach_multiplier: f32,
    /// Bolt refresh cadence; regeneration happens every `round(1 / speed)`
    /// frames.
    pub speed: f32,
    /// Skip the opaque background fill (see-through embedding).
    pub transparent: bool,
}

impl Default for PlasmaConfig {
    fn default() -> Self {
        Self {
            ball_size: DEFAULT_BALL_SIZE,
            reach_multiplier: DEFAULT_REACH_MULTIPLIER,
            speed: DEFAULT_SPEED,
            transparent: false,
        }
    }
}

impl PlasmaConfig {
    /// Reject configurations that would produce degenerate geometry before
    /// any drawing happens.
    pub fn validate(&self) -> Result<(), PlasmaConfigError> {
        if !(self.ball_size > 0.0 && self.ball_size <= 0.5) {
            return Err(PlasmaConfigError::BallSize(self.ball_size));
        }
        if !(self.speed > 0.0) {
            return Err(PlasmaConfigError::Speed(self.speed));
        }
        if !(self.reach_multiplier > 1.0) {
            return Err(PlasmaConfigError::ReachMultiplier(self.reach_multiplier));
        }
        Ok(())
    }
}

pub struct PlasmaBall {
    config: PlasmaConfig,
    size: Vec2,
    center: Vec2,
    ball_radius: f32,
    pointer: Vec2,
    time: f32,
    frame_count: i64,
    last_bolt_frame: i64,
    internal_bolts: Option<Vec<Bolt>>,
    external_bolts: Option<Vec<Bolt>>,
    rng: StdRng,
}

impl PlasmaBall {
    pub fn new(
        config: PlasmaConfig,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self, PlasmaConfigError> {
        config.validate()?;
        let mut ball = Self {
            config,
            size: Vec2::ZERO,
            center: Vec2::ZERO,
            ball_radius: 0.0,
            pointer: OFF_SURFACE,
            time: 0.0,
            frame_count: 0,
            last_bolt_frame: -999,
            internal_bolts: None,
            external_bolts: None,
            rng: StdRng::seed_from_u64(seed),
        };
        ball.resize(width, height);
        Ok(ball)
    }

    /// Recompute center and ball radius from new surface bounds. Animation
    /// state and cache staleness are deliberately left untouched.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.center = self.size * 0.5;
        self.ball_radius = width.min(height) * self.config.ball_size;
    }

    /// Latest pointer position in surface pixels.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Pointer left the surface; disables cursor marker and external arcs.
    pub fn clear_pointer(&mut self) {
        self.pointer = OFF_SURFACE;
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_radius
    }

    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn internal_bolts(&self) -> Option<&[Bolt]> {
        self.internal_bolts.as_deref()
    }

    pub fn external_bolts(&self) -> Option<&[Bolt]> {
        self.external_bolts.as_deref()
    }

    /// Render one frame. Invoked once per render tick; cannot fail.
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        self.time += SYNTHETIC_FRAME_STEP;
        self.frame_count += 1;

        surface.clear();
        if !self.config.transparent {
            self.draw_background(surface);
        }
        self.draw_sphere(surface);

        surface.push_clip_circle(self.center, self.ball_radius - 1.0);
        self.draw_core(surface);
        let regen = self.should_regenerate();
        if regen || self.internal_bolts.is_none() {
            self.internal_bolts = Some(self.generate_internal_bolts());
        }
        if let Some(bolts) = &self.internal_bolts {
            draw_bolts(surface, bolts);
        }
        surface.pop_clip();

        let offset = self.pointer - self.center;
        let dist = offset.length();
        let threshold = self.ball_radius * self.config.reach_multiplier;
        if dist < threshold && dist > self.ball_radius * EXTERNAL_BAND_INNER {
            let intensity =
                (1.0 - (dist - self.ball_radius) / (threshold - self.ball_radius)).clamp(0.0, 1.0);
            if intensity > MIN_EXTERNAL_INTENSITY {
                if regen || self.external_bolts.is_none() {
                    self.external_bolts = Some(self.generate_external_bolts(intensity));
                }
                if let Some(bolts) = &self.external_bolts {
                    draw_bolts(surface, bolts);
                }
                self.draw_impact_glow(surface, intensity);
            }
        }

        self.draw_cursor(surface);
    }

    /// Cache staleness check: true once per refresh interval, advancing the
    /// regeneration frame marker as a side effect.
    fn should_regenerate(&mut self) -> bool {
        let interval = (1.0 / self.config.speed).round().max(1.0) as i64;
        if self.frame_count - self.last_bolt_frame >= interval {
            self.last_bolt_frame = self.frame_count;
            return true;
        }
        false
    }

    fn generate_internal_bolts(&mut self) -> Vec<Bolt> {
        let r = self.ball_radius;
        let count = INTERNAL_BOLTS_MIN + self.rng.gen_range(0..INTERNAL_BOLTS_EXTRA);
        let mut bolts = Vec::with_capacity(count as usize * 2);
        for _ in 0..count {
            let angle1 = self.rng.gen_range(0.0..TAU);
            let angle2 = angle1 + (self.rng.gen::<f32>() - 0.5) * std::f32::consts::PI * 1.4;
            let r1 = r * (INNER_BAND_MIN + self.rng.gen::<f32>() * INNER_BAND_SPAN);
            let r2 = r * (OUTER_BAND_MIN + self.rng.gen::<f32>() * OUTER_BAND_SPAN);
            let from = self.center + Vec2::from_angle(angle1) * r1;
            let to = self.center + Vec2::from_angle(angle2) * r2;
            let hue = INTERNAL_HUE_MIN + self.rng.gen::<f32>() * INTERNAL_HUE_SPAN;
            let alpha = 0.3 + self.rng.gen::<f32>() * 0.5;
            let points = displaced_path(
                &mut self.rng,
                from,
                to,
                INTERNAL_DETAIL,
                r * INTERNAL_JITTER_FRAC,
            );
            let width = 0.8 + self.rng.gen::<f32>() * 0.5;
            let fork = self.rng.gen::<f32>() < FORK_PROBABILITY && points.len() > 3;
            if fork {
                let fork_idx = (points.len() as f32 * (0.4 + self.rng.gen::<f32>() * 0.4)) as usize;
                let fork_idx = fork_idx.min(points.len() - 1);
                let fork_angle = angle2 + (self.rng.gen::<f32>() - 0.5) * 1.2;
                let fork_r = r * (0.4 + self.rng.gen::<f32>() * 0.5);
                let fork_end = self.center + Vec2::from_angle(fork_angle) * fork_r;
                let fork_points =
                    displaced_path(&mut self.rng, points[fork_idx], fork_end, 6.0, r * 0.12);
                bolts.push(Bolt {
                    points,
                    alpha,
                    width,
                    hue,
                });
                bolts.push(Bolt {
                    points: fork_points,
                    alpha: alpha * 0.5,
                    width: 0.5,
                    hue,
                });
            } else {
                bolts.push(Bolt {
                    points,
                    alpha,
                    width,
                    hue,
                });
            }
        }
        bolts
    }

    fn generate_external_bolts(&mut self, intensity: f32) -> Vec<Bolt> {
        let offset = self.pointer - self.center;
        let angle = offset.y.atan2(offset.x);
        let count = 1 + (intensity * 3.0) as usize;
        let mut bolts = Vec::with_capacity(count * 3);
        for b in 0..count {
            let spread = (b as f32 - (count as f32 - 1.0) / 2.0) * 0.08;
            let end = self.pointer
                + Vec2::new(
                    (self.rng.gen::<f32>() - 0.5) * 10.0,
                    (self.rng.gen::<f32>() - 0.5) * 10.0,
                );
            let start = self.center + Vec2::from_angle(angle + spread) * self.ball_radius;
            let bolt_dist = (end - start).length();
            let points = displaced_path(
                &mut self.rng,
                start,
                end,
                EXTERNAL_DETAIL,
                bolt_dist * EXTERNAL_JITTER_FRAC,
            );
            let hue = EXTERNAL_HUE_MIN + self.rng.gen::<f32>() * EXTERNAL_HUE_SPAN;
            let alpha = 0.6 + intensity * 0.4;
            let width = 1.0 + intensity * 1.5;
            let mut forks = Vec::new();
            for _ in 0..2 {
                if self.rng.gen::<f32>() < FORK_PROBABILITY {
                    let fi = (points.len() as f32 * (0.2 + self.rng.gen::<f32>() * 0.6)) as usize;
                    let fi = fi.min(points.len() - 1);
                    let fork_angle = angle + (self.rng.gen::<f32>() - 0.5) * 1.5;
                    let fork_len = bolt_dist * (0.1 + self.rng.gen::<f32>() * 0.25);
                    let fork_end = points[fi] + Vec2::from_angle(fork_angle) * fork_len;
                    let fork_points =
                        displaced_path(&mut self.rng, points[fi], fork_end, 8.0, fork_len * 0.2);
                    forks.push(Bolt {
                        points: fork_points,
                        alpha: alpha * 0.35,
                        width: 0.6,
                        hue: hue + 20.0,
                    });
                }
            }
            bolts.push(Bolt {
                points,
                alpha,
                width,
                hue,
            });
            bolts.append(&mut forks);
        }
        bolts
    }

    fn draw_background(&self, surface: &mut dyn Surface) {
        let radius = self.size.x.max(self.size.y) * 0.7;
        let gradient = RadialGradient::new(self.center, 0.0, self.center, radius)
            .stop(0.0, Hsla::new(252.0, 0.38, 0.05, 1.0))
            .stop(1.0, Hsla::new(249.0, 0.78, 0.02, 1.0));
        surface.fill_rect_radial(&gradient);
    }

    /// Static sphere shell: outer glow, body fill, rim stroke, specular
    /// highlight. Deterministic geometry, drawn unconditionally every frame.
    fn draw_sphere(&self, surface: &mut dyn Surface) {
        let c = self.center;
        let r = self.ball_radius;

        let outer_glow = RadialGradient::new(c, r * 0.8, c, r * 1.8)
            .stop(0.0, Hsla::new(260.0, 0.6, 0.4, 0.08))
            .stop(0.5, Hsla::new(260.0, 0.6, 0.3, 0.03))
            .stop(1.0, Hsla::TRANSPARENT);
        surface.fill_rect_radial(&outer_glow);

        let body = RadialGradient::new(c - Vec2::splat(r * 0.3), 0.0, c, r)
            .stop(0.0, Hsla::new(260.0, 0.2, 0.18, 0.4))
            .stop(0.7, Hsla::new(260.0, 0.3, 0.1, 0.6))
            .stop(0.95, Hsla::new(260.0, 0.4, 0.15, 0.3))
            .stop(1.0, Hsla::new(260.0, 0.5, 0.25, 0.15));
        surface.fill_circle_radial(c, r, &body);

        surface.stroke_circle(c, r, Hsla::new(260.0, 0.4, 0.35, 0.25), 1.5);

        let hl = c - Vec2::splat(r * 0.25);
        let highlight = RadialGradient::new(hl, 0.0, hl, r * 0.35)
            .stop(0.0, Hsla::new(0.0, 0.0, 1.0, 0.06))
            .stop(1.0, Hsla::TRANSPARENT);
        surface.fill_circle_radial(hl, r * 0.35, &highlight);
    }

    fn draw_core(&mut self, surface: &mut dyn Surface) {
        let pulse_r = 3.0 + (self.time * 3.0).sin() * 1.5 + self.rng.gen::<f32>();
        let glow = RadialGradient::new(self.center, 0.0, self.center, pulse_r * 6.0)
            .stop(0.0, Hsla::new(270.0, 0.8, 0.95, 0.9))
            .stop(0.2, Hsla::new(260.0, 0.9, 0.75, 0.5))
            .stop(0.5, Hsla::new(250.0, 0.8, 0.5, 0.15))
            .stop(1.0, Hsla::TRANSPARENT);
        surface.fill_circle_radial(self.center, pulse_r * 6.0, &glow);

        let flicker = 0.7 + self.rng.gen::<f32>() * 0.3;
        surface.fill_circle(self.center, pulse_r, Hsla::new(270.0, 0.5, 0.98, flicker));
    }

    fn draw_impact_glow(&self, surface: &mut dyn Surface, intensity: f32) {
        let radius = 20.0 + intensity * 15.0;
        let glow = RadialGradient::new(self.pointer, 0.0, self.pointer, radius)
            .stop(0.0, Hsla::new(260.0, 0.8, 0.85, intensity * 0.4))
            .stop(1.0, Hsla::TRANSPARENT);
        surface.fill_circle_radial(self.pointer, radius, &glow);
    }

    fn draw_cursor(&self, surface: &mut dyn Surface) {
        if self.pointer.x < 0.0 {
            return;
        }
        let glow = RadialGradient::new(self.pointer, 0.0, self.pointer, 12.0)
            .stop(0.0, Hsla::new(260.0, 0.9, 0.7, 0.6))
            .stop(1.0, Hsla::TRANSPARENT);
        surface.fill_circle_radial(self.pointer, 12.0, &glow);
        surface.fill_circle(self.pointer, 3.0, Hsla::new(260.0, 0.7, 0.85, 0.8));
    }
}

/// Fake glow: each bolt renders as three concentric strokes of decreasing
/// width and increasing brightness, with a blurred outer shadow.
fn draw_bolts(surface: &mut dyn Surface, bolts: &[Bolt]) {
    for bolt in bolts {
        if bolt.points.len() < 2 {
            continue;
        }
        let halo = Shadow {
            color: Hsla::new(bolt.hue, 0.9, 0.7, bolt.alpha * 0.5),
            blur: 20.0,
        };
        surface.stroke_polyline(
            &bolt.points,
            &Stroke {
                color: Hsla::new(bolt.hue, 0.8, 0.6, bolt.alpha * 0.3),
                width: bolt.width * 4.0,
                shadow: Some(halo),
            },
        );
        surface.stroke_polyline(
            &bolt.points,
            &Stroke {
                color: Hsla::new(bolt.hue, 0.7, 0.75, bolt.alpha * 0.6),
                width: bolt.width * 2.0,
                shadow: Some(Shadow { blur: 10.0, ..halo }),
            },
        );
        surface.stroke_polyline(
            &bolt.points,
            &Stroke {
                color: Hsla::new(bolt.hue, 0.5, 0.95, bolt.alpha * 0.9),
                width: bolt.width,
                shadow: Some(Shadow { blur: 5.0, ..halo }),
            },
        );
    }
}
