//! [`Surface`] implementation over a browser `CanvasRenderingContext2d`.

use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::surface::{Hsla, RadialGradient, Stroke, Surface};

pub struct Canvas2dSurface {
    ctx: web::CanvasRenderingContext2d,
    size: Vec2,
}

impl Canvas2dSurface {
    /// Acquire the canvas's 2D context. A canvas whose context cannot be
    /// obtained (already claimed by another context kind, detached element)
    /// is a precondition violation and fails here, never per-frame.
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("not a 2d context: {:?}", e))?;
        Ok(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }

    /// Track the canvas backing size after a resize.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    fn gradient(&self, gradient: &RadialGradient) -> Option<web::CanvasGradient> {
        let g = self
            .ctx
            .create_radial_gradient(
                gradient.from.x as f64,
                gradient.from.y as f64,
                gradient.from_radius.max(0.0) as f64,
                gradient.to.x as f64,
                gradient.to.y as f64,
                gradient.to_radius.max(0.0) as f64,
            )
            .ok()?;
        for stop in &gradient.stops {
            g.add_color_stop(stop.offset, &css_hsla(stop.color)).ok()?;
        }
        Some(g)
    }

    fn trace_circle(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        );
    }
}

fn css_hsla(color: Hsla) -> String {
    format!(
        "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
        color.hue,
        color.saturation * 100.0,
        color.lightness * 100.0,
        color.alpha
    )
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn fill_rect_radial(&mut self, gradient: &RadialGradient) {
        if let Some(g) = self.gradient(gradient) {
            self.ctx.set_fill_style_canvas_gradient(&g);
            self.ctx
                .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.trace_circle(center, radius);
        self.ctx.set_fill_style_str(&css_hsla(color));
        self.ctx.fill();
    }

    fn fill_circle_radial(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient) {
        if let Some(g) = self.gradient(gradient) {
            self.trace_circle(center, radius);
            self.ctx.set_fill_style_canvas_gradient(&g);
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Hsla, width: f32) {
        self.trace_circle(center, radius);
        self.ctx.set_stroke_style_str(&css_hsla(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        self.ctx.begin_path();
        self.ctx.move_to(points[0].x as f64, points[0].y as f64);
        for p in &points[1..] {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.set_stroke_style_str(&css_hsla(stroke.color));
        self.ctx.set_line_width(stroke.width as f64);
        if let Some(shadow) = stroke.shadow {
            self.ctx.set_shadow_color(&css_hsla(shadow.color));
            self.ctx.set_shadow_blur(shadow.blur as f64);
        }
        self.ctx.stroke();
        if stroke.shadow.is_some() {
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn push_clip_circle(&mut self, center: Vec2, radius: f32) {
        self.ctx.save();
        self.trace_circle(center, radius);
        self.ctx.clip();
    }

    fn pop_clip(&mut self) {
        self.ctx.restore();
    }
}
