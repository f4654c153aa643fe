use glam::DVec2;
use std::f64::consts::TAU;
use warpfield_core::{Rgba, RingStroke, Surface};
use web_sys as web;

/// [`Surface`] backed by a canvas 2D context.
///
/// Size is captured when the surface is created. Failed canvas calls are
/// ignored so a broken context degrades to nothing drawn.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Resize the canvas backing store and wrap its context.
    pub fn sized(
        canvas: &web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        width: u32,
        height: u32,
    ) -> Self {
        canvas.set_width(width);
        canvas.set_height(height);
        Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(origin.x, origin.y, size.x, size.y);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn stroke_ring(&mut self, ring: &RingStroke) {
        let ctx = &self.ctx;
        ctx.save();
        _ = ctx.translate(ring.center.x, ring.center.y);
        _ = ctx.rotate(ring.rotation_rad);
        let g = &ring.gradient;
        if let Ok(gradient) =
            ctx.create_radial_gradient(0.0, 0.0, g.inner_radius, 0.0, 0.0, g.outer_radius)
        {
            for stop in &g.stops {
                _ = gradient.add_color_stop(stop.offset as f32, &stop.color.css());
            }
            ctx.set_stroke_style_canvas_gradient(&gradient);
        }
        ctx.set_line_width(ring.line_width);
        ctx.begin_path();
        if ctx.arc(0.0, 0.0, ring.radius, 0.0, TAU).is_ok() {
            ctx.stroke();
        }
        ctx.restore();
    }
}
