//! Drawing surface abstraction the engines paint onto.
//!
//! The trait exposes only the handful of primitives the animations need, so
//! the engines stay free of platform APIs. The web frontend implements it on
//! top of `CanvasRenderingContext2d`; tests use [`RecordingSurface`].

use crate::color::Rgba;
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Radial gradient centered on the (already transformed) origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: [GradientStop; 3],
}

/// One gradient-stroked circle drawn in its own rotated frame.
///
/// Implementations must isolate the transform: translate to `center`, rotate
/// by `rotation_rad`, stroke, then restore so that consecutive rings never
/// compose their transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStroke {
    pub center: DVec2,
    pub rotation_rad: f64,
    pub radius: f64,
    pub line_width: f64,
    pub gradient: RadialGradient,
}

pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Reset every pixel to transparent.
    fn clear(&mut self);
    /// Composite a flat color over a rectangle (source-over, not a replace).
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    fn stroke_ring(&mut self, ring: &RingStroke);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: DVec2,
        size: DVec2,
        color: Rgba,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    StrokeRing(RingStroke),
}

/// Surface that records every call instead of rasterizing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn rings(&self) -> impl Iterator<Item = &RingStroke> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeRing(r) => Some(r),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_ring(&mut self, ring: &RingStroke) {
        self.commands.push(DrawCommand::StrokeRing(*ring));
    }
}
