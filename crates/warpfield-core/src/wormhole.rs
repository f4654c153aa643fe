//! Rotating ring tunnel.
//!
//! Ring layout is derived each frame from a single `rotation` angle, so the
//! engine stores no per-ring state.

use crate::color::Rgba;
use crate::constants::{
    RING_ALPHA_FALLOFF, RING_ANGLE_STEP_DEG, RING_BAND_WIDTH, RING_BASE_ALPHA, RING_BASE_RADIUS,
    RING_COUNT, RING_INNER_COLOR, RING_LINE_WIDTH, RING_OUTER_COLOR, RING_RADIUS_STEP,
    ROTATION_STEP_DEG, WORMHOLE_SIZE,
};
use crate::error::EngineError;
use crate::surface::{GradientStop, RadialGradient, RingStroke, Surface};
use glam::DVec2;

#[derive(Clone, Debug)]
pub struct WormholeParams {
    pub size: f64,
    pub ring_count: usize,
    pub base_radius: f64,
    pub radius_step: f64,
    pub angle_step_deg: f64,
    pub band_width: f64,
    pub line_width: f64,
    pub base_alpha: f64,
    pub alpha_falloff: f64,
    /// Degrees added per frame.
    pub rotation_step_deg: f64,
    pub inner_color: Rgba,
    pub outer_color: Rgba,
}

impl Default for WormholeParams {
    fn default() -> Self {
        Self {
            size: WORMHOLE_SIZE as f64,
            ring_count: RING_COUNT,
            base_radius: RING_BASE_RADIUS,
            radius_step: RING_RADIUS_STEP,
            angle_step_deg: RING_ANGLE_STEP_DEG,
            band_width: RING_BAND_WIDTH,
            line_width: RING_LINE_WIDTH,
            base_alpha: RING_BASE_ALPHA,
            alpha_falloff: RING_ALPHA_FALLOFF,
            rotation_step_deg: ROTATION_STEP_DEG,
            inner_color: RING_INNER_COLOR,
            outer_color: RING_OUTER_COLOR,
        }
    }
}

/// Layout of one ring for the current rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub index: usize,
    pub radius: f64,
    pub angle_deg: f64,
    /// Peak alpha of the gradient band, never negative.
    pub alpha: f64,
}

pub struct Wormhole {
    params: WormholeParams,
    rotation: f64,
}

impl Wormhole {
    pub fn new(params: WormholeParams) -> Result<Self, EngineError> {
        if !(params.size.is_finite() && params.size > 0.0) {
            return Err(EngineError::EmptySurface {
                width: params.size,
                height: params.size,
            });
        }
        log::info!(
            "[wormhole] {} rings on {}x{} surface",
            params.ring_count,
            params.size,
            params.size
        );
        Ok(Self {
            params,
            rotation: 0.0,
        })
    }

    pub fn params(&self) -> &WormholeParams {
        &self.params
    }

    /// Accumulated rotation in degrees; grows without bound.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation folded into `[0, 360)`, which renders identically.
    pub fn rotation_wrapped(&self) -> f64 {
        self.rotation.rem_euclid(360.0)
    }

    pub fn ring(&self, index: usize) -> Ring {
        let i = index as f64;
        Ring {
            index,
            radius: self.params.base_radius + i * self.params.radius_step,
            angle_deg: self.rotation + i * self.params.angle_step_deg,
            alpha: (self.params.base_alpha - i * self.params.alpha_falloff).max(0.0),
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = Ring> + '_ {
        (0..self.params.ring_count).map(|i| self.ring(i))
    }

    pub fn advance(&mut self) {
        self.rotation += self.params.rotation_step_deg;
    }

    /// Clear the surface and stroke every ring at the current rotation.
    pub fn paint(&self, surface: &mut dyn Surface) {
        surface.clear();
        let center = DVec2::splat(self.params.size / 2.0);
        for ring in self.rings() {
            surface.stroke_ring(&self.stroke_for(ring, center));
        }
    }

    /// One scheduled frame: paint, then rotate.
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        self.paint(surface);
        self.advance();
    }

    fn stroke_for(&self, ring: Ring, center: DVec2) -> RingStroke {
        RingStroke {
            center,
            rotation_rad: ring.angle_deg.to_radians(),
            radius: ring.radius,
            line_width: self.params.line_width,
            gradient: RadialGradient {
                inner_radius: (ring.radius - self.params.band_width).max(0.0),
                outer_radius: ring.radius,
                stops: [
                    GradientStop {
                        offset: 0.0,
                        color: self.params.inner_color,
                    },
                    GradientStop {
                        offset: 0.5,
                        color: self.params.inner_color.with_alpha(ring.alpha),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: self.params.outer_color,
                    },
                ],
            },
        }
    }
}
