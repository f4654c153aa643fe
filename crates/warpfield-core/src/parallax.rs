//! Pointer and scroll state consumed by the page layout for parallax offsets.
//!
//! Nothing here renders. Event handlers overwrite the state wholesale and
//! layout code reads the normalized values.

use crate::constants::GLYPH_PARALLAX;
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// CSS property name for this edge.
    pub fn css_property(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

/// Percentage offsets of one decorative glyph from two container edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphAnchor {
    pub horizontal: (Edge, f64),
    pub vertical: (Edge, f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxTracker {
    pointer: DVec2,
    scroll_progress: f64,
}

impl ParallaxTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = DVec2::new(x, y);
    }

    /// Recompute the scroll fraction. A page that does not scroll (or any
    /// non-finite input) reads as 0 rather than NaN.
    pub fn on_scroll(&mut self, scroll_top: f64, document_height: f64, viewport_height: f64) {
        self.scroll_progress = scroll_fraction(scroll_top, document_height, viewport_height);
    }

    /// Pointer position in viewport pixels.
    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    /// Scroll position in `[0, 1]`, 0 at the top.
    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    /// Pointer divided by the viewport size, clamped to `[0, 1]`.
    pub fn normalized_pointer(&self, viewport_width: f64, viewport_height: f64) -> DVec2 {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            (self.pointer / DVec2::new(viewport_width, viewport_height))
                .clamp(DVec2::ZERO, DVec2::ONE)
        } else {
            DVec2::splat(0.5)
        }
    }

    /// Offsets for the three decorative glyphs floating over the hero section.
    pub fn glyph_anchors(&self) -> [GlyphAnchor; 3] {
        let p = self.pointer;
        let offset = |i: usize| {
            let (h, v, k) = GLYPH_PARALLAX[i];
            (h + p.x * k, v + p.y * k)
        };
        let (l0, t0) = offset(0);
        let (r1, t1) = offset(1);
        let (l2, b2) = offset(2);
        [
            GlyphAnchor {
                horizontal: (Edge::Left, l0),
                vertical: (Edge::Top, t0),
            },
            GlyphAnchor {
                horizontal: (Edge::Right, r1),
                vertical: (Edge::Top, t1),
            },
            GlyphAnchor {
                horizontal: (Edge::Left, l2),
                vertical: (Edge::Bottom, b2),
            },
        ]
    }
}

pub fn scroll_fraction(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let range = document_height - viewport_height;
    if range.is_nan() || range <= 0.0 {
        return 0.0;
    }
    let fraction = scroll_top / range;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
