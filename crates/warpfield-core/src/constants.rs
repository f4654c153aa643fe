use crate::color::Rgba;

// Shared visual tuning constants used by the engines and the web frontend.

// Starfield
pub const STAR_COUNT: usize = 200;
pub const STAR_Z_STEP: f64 = 2.0; // depth travelled per frame, not per second
pub const STAR_MAX_SIZE: f64 = 2.0; // base radius is drawn from [0, STAR_MAX_SIZE)
pub const STAR_SIZE_SCALE: f64 = 3.0; // radius multiplier at closest approach
pub const STAR_COLOR: Rgba = Rgba::new(255, 255, 255, 1.0);
pub const TRAIL_FADE: Rgba = Rgba::new(0, 0, 0, 0.1); // painted over the frame instead of a clear

// Wormhole
pub const WORMHOLE_SIZE: u32 = 800;
pub const RING_COUNT: usize = 12;
pub const RING_BASE_RADIUS: f64 = 50.0;
pub const RING_RADIUS_STEP: f64 = 30.0;
pub const RING_ANGLE_STEP_DEG: f64 = 30.0;
pub const RING_BAND_WIDTH: f64 = 20.0; // gradient runs from radius - band to radius
pub const RING_LINE_WIDTH: f64 = 3.0;
pub const RING_BASE_ALPHA: f64 = 0.3;
pub const RING_ALPHA_FALLOFF: f64 = 0.02; // per ring index
pub const ROTATION_STEP_DEG: f64 = 0.5; // per frame
pub const RING_INNER_COLOR: Rgba = Rgba::new(100, 181, 246, 0.0);
pub const RING_OUTER_COLOR: Rgba = Rgba::new(25, 118, 210, 0.0);

// Parallax glyphs: (base percent, percent per pointer pixel)
pub const GLYPH_PARALLAX: [(f64, f64, f64); 3] = [
    (20.0, 30.0, 0.02),  // planet, left/top
    (15.0, 60.0, 0.015), // earth, right/top
    (70.0, 20.0, 0.01),  // moon, left/bottom
];
