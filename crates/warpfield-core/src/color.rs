use std::fmt;

/// Straight-alpha color as understood by the 2D canvas API.
///
/// Channels are 8-bit, alpha is a float in \[0, 1\]. `Display` renders the
/// CSS `rgba()` form that canvas fill/stroke styles and gradient stops accept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Alpha clamped into the range the canvas accepts; non-finite becomes 0.
    pub fn clamped_alpha(&self) -> f64 {
        if self.a.is_finite() {
            self.a.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.clamped_alpha()
        )
    }
}
