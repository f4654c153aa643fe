// DOM hooks shared by the web frontend.

pub const STARFIELD_CANVAS_ID: &str = "starfield-canvas";
pub const WORMHOLE_CANVAS_ID: &str = "wormhole-canvas";

// Decorative glyphs repositioned from pointer movement: `parallax-glyph-{0,1,2}`
pub const GLYPH_ID_PREFIX: &str = "parallax-glyph-";

// Custom property on <html> carrying the scroll fraction for stylesheets
pub const SCROLL_PROGRESS_VAR: &str = "--scroll-progress";
