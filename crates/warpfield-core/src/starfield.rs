//! Warp starfield: point particles flying toward the viewer.
//!
//! Particles live in an unprojected `W x H` plane with a depth `z` in
//! `(0, W]`. Every frame moves them a fixed step closer, recycles the ones
//! that pass the viewer back to the far plane, and projects the rest with the
//! surface width as the scale numerator on both axes. Motion is tied to the
//! frame count, not wall-clock time, so apparent speed follows the display
//! refresh rate. Bounds are captured once at construction; a resized surface
//! keeps drawing with the old bounds until the engine is rebuilt.

use crate::color::Rgba;
use crate::constants::{
    STAR_COLOR, STAR_COUNT, STAR_MAX_SIZE, STAR_SIZE_SCALE, STAR_Z_STEP, TRAIL_FADE,
};
use crate::error::EngineError;
use crate::surface::Surface;
use glam::DVec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: f64,
}

/// Screen-space placement of a star for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedStar {
    pub center: DVec2,
    pub radius: f64,
    pub alpha: f64,
}

#[derive(Clone, Debug)]
pub struct StarfieldParams {
    pub count: usize,
    /// Depth removed per frame. Must be positive.
    pub z_step: f64,
    pub max_size: f64,
    pub size_scale: f64,
    pub color: Rgba,
    pub trail_fade: Rgba,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            z_step: STAR_Z_STEP,
            max_size: STAR_MAX_SIZE,
            size_scale: STAR_SIZE_SCALE,
            color: STAR_COLOR,
            trail_fade: TRAIL_FADE,
        }
    }
}

pub struct Starfield {
    width: f64,
    height: f64,
    params: StarfieldParams,
    stars: Vec<Star>,
    rng: StdRng,
    recycled_total: u64,
}

impl Starfield {
    /// Allocate `params.count` stars scattered uniformly over the surface,
    /// with depth drawn from `(0, width]` so none starts on the viewer.
    pub fn new(
        width: f64,
        height: f64,
        params: StarfieldParams,
        seed: u64,
    ) -> Result<Self, EngineError> {
        validate(width, height, &params)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..params.count)
            .map(|_| Star {
                x: rng.gen::<f64>() * width,
                y: rng.gen::<f64>() * height,
                z: width - rng.gen::<f64>() * width,
                size: rng.gen::<f64>() * params.max_size,
            })
            .collect::<Vec<_>>();
        log::info!(
            "[starfield] {} stars on {}x{} surface",
            stars.len(),
            width,
            height
        );
        Ok(Self {
            width,
            height,
            params,
            stars,
            rng,
            recycled_total: 0,
        })
    }

    /// Build from a caller-supplied particle set. Every star must already lie
    /// inside the field: `x` in `[0, width)`, `y` in `[0, height)`, `z` in
    /// `(0, width]` and `size` in `[0, max_size)`.
    pub fn from_stars(
        width: f64,
        height: f64,
        params: StarfieldParams,
        stars: Vec<Star>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        validate(width, height, &params)?;
        for (index, star) in stars.iter().enumerate() {
            check_star(index, star, width, height, params.max_size)?;
        }
        Ok(Self {
            width,
            height,
            params,
            stars,
            rng: StdRng::seed_from_u64(seed),
            recycled_total: 0,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn params(&self) -> &StarfieldParams {
        &self.params
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Number of recycle events since construction.
    pub fn recycled_total(&self) -> u64 {
        self.recycled_total
    }

    /// Move every star one step closer, recycling those that pass the viewer.
    /// Returns how many were recycled.
    pub fn advance(&mut self) -> usize {
        let mut recycled = 0;
        for star in self.stars.iter_mut() {
            if step_star(star, self.width, self.height, self.params.z_step, &mut self.rng) {
                recycled += 1;
            }
        }
        self.note_recycled(recycled);
        recycled
    }

    /// Paint the trail fade and the current particle set without moving it.
    /// Safe at any point: every star keeps `z` in `(0, width]` from construction on.
    pub fn paint(&self, surface: &mut dyn Surface) {
        self.paint_fade(surface);
        for star in &self.stars {
            self.paint_star(surface, star);
        }
    }

    /// One scheduled frame: fade, then move, recycle, project and draw each
    /// star in turn. Recycling always precedes projection so `z` is positive
    /// whenever it is divided into.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> usize {
        self.paint_fade(surface);
        let mut recycled = 0;
        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            if step_star(star, self.width, self.height, self.params.z_step, &mut self.rng) {
                recycled += 1;
            }
            let star = self.stars[i];
            self.paint_star(surface, &star);
        }
        self.note_recycled(recycled);
        recycled
    }

    pub fn project(&self, star: &Star) -> ProjectedStar {
        project_star(star, self.width, self.height, self.params.size_scale)
    }

    fn paint_fade(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            DVec2::ZERO,
            DVec2::new(self.width, self.height),
            self.params.trail_fade,
        );
    }

    fn paint_star(&self, surface: &mut dyn Surface, star: &Star) {
        let p = self.project(star);
        surface.fill_circle(p.center, p.radius, self.params.color.with_alpha(p.alpha));
    }

    fn note_recycled(&mut self, recycled: usize) {
        if recycled > 0 {
            self.recycled_total += recycled as u64;
            log::trace!("[starfield] recycled {recycled} stars");
        }
    }
}

/// Perspective-project `star` onto a `width x height` surface.
///
/// Both axes scale by `width / z`, which stretches the field toward the
/// edges on non-square surfaces. A star at the far plane (`z == width`) has
/// zero radius and zero alpha; as `z` approaches 0 the radius approaches
/// `size * size_scale` and alpha approaches 1.
pub fn project_star(star: &Star, width: f64, height: f64, size_scale: f64) -> ProjectedStar {
    let half = DVec2::new(width / 2.0, height / 2.0);
    let scale = width / star.z;
    let center = (DVec2::new(star.x, star.y) - half) * scale + half;
    let nearness = 1.0 - star.z / width;
    ProjectedStar {
        center,
        radius: (nearness * star.size * size_scale).max(0.0),
        alpha: nearness,
    }
}

// Returns true when the star was recycled to the far plane.
fn step_star(star: &mut Star, width: f64, height: f64, z_step: f64, rng: &mut StdRng) -> bool {
    star.z -= z_step;
    if star.z <= 0.0 {
        star.z = width;
        star.x = rng.gen::<f64>() * width;
        star.y = rng.gen::<f64>() * height;
        return true;
    }
    false
}

fn check_star(
    index: usize,
    star: &Star,
    width: f64,
    height: f64,
    max_size: f64,
) -> Result<(), EngineError> {
    let out = |field: &'static str, value: f64| EngineError::StarOutOfRange {
        index,
        field,
        value,
    };
    if !(0.0..width).contains(&star.x) {
        return Err(out("x", star.x));
    }
    if !(0.0..height).contains(&star.y) {
        return Err(out("y", star.y));
    }
    if star.z.is_nan() || star.z <= 0.0 || star.z > width {
        return Err(out("z", star.z));
    }
    if !(0.0..max_size).contains(&star.size) {
        return Err(out("size", star.size));
    }
    Ok(())
}

fn validate(width: f64, height: f64, params: &StarfieldParams) -> Result<(), EngineError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(width) || !usable(height) {
        return Err(EngineError::EmptySurface { width, height });
    }
    if !usable(params.z_step) {
        return Err(EngineError::InvalidStep(params.z_step));
    }
    Ok(())
}
