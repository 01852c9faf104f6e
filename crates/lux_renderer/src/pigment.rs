//! Pigments: functions from surface coordinates `(u, v)` to a color.

use std::fmt::Debug;
use std::sync::Arc;

use lux_math::Vec2;

use crate::{Color, HdrImage};

/// Maps a point of the surface parametrization to a color.
pub trait Pigment: Send + Sync + Debug {
    fn color(&self, uv: Vec2) -> Color;
}

/// The same color everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformPigment {
    pub color: Color,
}

impl UniformPigment {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Pigment for UniformPigment {
    fn color(&self, _uv: Vec2) -> Color {
        self.color
    }
}

/// A checkerboard with `steps` squares along each of `u` and `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckeredPigment {
    pub color1: Color,
    pub color2: Color,
    pub steps: u32,
}

impl CheckeredPigment {
    pub fn new(color1: Color, color2: Color, steps: u32) -> Self {
        Self {
            color1,
            color2,
            steps,
        }
    }
}

impl Pigment for CheckeredPigment {
    fn color(&self, uv: Vec2) -> Color {
        let steps = self.steps as f32;
        let int_u = (uv.x * steps).ceil() as i64;
        let int_v = (uv.y * steps).ceil() as i64;

        if int_u.rem_euclid(2) == int_v.rem_euclid(2) {
            self.color1
        } else {
            self.color2
        }
    }
}

/// Nearest-sample lookup into a shared raster. `v = 0` is the first row.
#[derive(Debug, Clone)]
pub struct ImagePigment {
    pub image: Arc<HdrImage>,
}

impl ImagePigment {
    pub fn new(image: Arc<HdrImage>) -> Self {
        Self { image }
    }
}

impl Pigment for ImagePigment {
    fn color(&self, uv: Vec2) -> Color {
        let width = self.image.width;
        let height = self.image.height;
        if width == 0 || height == 0 {
            return Color::ZERO;
        }

        let col = ((uv.x * width as f32).max(0.0) as u32).min(width - 1);
        let row = ((uv.y * height as f32).max(0.0) as u32).min(height - 1);
        self.image.get(col, row)
    }
}
