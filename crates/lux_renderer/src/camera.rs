//! Cameras map normalized screen coordinates to primary rays.
//!
//! Both cameras look along +X in their own frame, with +Z up and +Y to the
//! left. The screen spans `u, v ∈ [0, 1]` with the origin at the
//! bottom-left corner; the camera transformation places the frame in the
//! world.

use lux_math::{Point, Ray, Transformation, Vec3};

pub trait Camera: Send + Sync {
    /// Primary ray through the screen point `(u, v)`.
    fn fire_ray(&self, u: f32, v: f32) -> Ray;
}

/// Parallel projection; the screen is `2a × 2` world units.
#[derive(Debug, Clone, Copy)]
pub struct OrthogonalCamera {
    aspect_ratio: f32,
    transformation: Transformation,
}

impl OrthogonalCamera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            transformation: Transformation::IDENTITY,
        }
    }

    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = transformation;
        self
    }
}

impl Camera for OrthogonalCamera {
    fn fire_ray(&self, u: f32, v: f32) -> Ray {
        let origin = Point::new(-1.0, (1.0 - 2.0 * u) * self.aspect_ratio, 2.0 * v - 1.0);
        self.transformation.apply_ray(&Ray::new(origin, Vec3::X))
    }
}

/// Pinhole camera at `(-d, 0, 0)` looking at a `2a × 2` screen through the
/// origin.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    screen_distance: f32,
    aspect_ratio: f32,
    transformation: Transformation,
}

impl PerspectiveCamera {
    pub const DEFAULT_SCREEN_DISTANCE: f32 = 1.0;

    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            screen_distance: Self::DEFAULT_SCREEN_DISTANCE,
            aspect_ratio,
            transformation: Transformation::IDENTITY,
        }
    }

    /// Larger distances narrow the field of view.
    pub fn with_screen_distance(mut self, screen_distance: f32) -> Self {
        self.screen_distance = screen_distance;
        self
    }

    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = transformation;
        self
    }

    /// Horizontal field of view, in degrees.
    pub fn aperture_deg(&self) -> f32 {
        2.0 * (self.aspect_ratio / self.screen_distance).atan().to_degrees()
    }
}

impl Camera for PerspectiveCamera {
    fn fire_ray(&self, u: f32, v: f32) -> Ray {
        let d = self.screen_distance;
        let origin = Point::new(-d, 0.0, 0.0);
        let dir = Vec3::new(d, (1.0 - 2.0 * u) * self.aspect_ratio, 2.0 * v - 1.0);
        self.transformation.apply_ray(&Ray::new(origin, dir))
    }
}
