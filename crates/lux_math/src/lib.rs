//! lux math - geometric types for the lux path tracer.
//!
//! Directions are plain `glam::Vec3`; positions and surface normals get
//! their own newtypes so that the affine algebra stays honest (two points
//! cannot be added, normals transform by the inverse transpose).

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod error;
mod interval;
mod normal;
mod point;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use error::{MathError, MathResult};
pub use interval::Interval;
pub use normal::Normal;
pub use point::Point;
pub use ray::{Ray, DEFAULT_TMIN};
pub use transform::Transformation;

/// Tolerance used by the `is_close` family of comparisons.
pub const EPSILON: f32 = 1e-4;
