//! Infinite plane `z = 0`.

use lux_math::{Normal, Point, Ray, Vec2, Vec3};

use crate::shape::UnitGeometry;

/// Directions with a smaller z component count as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, Default)]
pub struct Plane;

impl Plane {
    fn crossing(ray: &Ray) -> Option<f32> {
        if ray.dir.z.abs() < PARALLEL_EPSILON {
            return None;
        }
        Some(-ray.origin.z / ray.dir.z)
    }
}

impl UnitGeometry for Plane {
    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        Self::crossing(ray).filter(|&t| ray.accepts(t))
    }

    fn all_ts(&self, ray: &Ray) -> Vec<f32> {
        Self::crossing(ray).into_iter().collect()
    }

    fn uv(&self, point: Point) -> Vec2 {
        Vec2::new(point.x - point.x.floor(), point.y - point.y.floor())
    }

    fn normal(&self, _point: Point, dir: Vec3) -> Normal {
        if dir.z < 0.0 {
            Normal::Z
        } else {
            -Normal::Z
        }
    }
}
