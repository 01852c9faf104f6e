//! Unit sphere centered at the origin.

use std::f32::consts::PI;

use lux_math::{Normal, Point, Ray, Vec2, Vec3};

use crate::shape::UnitGeometry;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl Sphere {
    /// Both roots of `|O + tD|² = 1`, smaller first.
    fn roots(ray: &Ray) -> Option<(f32, f32)> {
        let origin = ray.origin.to_vec();
        let a = ray.dir.length_squared();
        if a == 0.0 {
            return None;
        }
        let half_b = origin.dot(ray.dir);
        let c = origin.length_squared() - 1.0;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(((-half_b - sqrtd) / a, (-half_b + sqrtd) / a))
    }
}

impl UnitGeometry for Sphere {
    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        let (t1, t2) = Self::roots(ray)?;
        if ray.accepts(t1) {
            Some(t1)
        } else if ray.accepts(t2) {
            Some(t2)
        } else {
            None
        }
    }

    fn all_ts(&self, ray: &Ray) -> Vec<f32> {
        match Self::roots(ray) {
            Some((t1, t2)) => vec![t1, t2],
            None => Vec::new(),
        }
    }

    fn uv(&self, point: Point) -> Vec2 {
        let mut u = point.y.atan2(point.x) / (2.0 * PI);
        if u < 0.0 {
            u += 1.0;
        }
        let v = point.z.clamp(-1.0, 1.0).acos() / PI;
        Vec2::new(u, v)
    }

    fn normal(&self, point: Point, dir: Vec3) -> Normal {
        Normal::from_vec(point.to_vec()).normalize().facing(dir)
    }
}
