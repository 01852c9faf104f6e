//! Unit cube, axis aligned, centered at the origin (`[-0.5, 0.5]³`).

use lux_math::{Aabb, Normal, Point, Ray, Vec2, Vec3};

use crate::shape::UnitGeometry;

const HALF_SIDE: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct Cube {
    bounds: Aabb,
}

impl Cube {
    pub fn new() -> Self {
        Self {
            bounds: Aabb::from_points(
                Point::new(-HALF_SIDE, -HALF_SIDE, -HALF_SIDE),
                Point::new(HALF_SIDE, HALF_SIDE, HALF_SIDE),
            ),
        }
    }

    /// Index of the face axis (0=X, 1=Y, 2=Z) a surface point lies on.
    fn face_axis(point: Point) -> usize {
        let (ax, ay, az) = (point.x.abs(), point.y.abs(), point.z.abs());
        if ax >= ay && ax >= az {
            0
        } else if ay >= az {
            1
        } else {
            2
        }
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitGeometry for Cube {
    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        let span = self.bounds.slab(ray)?;
        if ray.accepts(span.min) {
            Some(span.min)
        } else if ray.accepts(span.max) {
            Some(span.max)
        } else {
            None
        }
    }

    fn all_ts(&self, ray: &Ray) -> Vec<f32> {
        match self.bounds.slab(ray) {
            Some(span) => vec![span.min, span.max],
            None => Vec::new(),
        }
    }

    /// Each face maps its two in-plane coordinates onto the unit square.
    fn uv(&self, point: Point) -> Vec2 {
        let (u, v) = match Self::face_axis(point) {
            0 => (point.y, point.z),
            1 => (point.x, point.z),
            _ => (point.x, point.y),
        };
        Vec2::new(
            (u + HALF_SIDE).clamp(0.0, 1.0),
            (v + HALF_SIDE).clamp(0.0, 1.0),
        )
    }

    fn normal(&self, point: Point, dir: Vec3) -> Normal {
        let outward = match Self::face_axis(point) {
            0 => Normal::X * point.x.signum(),
            1 => Normal::Y * point.y.signum(),
            _ => Normal::Z * point.z.signum(),
        };
        outward.facing(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Primitive, Shape};
    use crate::Material;
    use lux_math::Transformation;
    use std::sync::Arc;

    fn cube(transformation: Transformation) -> Primitive<Cube> {
        Primitive::new(Cube::new(), transformation, Arc::new(Material::default()))
    }

    #[test]
    fn test_hit_top_face() {
        let cube = cube(Transformation::IDENTITY);
        let ray = Ray::new(Point::new(0.0, 0.0, 2.0), -Vec3::Z);
        let hit = cube.ray_intersection(&ray).unwrap();

        assert!((hit.t - 1.5).abs() < 1e-6);
        assert!(hit.world_point.is_close(&Point::new(0.0, 0.0, 0.5)));
        assert!(hit.normal.is_close(&Normal::Z));
        assert!(hit.surface_point.abs_diff_eq(Vec2::new(0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_hit_from_inside() {
        let cube = cube(Transformation::IDENTITY);
        let ray = Ray::new(Point::ORIGIN, Vec3::X);
        let hit = cube.ray_intersection(&ray).unwrap();

        assert!((hit.t - 0.5).abs() < 1e-6);
        assert!(hit.normal.is_close(&-Normal::X));
    }

    #[test]
    fn test_oblique_side_hit() {
        let cube = cube(Transformation::IDENTITY);
        let ray = Ray::new(Point::new(-2.0, 0.2, 0.1), Vec3::X);
        let hit = cube.ray_intersection(&ray).unwrap();

        assert!((hit.t - 1.5).abs() < 1e-6);
        assert!(hit.normal.is_close(&-Normal::X));
        assert!(hit.surface_point.abs_diff_eq(Vec2::new(0.7, 0.6), 1e-6));
    }

    #[test]
    fn test_all_ts_and_miss() {
        let cube = cube(Transformation::IDENTITY);
        let ray = Ray::new(Point::new(0.0, 0.0, 2.0), -Vec3::Z);
        let ts = cube.all_ts(&ray);
        assert_eq!(ts.len(), 2);
        assert!((ts[0] - 1.5).abs() < 1e-6);
        assert!((ts[1] - 2.5).abs() < 1e-6);

        let miss = Ray::new(Point::new(2.0, 0.0, 2.0), -Vec3::Z);
        assert!(cube.ray_intersection(&miss).is_none());
        assert!(cube.all_ts(&miss).is_empty());

        // Entirely behind the ray
        let behind = Ray::new(Point::new(0.0, 0.0, -2.0), -Vec3::Z);
        assert!(cube.ray_intersection(&behind).is_none());
    }

    #[test]
    fn test_scaled_cube() {
        let cube = cube(Transformation::scaling(Vec3::new(4.0, 1.0, 1.0)));
        let ray = Ray::new(Point::new(5.0, 0.0, 0.0), -Vec3::X);
        let hit = cube.ray_intersection(&ray).unwrap();

        assert!((hit.t - 3.0).abs() < 1e-5);
        assert!(hit.normal.is_close(&Normal::X));
    }
}
