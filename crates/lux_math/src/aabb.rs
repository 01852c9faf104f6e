use crate::{Interval, Point, Ray};

/// Axis-aligned box, stored as one interval per axis.
///
/// Only used as an intersection helper (the cube primitive); there is no
/// acceleration structure built on top of it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two opposite corners, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Slab test over the whole line carried by `ray`.
    ///
    /// Returns the entry/exit parameters, ignoring the ray's own interval,
    /// or `None` when the three per-axis slabs do not overlap.
    pub fn slab(&self, ray: &Ray) -> Option<Interval> {
        let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
        let dir = [ray.dir.x, ray.dir.y, ray.dir.z];
        let mut span = Interval::UNIVERSE;

        for (axis, slab) in [self.x, self.y, self.z].iter().enumerate() {
            let inv_d = 1.0 / dir[axis];
            let mut t0 = (slab.min - origin[axis]) * inv_d;
            let mut t1 = (slab.max - origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            span = span.intersect(&Interval::new(t0, t1));
            if span.is_empty() {
                return None;
            }
        }

        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn unit_box() -> Aabb {
        Aabb::from_points(Point::new(1.0, 1.0, 1.0), Point::new(-1.0, -1.0, -1.0))
    }

    #[test]
    fn test_aabb_from_points_sorts_corners() {
        let aabb = unit_box();
        for slab in [aabb.x, aabb.y, aabb.z] {
            assert_eq!(slab, Interval::new(-1.0, 1.0));
        }
    }

    #[test]
    fn test_slab_entry_and_exit() {
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::Z);
        let span = unit_box().slab(&ray).unwrap();

        assert!((span.min - 4.0).abs() < 1e-6);
        assert!((span.max - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_slab_negative_direction() {
        let ray = Ray::new(Point::new(0.5, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let span = unit_box().slab(&ray).unwrap();

        assert!((span.min - 2.0).abs() < 1e-6);
        assert!((span.max - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_slab_miss() {
        let ray = Ray::new(Point::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(unit_box().slab(&ray).is_none());
    }

    #[test]
    fn test_slab_ignores_ray_interval() {
        // Origin inside the box: entry lies behind the ray
        let ray = Ray::new(Point::ORIGIN, Vec3::X);
        let span = unit_box().slab(&ray).unwrap();
        assert!((span.min + 1.0).abs() < 1e-6);
        assert!((span.max - 1.0).abs() < 1e-6);
    }
}
