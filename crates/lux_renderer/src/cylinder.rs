//! Closed cylinder around the z axis: radius 0.5, `z` in `[-0.5, 0.5]`.

use std::f32::consts::PI;

use lux_math::{Interval, Normal, Point, Ray, Vec2, Vec3};

use crate::shape::UnitGeometry;

const RADIUS: f32 = 0.5;
const HALF_HEIGHT: f32 = 0.5;

/// Below this, a direction component counts as zero.
const DEGENERATE_EPSILON: f32 = 1e-9;

#[derive(Debug, Clone, Copy, Default)]
pub struct Cylinder;

impl Cylinder {
    /// Entry and exit parameters along the whole line of `ray`.
    ///
    /// The solid is the intersection of an infinite cylinder and the slab
    /// `|z| <= 0.5`, so the crossings come from intersecting the two
    /// parameter spans. There are always zero or two of them.
    fn crossings(ray: &Ray) -> Vec<f32> {
        let (Some(radial), Some(slab)) = (Self::radial_span(ray), Self::slab_span(ray)) else {
            return Vec::new();
        };

        let span = radial.intersect(&slab);
        if span.is_empty() || !span.min.is_finite() || !span.max.is_finite() {
            return Vec::new();
        }
        vec![span.min, span.max]
    }

    /// Where the line is inside the infinite cylinder `x² + y² <= r²`.
    fn radial_span(ray: &Ray) -> Option<Interval> {
        let (o, d) = (ray.origin, ray.dir);
        let a = d.x * d.x + d.y * d.y;
        let c = o.x * o.x + o.y * o.y - RADIUS * RADIUS;

        // Parallel to the axis: inside for every t, or never
        if a <= DEGENERATE_EPSILON {
            return (c <= 0.0).then_some(Interval::UNIVERSE);
        }

        let half_b = o.x * d.x + o.y * d.y;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();
        Some(Interval::new((-half_b - sqrtd) / a, (-half_b + sqrtd) / a))
    }

    /// Where the line is between the two cap planes.
    fn slab_span(ray: &Ray) -> Option<Interval> {
        let (oz, dz) = (ray.origin.z, ray.dir.z);

        if dz.abs() <= DEGENERATE_EPSILON {
            return (oz.abs() <= HALF_HEIGHT).then_some(Interval::UNIVERSE);
        }

        let t0 = (-HALF_HEIGHT - oz) / dz;
        let t1 = (HALF_HEIGHT - oz) / dz;
        Some(Interval::new(t0.min(t1), t0.max(t1)))
    }

    fn on_cap(point: Point) -> bool {
        point.z.abs() >= HALF_HEIGHT - 1e-4
            && point.x * point.x + point.y * point.y < RADIUS * RADIUS - 1e-4
    }
}

impl UnitGeometry for Cylinder {
    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        Self::crossings(ray).into_iter().find(|&t| ray.accepts(t))
    }

    fn all_ts(&self, ray: &Ray) -> Vec<f32> {
        Self::crossings(ray)
    }

    /// `u` follows the angle around the axis, `v` the height; the caps map
    /// to `v = 0` and `v = 1`.
    fn uv(&self, point: Point) -> Vec2 {
        let mut u = point.y.atan2(point.x) / (2.0 * PI);
        if u < 0.0 {
            u += 1.0;
        }
        let v = ((point.z + HALF_HEIGHT) / (2.0 * HALF_HEIGHT)).clamp(0.0, 1.0);
        Vec2::new(u, v)
    }

    fn normal(&self, point: Point, dir: Vec3) -> Normal {
        let outward = if Self::on_cap(point) {
            Normal::Z * point.z.signum()
        } else {
            Normal::new(point.x, point.y, 0.0).normalize()
        };
        outward.facing(dir)
    }
}
