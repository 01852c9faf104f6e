//! The intersection protocol shared by primitives and CSG composites.

use std::fmt::Debug;
use std::sync::Arc;

use lux_math::{Normal, Point, Ray, Transformation, Vec2, Vec3};

use crate::Material;

/// Record of a ray-surface intersection. Built per query, never cached.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection, world space
    pub world_point: Point,
    /// Unit normal, always facing against the incoming ray
    pub normal: Normal,
    /// Surface parametrization (u, v)
    pub surface_point: Vec2,
    /// Ray parameter of the hit
    pub t: f32,
    /// The ray that produced the hit
    pub ray: Ray,
    pub material: &'a Material,
}

/// A place where a ray crosses the boundary of a solid, tagged with the leaf
/// primitive that owns that piece of surface.
#[derive(Debug, Clone, Copy)]
pub struct Crossing<'a> {
    pub t: f32,
    pub surface: &'a dyn Shape,
}

/// Anything that can be placed in a `World`.
pub trait Shape: Send + Sync + Debug {
    /// Every boundary crossing along the whole line of `ray`, sorted by `t`,
    /// regardless of the ray's valid interval.
    fn crossings(&self, ray: &Ray) -> Vec<Crossing<'_>>;

    /// Smallest parameter inside `[tmin, tmax]` at which the ray meets the
    /// shape, `None` when there is no such parameter.
    fn nearest_t(&self, ray: &Ray) -> Option<f32>;

    /// Build the hit record for a parameter known to lie on this shape.
    fn hit_at(&self, ray: &Ray, t: f32) -> HitRecord<'_>;

    /// Sorted crossing parameters (see [`Shape::crossings`]).
    fn all_ts(&self, ray: &Ray) -> Vec<f32> {
        self.crossings(ray).iter().map(|c| c.t).collect()
    }

    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let t = self.nearest_t(ray)?;
        Some(self.hit_at(ray, t))
    }

    /// Cheaper yes/no version of [`Shape::ray_intersection`].
    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        self.nearest_t(ray).is_some()
    }
}

/// A canonical primitive living in its own unit space.
///
/// All functions receive the ray already pulled back into that space.
pub trait UnitGeometry: Send + Sync + Debug {
    /// Nearest parameter in `[tmin, tmax]`.
    fn nearest_t(&self, ray: &Ray) -> Option<f32>;

    /// Every finite intersection parameter, sorted, ignoring `[tmin, tmax]`.
    fn all_ts(&self, ray: &Ray) -> Vec<f32>;

    fn uv(&self, point: Point) -> Vec2;

    /// Surface normal at `point`, oriented so that `normal · dir < 0`.
    fn normal(&self, point: Point, dir: Vec3) -> Normal;
}

/// A unit geometry placed in the world by a transformation, with a material.
#[derive(Debug, Clone)]
pub struct Primitive<G> {
    geometry: G,
    transformation: Transformation,
    material: Arc<Material>,
}

impl<G: UnitGeometry> Primitive<G> {
    pub fn new(geometry: G, transformation: Transformation, material: Arc<Material>) -> Self {
        Self {
            geometry,
            transformation,
            material,
        }
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    fn local_ray(&self, ray: &Ray) -> Ray {
        self.transformation.inverse().apply_ray(ray)
    }
}

impl<G: UnitGeometry> Shape for Primitive<G> {
    fn crossings(&self, ray: &Ray) -> Vec<Crossing<'_>> {
        self.geometry
            .all_ts(&self.local_ray(ray))
            .into_iter()
            .map(|t| Crossing { t, surface: self })
            .collect()
    }

    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        self.geometry.nearest_t(&self.local_ray(ray))
    }

    fn all_ts(&self, ray: &Ray) -> Vec<f32> {
        self.geometry.all_ts(&self.local_ray(ray))
    }

    fn hit_at(&self, ray: &Ray, t: f32) -> HitRecord<'_> {
        let local_ray = self.local_ray(ray);
        let local_point = local_ray.at(t);
        let local_normal = self.geometry.normal(local_point, local_ray.dir);

        HitRecord {
            world_point: self.transformation.apply_point(local_point),
            normal: self.transformation.apply_normal(local_normal).normalize(),
            surface_point: self.geometry.uv(local_point),
            t,
            ray: *ray,
            material: &self.material,
        }
    }
}
