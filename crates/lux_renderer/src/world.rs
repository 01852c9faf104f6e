//! Scene container: shapes plus point light sources.

use lux_math::{Point, Ray};

use crate::shape::{HitRecord, Shape};
use crate::Color;

/// Occlusion rays stop this far (in world units) short of the observer.
pub const VISIBILITY_EPSILON: f32 = 1e-2;

/// An idealized point light, used by the point-light renderer.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Point,
    pub color: Color,
    /// Distance at which the light is at full strength; zero disables the
    /// `(r/d)²` falloff.
    pub linear_radius: f32,
}

impl PointLight {
    pub fn new(position: Point, color: Color) -> Self {
        Self {
            position,
            color,
            linear_radius: 0.0,
        }
    }

    pub fn with_linear_radius(mut self, linear_radius: f32) -> Self {
        self.linear_radius = linear_radius;
        self
    }
}

/// Every object of a scene. Intersections are a linear scan.
#[derive(Debug, Default)]
pub struct World {
    shapes: Vec<Box<dyn Shape>>,
    point_lights: Vec<PointLight>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Shape + 'static) {
        self.shapes.push(Box::new(shape));
    }

    pub fn add_boxed(&mut self, shape: Box<dyn Shape>) {
        self.shapes.push(shape);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Closest hit over all shapes.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for shape in &self.shapes {
            if let Some(hit) = shape.ray_intersection(ray) {
                if closest.map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }

    /// True when nothing lies on the segment between `observer` and `point`.
    pub fn is_point_visible(&self, point: Point, observer: Point) -> bool {
        let direction = point - observer;
        let distance = direction.length();

        let ray = match Ray::with_range(observer, direction, VISIBILITY_EPSILON / distance, 1.0, 0) {
            Ok(ray) => ray,
            // Observer sits on the point
            Err(_) => return true,
        };

        !self.shapes.iter().any(|shape| shape.quick_ray_intersection(&ray))
    }
}
