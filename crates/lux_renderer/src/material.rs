//! BRDFs and materials.

use std::f32::consts::PI;
use std::fmt::Debug;

use lux_math::{Normal, Point, Ray, Vec2, Vec3};
use rand::RngCore;

use crate::{gen_f32, Color, Pigment, UniformPigment};

/// Rays leaving a surface start this far along their direction.
pub const SCATTER_TMIN: f32 = 1e-3;

/// Bidirectional reflectance distribution function.
pub trait Brdf: Send + Sync + Debug {
    /// Radiance scale for light arriving along `in_dir` and leaving along
    /// `out_dir` at the surface point with coordinates `uv`.
    fn eval(&self, normal: Normal, in_dir: Vec3, out_dir: Vec3, uv: Vec2) -> Color;

    /// Sample an outgoing direction for a ray arriving along `incoming_dir`.
    fn scatter_ray(
        &self,
        rng: &mut dyn RngCore,
        incoming_dir: Vec3,
        point: Point,
        normal: Normal,
        depth: u32,
    ) -> Ray;

    /// The pigment modulating this BRDF.
    fn pigment(&self) -> &dyn Pigment;
}

/// Ideal Lambertian reflector.
#[derive(Debug)]
pub struct DiffuseBrdf {
    pigment: Box<dyn Pigment>,
    reflectance: f32,
}

impl DiffuseBrdf {
    pub fn new(pigment: impl Pigment + 'static) -> Self {
        Self::with_reflectance(pigment, 1.0)
    }

    pub fn with_reflectance(pigment: impl Pigment + 'static, reflectance: f32) -> Self {
        Self {
            pigment: Box::new(pigment),
            reflectance,
        }
    }
}

impl Brdf for DiffuseBrdf {
    fn eval(&self, _normal: Normal, _in_dir: Vec3, _out_dir: Vec3, uv: Vec2) -> Color {
        self.pigment.color(uv) * (self.reflectance / PI)
    }

    /// Cosine-weighted sampling of the hemisphere around `normal`.
    fn scatter_ray(
        &self,
        rng: &mut dyn RngCore,
        _incoming_dir: Vec3,
        point: Point,
        normal: Normal,
        depth: u32,
    ) -> Ray {
        let (e1, e2, e3) = orthonormal_basis(normal.normalize());
        let cos_theta_sq = gen_f32(rng);
        let cos_theta = cos_theta_sq.sqrt();
        let sin_theta = (1.0 - cos_theta_sq).sqrt();
        let phi = 2.0 * PI * gen_f32(rng);

        let dir = e1 * (phi.cos() * sin_theta) + e2 * (phi.sin() * sin_theta) + e3 * cos_theta;
        Ray::unbounded(point, dir, SCATTER_TMIN, depth)
    }

    fn pigment(&self) -> &dyn Pigment {
        self.pigment.as_ref()
    }
}

/// Perfect mirror.
#[derive(Debug)]
pub struct SpecularBrdf {
    pigment: Box<dyn Pigment>,
    threshold_angle: f32,
}

impl SpecularBrdf {
    /// Default tolerance when matching incoming and outgoing angles (0.1°).
    pub const DEFAULT_THRESHOLD: f32 = PI / 1800.0;

    pub fn new(pigment: impl Pigment + 'static) -> Self {
        Self {
            pigment: Box::new(pigment),
            threshold_angle: Self::DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold_angle: f32) -> Self {
        self.threshold_angle = threshold_angle;
        self
    }
}

impl Brdf for SpecularBrdf {
    fn eval(&self, normal: Normal, in_dir: Vec3, out_dir: Vec3, uv: Vec2) -> Color {
        let n = normal.to_vec().normalize();
        let theta_in = n.dot(in_dir.normalize()).clamp(-1.0, 1.0).acos();
        let theta_out = n.dot(out_dir.normalize()).clamp(-1.0, 1.0).acos();

        if (theta_in - theta_out).abs() < self.threshold_angle {
            self.pigment.color(uv)
        } else {
            Color::ZERO
        }
    }

    fn scatter_ray(
        &self,
        _rng: &mut dyn RngCore,
        incoming_dir: Vec3,
        point: Point,
        normal: Normal,
        depth: u32,
    ) -> Ray {
        let dir = reflect(incoming_dir.normalize(), normal.to_vec().normalize());
        Ray::unbounded(point, dir, SCATTER_TMIN, depth)
    }

    fn pigment(&self) -> &dyn Pigment {
        self.pigment.as_ref()
    }
}

/// A BRDF plus the radiance the surface emits on its own.
#[derive(Debug)]
pub struct Material {
    pub brdf: Box<dyn Brdf>,
    pub emitted_radiance: Box<dyn Pigment>,
}

impl Material {
    pub fn new(brdf: impl Brdf + 'static, emitted_radiance: impl Pigment + 'static) -> Self {
        Self {
            brdf: Box::new(brdf),
            emitted_radiance: Box::new(emitted_radiance),
        }
    }

    /// Non-emissive material with the given BRDF.
    pub fn from_brdf(brdf: impl Brdf + 'static) -> Self {
        Self::new(brdf, UniformPigment::new(Color::ZERO))
    }

    /// Non-emissive matte material of a uniform color.
    pub fn diffuse(color: Color) -> Self {
        Self::from_brdf(DiffuseBrdf::new(UniformPigment::new(color)))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::ONE)
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Orthonormal basis whose third vector is `normal` (Duff et al. 2017,
/// branchless).
pub fn orthonormal_basis(normal: Normal) -> (Vec3, Vec3, Vec3) {
    let n = normal.to_vec();
    let sign = 1f32.copysign(n.z);
    let a = -1.0 / (sign + n.z);
    let b = n.x * n.y * a;

    let e1 = Vec3::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x);
    let e2 = Vec3::new(b, sign + n.y * n.y * a, -n.y);
    (e1, e2, n)
}
