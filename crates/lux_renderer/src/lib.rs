//! lux renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over a flat list of transformed primitives and
//! CSG composites. Rendering is bucket-parallel and reproducible: every pixel
//! draws from its own PCG stream.

mod bucket;
mod camera;
mod csg;
mod cube;
mod cylinder;
mod error;
mod hdr_image;
mod image_tracer;
mod material;
mod pigment;
mod plane;
mod random;
mod renderer;
mod settings;
mod shape;
mod sphere;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, OrthogonalCamera, PerspectiveCamera};
pub use csg::{Csg, CsgOperation, CSG_EPSILON};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::{RenderError, RenderResult};
pub use hdr_image::{color_to_rgba, luminosity, HdrImage};
pub use image_tracer::ImageTracer;
pub use material::{orthonormal_basis, reflect, Brdf, DiffuseBrdf, Material, SpecularBrdf, SCATTER_TMIN};
pub use pigment::{CheckeredPigment, ImagePigment, Pigment, UniformPigment};
pub use plane::Plane;
pub use random::{gen_f32, Pcg};
pub use renderer::{FlatRenderer, OnOffRenderer, PathTracer, PointLightRenderer, Renderer};
pub use settings::{RenderSettings, RendererKind, TraceOptions};
pub use shape::{Crossing, HitRecord, Primitive, Shape, UnitGeometry};
pub use sphere::Sphere;
pub use world::{PointLight, World, VISIBILITY_EPSILON};

/// Linear RGB radiance.
pub type Color = lux_math::Vec3;

/// Re-export the geometry types from lux_math
pub use lux_math::{Normal, Point, Ray, Transformation, Vec2, Vec3};
