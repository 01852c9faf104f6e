//! Renderers: functions from a primary ray to the radiance it carries.
//!
//! Implements:
//! - On/off coverage masks for debugging geometry
//! - Flat shading (pigment + emission, no lighting)
//! - Direct lighting from point lights
//! - Monte Carlo path tracing with Russian roulette

use lux_math::Ray;
use rand::RngCore;

use crate::{gen_f32, Color, World};

pub trait Renderer: Send + Sync {
    /// Radiance carried back along `ray`.
    fn radiance(&self, world: &World, ray: &Ray, rng: &mut dyn RngCore) -> Color;
}

/// Paints `on_color` wherever the ray hits something.
#[derive(Debug, Clone, Copy)]
pub struct OnOffRenderer {
    pub on_color: Color,
    pub off_color: Color,
}

impl Default for OnOffRenderer {
    fn default() -> Self {
        Self {
            on_color: Color::ONE,
            off_color: Color::ZERO,
        }
    }
}

impl Renderer for OnOffRenderer {
    fn radiance(&self, world: &World, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        match world.ray_intersection(ray) {
            Some(_) => self.on_color,
            None => self.off_color,
        }
    }
}

/// Surface color at the nearest hit, without any light transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRenderer {
    pub background: Color,
}

impl FlatRenderer {
    pub fn new(background: Color) -> Self {
        Self { background }
    }
}

impl Renderer for FlatRenderer {
    fn radiance(&self, world: &World, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        let Some(hit) = world.ray_intersection(ray) else {
            return self.background;
        };
        let uv = hit.surface_point;
        hit.material.brdf.pigment().color(uv) + hit.material.emitted_radiance.color(uv)
    }
}

/// Direct illumination from the world's point lights, with hard shadows.
#[derive(Debug, Clone, Copy)]
pub struct PointLightRenderer {
    pub background: Color,
    pub ambient_color: Color,
}

impl Default for PointLightRenderer {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            ambient_color: Color::splat(0.1),
        }
    }
}

impl Renderer for PointLightRenderer {
    fn radiance(&self, world: &World, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        let Some(hit) = world.ray_intersection(ray) else {
            return self.background;
        };

        let material = hit.material;
        let uv = hit.surface_point;
        let out_dir = -ray.dir.normalize();
        let emitted = material.emitted_radiance.color(uv);

        let mut result = self.ambient_color;
        for light in world.point_lights() {
            if !world.is_point_visible(light.position, hit.world_point) {
                continue;
            }

            let to_hit = hit.world_point - light.position;
            let distance = to_hit.length();
            let in_dir = to_hit / distance;
            let cos_theta = hit.normal.dot(-in_dir).max(0.0);
            let distance_factor = if light.linear_radius > 0.0 {
                (light.linear_radius / distance).powi(2)
            } else {
                1.0
            };

            let brdf_color = material.brdf.eval(hit.normal, in_dir, out_dir, uv);
            result += (emitted + brdf_color) * light.color * cos_theta * distance_factor;
        }
        result
    }
}

/// Unbiased Monte Carlo estimator of the rendering equation.
#[derive(Debug, Clone, Copy)]
pub struct PathTracer {
    pub background: Color,
    /// Scattered rays fired at every bounce
    pub num_of_rays: u32,
    /// Rays deeper than this carry no radiance
    pub max_depth: u32,
    /// Depth from which Russian roulette may kill a path
    pub roulette_depth: u32,
}

impl Default for PathTracer {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            num_of_rays: 10,
            max_depth: 2,
            roulette_depth: 3,
        }
    }
}

impl Renderer for PathTracer {
    fn radiance(&self, world: &World, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        if ray.depth > self.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = world.ray_intersection(ray) else {
            return self.background;
        };

        let material = hit.material;
        let mut hit_color = material.brdf.pigment().color(hit.surface_point);
        let emitted = material.emitted_radiance.color(hit.surface_point);

        if ray.depth >= self.roulette_depth {
            let survival = hit_color.max_element();
            if gen_f32(rng) < survival {
                hit_color /= survival;
            } else {
                return emitted;
            }
        }

        if self.num_of_rays == 0 || hit_color.max_element() <= 0.0 {
            return emitted;
        }

        let mut accumulated = Color::ZERO;
        for _ in 0..self.num_of_rays {
            let scattered = material.brdf.scatter_ray(
                rng,
                hit.ray.dir,
                hit.world_point,
                hit.normal,
                ray.depth + 1,
            );
            accumulated += hit_color * self.radiance(world, &scattered, rng);
        }

        emitted + accumulated / self.num_of_rays as f32
    }
}
