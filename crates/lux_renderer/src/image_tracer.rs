//! Fires rays through every pixel of an image and stores the radiance.

use std::time::Instant;

use lux_math::Ray;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Camera, Color, HdrImage, Pcg, Renderer, TraceOptions, World};

/// Binds an output image to the camera that looks at the scene.
pub struct ImageTracer<'a> {
    image: &'a mut HdrImage,
    camera: &'a dyn Camera,
}

impl<'a> ImageTracer<'a> {
    pub fn new(image: &'a mut HdrImage, camera: &'a dyn Camera) -> Self {
        Self { image, camera }
    }

    pub fn image(&self) -> &HdrImage {
        self.image
    }

    /// Ray through pixel `(col, row)` at the sub-pixel offset
    /// `(u_pixel, v_pixel)`; `(0.5, 0.5)` is the pixel centre. Row 0 is the
    /// top of the image.
    pub fn fire_ray(&self, col: u32, row: u32, u_pixel: f32, v_pixel: f32) -> Ray {
        fire_pixel_ray(self.camera, self.image, col, row, u_pixel, v_pixel)
    }

    /// Render every pixel in place.
    ///
    /// Buckets are rendered in parallel. Each pixel draws its samples from
    /// its own generator, seeded from `options.seed` and the pixel index, so
    /// the result does not depend on thread scheduling.
    pub fn fire_all_rays(&mut self, world: &World, renderer: &dyn Renderer, options: &TraceOptions) {
        let started = Instant::now();
        let (width, height) = (self.image.width, self.image.height);
        let buckets = generate_buckets(width, height, options.bucket_size);
        let samples_per_side = options.samples_per_side.filter(|&n| n > 0);

        log::info!(
            "Rendering {}x{} with {} sample(s) per pixel",
            width,
            height,
            samples_per_side.map_or(1, |n| n * n)
        );
        log::debug!("{} buckets of {} px", buckets.len(), options.bucket_size);

        let camera = self.camera;
        let frame: &HdrImage = self.image;
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                render_bucket(bucket, |col, row| {
                    let pixel_index = u64::from(row) * u64::from(width) + u64::from(col);
                    let mut pcg = Pcg::new(options.seed, pixel_index);
                    let fire = |u_pixel: f32, v_pixel: f32| {
                        fire_pixel_ray(camera, frame, col, row, u_pixel, v_pixel)
                    };

                    match samples_per_side {
                        None => renderer.radiance(world, &fire(0.5, 0.5), &mut pcg),
                        Some(n) => {
                            let mut total = Color::ZERO;
                            for inter_row in 0..n {
                                for inter_col in 0..n {
                                    let u_pixel = (inter_col as f32 + pcg.random_float()) / n as f32;
                                    let v_pixel = (inter_row as f32 + pcg.random_float()) / n as f32;
                                    total += renderer.radiance(world, &fire(u_pixel, v_pixel), &mut pcg);
                                }
                            }
                            total / (n * n) as f32
                        }
                    }
                })
            })
            .collect();

        for result in &results {
            result.blit(self.image);
        }

        log::info!("Render finished in {:.2?}", started.elapsed());
    }
}

fn fire_pixel_ray(
    camera: &dyn Camera,
    image: &HdrImage,
    col: u32,
    row: u32,
    u_pixel: f32,
    v_pixel: f32,
) -> Ray {
    let u = (col as f32 + u_pixel) / image.width as f32;
    let v = 1.0 - (row as f32 + v_pixel) / image.height as f32;
    camera.fire_ray(u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Primitive;
    use crate::{Material, OnOffRenderer, PathTracer, PerspectiveCamera, Sphere};
    use lux_math::{Point, Transformation, Vec3};
    use rand::RngCore;
    use std::sync::Arc;

    /// Encodes the point where the primary ray crosses the screen.
    struct ScreenPointRenderer;

    impl Renderer for ScreenPointRenderer {
        fn radiance(&self, _world: &World, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
            ray.at(1.0).to_vec()
        }
    }

    #[test]
    fn test_sub_pixel_remapping() {
        let mut image = HdrImage::new(4, 2);
        let camera = PerspectiveCamera::new(2.0);
        let tracer = ImageTracer::new(&mut image, &camera);

        let ray1 = tracer.fire_ray(0, 0, 2.5, 1.5);
        let ray2 = tracer.fire_ray(2, 1, 0.5, 0.5);
        assert!(ray1.is_close(&ray2));
    }

    #[test]
    fn test_image_orientation() {
        let mut image = HdrImage::new(4, 2);
        let camera = PerspectiveCamera::new(2.0);
        let tracer = ImageTracer::new(&mut image, &camera);

        // Top-left corner
        let top_left = tracer.fire_ray(0, 0, 0.0, 0.0);
        assert!(top_left.at(1.0).is_close(&Point::new(0.0, 2.0, 1.0)));

        // Bottom-right corner
        let bottom_right = tracer.fire_ray(3, 1, 1.0, 1.0);
        assert!(bottom_right.at(1.0).is_close(&Point::new(0.0, -2.0, -1.0)));
    }

    #[test]
    fn test_image_coverage() {
        let mut image = HdrImage::new(7, 5);
        let camera = PerspectiveCamera::new(7.0 / 5.0);
        let world = World::new();
        let renderer = OnOffRenderer {
            on_color: Color::ZERO,
            off_color: Color::new(1.0, 2.0, 3.0),
        };

        let options = TraceOptions {
            bucket_size: 3,
            ..TraceOptions::default()
        };
        ImageTracer::new(&mut image, &camera).fire_all_rays(&world, &renderer, &options);

        for row in 0..image.height {
            for col in 0..image.width {
                assert_eq!(image.get(col, row), Color::new(1.0, 2.0, 3.0));
            }
        }
    }

    #[test]
    fn test_antialiasing_averages_over_the_pixel() {
        let mut image = HdrImage::new(4, 2);
        let camera = PerspectiveCamera::new(2.0);
        let options = TraceOptions {
            samples_per_side: Some(10),
            ..TraceOptions::default()
        };
        ImageTracer::new(&mut image, &camera).fire_all_rays(&World::new(), &ScreenPointRenderer, &options);

        let mut reference = HdrImage::new(4, 2);
        let tracer = ImageTracer::new(&mut reference, &camera);
        for row in 0..2 {
            for col in 0..4 {
                let centre = tracer.fire_ray(col, row, 0.5, 0.5).at(1.0).to_vec();
                let averaged = image.get(col, row);
                assert!((averaged - centre).abs().max_element() < 0.05);
            }
        }
    }

    #[test]
    fn test_render_is_reproducible() {
        let mut world = World::new();
        world.add(Primitive::new(
            Sphere,
            Transformation::translation(Vec3::new(3.0, 0.0, 0.0)),
            Arc::new(Material::diffuse(Color::splat(0.5))),
        ));
        let renderer = PathTracer {
            background: Color::ONE,
            num_of_rays: 2,
            max_depth: 2,
            roulette_depth: 1,
        };
        let camera = PerspectiveCamera::new(1.0);
        let options = TraceOptions {
            samples_per_side: Some(2),
            seed: 17,
            bucket_size: 4,
        };

        let render = || {
            let mut image = HdrImage::new(9, 9);
            ImageTracer::new(&mut image, &camera).fire_all_rays(&world, &renderer, &options);
            image
        };

        let first = render();
        let second = render();
        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(first.get(col, row), second.get(col, row));
            }
        }
    }
}
