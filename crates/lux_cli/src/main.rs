use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use lux_math::Transformation;
use lux_renderer::{Camera, HdrImage, ImageTracer, OrthogonalCamera, PerspectiveCamera, RenderSettings};

mod cli;
mod logger;
mod scenes;

use cli::{Cli, Command, Projection, RenderArgs};
use logger::init_logger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.clone().into());

    match cli.command {
        Command::Render(args) => render(&args),
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let mut settings = match &args.settings {
        Some(path) => RenderSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    args.apply(&mut settings);
    settings.validate().context("Invalid render settings")?;
    log::debug!("Effective settings: {}", serde_json::to_string(&settings)?);

    let texture = match &args.texture {
        Some(path) => Some(Arc::new(
            HdrImage::load(path).with_context(|| format!("Failed to load texture {}", path.display()))?,
        )),
        None => None,
    };

    let start = Instant::now();
    let scene = scenes::build(args.scene, texture);
    info!("Scene {:?} built with {} shapes in {:?}", args.scene, scene.world.len(), start.elapsed());

    let placement = scene.camera * Transformation::rotation_z(args.angle_deg.to_radians());
    let camera: Box<dyn Camera> = match args.projection {
        Projection::Perspective => Box::new(
            PerspectiveCamera::new(settings.aspect_ratio()).with_transformation(placement),
        ),
        Projection::Orthogonal => Box::new(
            OrthogonalCamera::new(settings.aspect_ratio()).with_transformation(placement),
        ),
    };

    let renderer = settings.build_renderer();
    let mut image = HdrImage::new(settings.width, settings.height);
    ImageTracer::new(&mut image, camera.as_ref()).fire_all_rays(
        &scene.world,
        renderer.as_ref(),
        &settings.trace_options(),
    );

    image.normalize_image(settings.a_factor, None);
    image.clamp_image();
    image
        .save_png(&args.output, settings.gamma)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Saved {}", args.output.display());
    Ok(())
}
