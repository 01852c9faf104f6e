use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use lux_renderer::{RenderSettings, RendererKind};

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneKind {
    /// Checkered floor, mirror, CSG and a cylinder under an emissive sky
    Demo,
    /// A diffuse emissive sphere around the camera; renders a flat grey
    Furnace,
    /// The four boolean operations side by side
    Csg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RendererArg {
    OnOff,
    Flat,
    PointLight,
    PathTracer,
}

impl From<RendererArg> for RendererKind {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::OnOff => RendererKind::OnOff,
            RendererArg::Flat => RendererKind::Flat,
            RendererArg::PointLight => RendererKind::PointLight,
            RendererArg::PathTracer => RendererKind::PathTracer,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Projection {
    Perspective,
    Orthogonal,
}

#[derive(Parser)]
#[command(name = "lux")]
#[command(about = "An offline Monte Carlo path tracer", version)]
pub struct Cli {
    /// Set the logging level (RUST_LOG still applies per module)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a built-in scene to a PNG file
    Render(RenderArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    #[arg(long, value_enum, default_value = "demo")]
    pub scene: SceneKind,

    /// JSON file with render settings; flags below override it
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long, value_enum)]
    pub renderer: Option<RendererArg>,

    /// Stratified antialiasing: n × n samples per pixel
    #[arg(long)]
    pub samples_per_side: Option<u32>,

    /// Seed of the per-pixel random streams
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value = "perspective")]
    pub projection: Projection,

    /// Rotation of the camera around the vertical axis, in degrees
    #[arg(long, default_value_t = 0.0)]
    pub angle_deg: f32,

    /// Image wrapped around the demo's central sphere
    #[arg(long)]
    pub texture: Option<PathBuf>,

    #[arg(short, long, default_value = "lux.png")]
    pub output: PathBuf,
}

impl RenderArgs {
    /// Overwrite the fields of `settings` given on the command line.
    pub fn apply(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(renderer) = self.renderer {
            settings.renderer = renderer.into();
        }
        if self.samples_per_side.is_some() {
            settings.samples_per_side = self.samples_per_side;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "lux",
            "render",
            "--width",
            "32",
            "--renderer",
            "point-light",
            "--samples-per-side",
            "3",
        ]);
        let Command::Render(args) = cli.command;

        let mut settings = RenderSettings::default();
        args.apply(&mut settings);
        assert_eq!(settings.width, 32);
        assert_eq!(settings.height, RenderSettings::default().height);
        assert_eq!(settings.renderer, RendererKind::PointLight);
        assert_eq!(settings.samples_per_side, Some(3));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["lux", "render"]);
        assert!(matches!(cli.log_level, LogLevel::Info));
        let Command::Render(args) = cli.command;
        assert!(matches!(args.scene, SceneKind::Demo));
        assert_eq!(args.output, PathBuf::from("lux.png"));
    }
}
