//! Error types for the renderer.

use lux_math::MathError;
use thiserror::Error;

/// Errors raised while building scenes or writing results.
///
/// Rays that miss everything are not errors; they end up as background
/// radiance inside the renderers.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Malformed settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid render settings: {0}")]
    Settings(String),

    #[error("Pixel buffer of {found} bytes does not fit a {width}x{height} image")]
    BufferSize { width: u32, height: u32, found: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
