use thiserror::Error;

/// Malformed inputs to the geometric core.
///
/// Geometric non-events (a ray missing a shape) are never errors; they are
/// reported as `None` or empty collections by the intersection code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("invalid ray interval: tmin ({tmin}) must be smaller than tmax ({tmax})")]
    InvalidInterval { tmin: f32, tmax: f32 },

    #[error("ray parameter {t} lies outside [{tmin}, {tmax}]")]
    OutOfRange { t: f32, tmin: f32, tmax: f32 },

    #[error("expected {expected} components, found {found}")]
    Arity { expected: usize, found: usize },
}

pub type MathResult<T> = Result<T, MathError>;
