use glam::Vec3;

use crate::{Interval, MathError, MathResult, Point, EPSILON};

/// Default lower bound of the parameter interval, keeps rays from hitting
/// the surface they leave.
pub const DEFAULT_TMIN: f32 = 1e-5;

/// A ray with origin, direction, a valid parameter interval and a bounce depth.
///
/// The interval invariant `tmin < tmax` is checked at construction, which is
/// why the bounds are only reachable through getters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point,
    /// Direction vector (not necessarily normalized)
    pub dir: Vec3,
    /// Number of bounces that led to this ray
    pub depth: u32,
    tmin: f32,
    tmax: f32,
}

impl Ray {
    /// Create a camera-style ray: `[DEFAULT_TMIN, +inf)`, depth 0.
    #[inline]
    pub fn new(origin: Point, dir: Vec3) -> Self {
        Self {
            origin,
            dir,
            depth: 0,
            tmin: DEFAULT_TMIN,
            tmax: f32::INFINITY,
        }
    }

    /// Create a ray with an explicit parameter interval.
    pub fn with_range(
        origin: Point,
        dir: Vec3,
        tmin: f32,
        tmax: f32,
        depth: u32,
    ) -> MathResult<Self> {
        // Written negated so that NaN bounds are rejected as well
        if !(tmin < tmax) {
            return Err(MathError::InvalidInterval { tmin, tmax });
        }
        Ok(Self {
            origin,
            dir,
            depth,
            tmin,
            tmax,
        })
    }

    /// Create a ray that is valid from `tmin` to infinity.
    #[inline]
    pub fn unbounded(origin: Point, dir: Vec3, tmin: f32, depth: u32) -> Self {
        debug_assert!(tmin.is_finite());
        Self {
            origin,
            dir,
            depth,
            tmin,
            tmax: f32::INFINITY,
        }
    }

    #[inline]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Same interval and depth, new origin and direction.
    #[inline]
    pub fn with_geometry(&self, origin: Point, dir: Vec3) -> Self {
        Self {
            origin,
            dir,
            ..*self
        }
    }

    #[inline]
    pub fn tmin(&self) -> f32 {
        self.tmin
    }

    #[inline]
    pub fn tmax(&self) -> f32 {
        self.tmax
    }

    /// The valid parameter range as an interval.
    #[inline]
    pub fn t_range(&self) -> Interval {
        Interval::new(self.tmin, self.tmax)
    }

    /// True if `t` lies in `[tmin, tmax]`.
    #[inline]
    pub fn accepts(&self, t: f32) -> bool {
        self.t_range().contains(t)
    }

    /// Point along the ray at parameter t, without range checks.
    ///
    /// Returns: origin + t * dir
    #[inline]
    pub fn at(&self, t: f32) -> Point {
        self.origin + self.dir * t
    }

    /// Checked evaluation: `t = 0` yields the origin, any other `t` must lie
    /// inside the ray's interval.
    pub fn eval(&self, t: f32) -> MathResult<Point> {
        if t == 0.0 {
            return Ok(self.origin);
        }
        if !self.accepts(t) {
            return Err(MathError::OutOfRange {
                t,
                tmin: self.tmin,
                tmax: self.tmax,
            });
        }
        Ok(self.at(t))
    }

    pub fn is_close(&self, other: &Ray) -> bool {
        self.origin.is_close(&other.origin) && self.dir.abs_diff_eq(other.dir, EPSILON)
    }
}
