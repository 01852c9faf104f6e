use std::ops::{Mul, Neg};

use glam::Vec3;

use crate::EPSILON;

/// A surface normal.
///
/// Normals are covectors: a `Transformation` maps them through the
/// transpose of its inverse linear block, which keeps them perpendicular to
/// surfaces under non-uniform scaling.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Normal {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Normal {
    pub const X: Normal = Normal::new(1.0, 0.0, 0.0);
    pub const Y: Normal = Normal::new(0.0, 1.0, 0.0);
    pub const Z: Normal = Normal::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_vec(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn from_vec(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    #[inline]
    pub fn dot(self, v: Vec3) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn length(self) -> f32 {
        self.to_vec().length()
    }

    pub fn normalize(self) -> Self {
        Self::from_vec(self.to_vec().normalize())
    }

    /// Returns this normal or its opposite, whichever faces against `dir`.
    #[inline]
    pub fn facing(self, dir: Vec3) -> Self {
        if self.dot(dir) < 0.0 {
            self
        } else {
            -self
        }
    }

    pub fn is_close(&self, other: &Normal) -> bool {
        self.to_vec().abs_diff_eq(other.to_vec(), EPSILON)
    }
}

impl Neg for Normal {
    type Output = Normal;

    fn neg(self) -> Normal {
        Normal::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Normal {
    type Output = Normal;

    fn mul(self, rhs: f32) -> Normal {
        Normal::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<Vec3> for Normal {
    fn from(v: Vec3) -> Self {
        Self::from_vec(v)
    }
}
