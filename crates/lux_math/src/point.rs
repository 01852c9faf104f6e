use std::ops::{Add, AddAssign, Sub};

use glam::{Vec3, Vec4};

use crate::EPSILON;

/// A position in 3D space.
///
/// Kept distinct from `Vec3` so that only affine operations compile:
/// `Point + Vec3`, `Point - Vec3` and `Point - Point`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position vector from the origin to this point.
    #[inline]
    pub fn to_vec(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn from_vec(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Homogeneous form `(x, y, z, 1)`.
    #[inline]
    pub fn to_homogeneous(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 1.0)
    }

    pub fn is_close(&self, other: &Point) -> bool {
        self.to_vec().abs_diff_eq(other.to_vec(), EPSILON)
    }
}

impl From<Vec3> for Point {
    fn from(v: Vec3) -> Self {
        Self::from_vec(v)
    }
}

impl Add<Vec3> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vec3) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vec3> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub<Vec3> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Vec3) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<Point> for Point {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Point) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
