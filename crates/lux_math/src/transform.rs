// Affine transformations with a cached inverse.
//
// A `Transformation` never mutates `m` and `m_inv` independently: every
// constructor and every composition produces both matrices at once.

use std::ops::Mul;

use glam::{Mat4, Vec3, Vec4};

use crate::{MathError, MathResult, Normal, Point, Ray, EPSILON};

/// An invertible affine map together with its inverse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transformation {
    m: Mat4,
    m_inv: Mat4,
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        m: Mat4::IDENTITY,
        m_inv: Mat4::IDENTITY,
    };

    /// Build from a matrix and an inverse the caller vouches for.
    ///
    /// Use [`Transformation::is_consistent`] to check the pair.
    pub fn new(m: Mat4, m_inv: Mat4) -> Self {
        Self { m, m_inv }
    }

    /// Build from a matrix, computing its inverse.
    pub fn from_matrix(m: Mat4) -> Self {
        Self::new(m, m.inverse())
    }

    /// Build from a row-major 4x4 array (the way matrices are written on paper).
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self::from_matrix(Mat4::from_cols_array_2d(&rows).transpose())
    }

    pub fn translation(offset: Vec3) -> Self {
        Self::new(Mat4::from_translation(offset), Mat4::from_translation(-offset))
    }

    /// Translation from a dynamically sized list of components.
    pub fn try_translation(components: &[f32]) -> MathResult<Self> {
        let offset = vec3_from_slice(components)?;
        Ok(Self::translation(offset))
    }

    /// Per-axis scaling. A zero factor yields a singular inverse; that is
    /// the caller's business.
    pub fn scaling(factors: Vec3) -> Self {
        Self::new(Mat4::from_scale(factors), Mat4::from_scale(factors.recip()))
    }

    pub fn uniform_scaling(factor: f32) -> Self {
        Self::scaling(Vec3::splat(factor))
    }

    /// Scaling from a list of one (uniform) or three (per-axis) factors.
    pub fn try_scaling(components: &[f32]) -> MathResult<Self> {
        match components {
            [factor] => Ok(Self::uniform_scaling(*factor)),
            _ => Ok(Self::scaling(vec3_from_slice(components)?)),
        }
    }

    /// Rotation around the x axis, angle in radians.
    pub fn rotation_x(angle: f32) -> Self {
        let m = Mat4::from_rotation_x(angle);
        Self::new(m, m.transpose())
    }

    /// Rotation around the y axis, angle in radians.
    pub fn rotation_y(angle: f32) -> Self {
        let m = Mat4::from_rotation_y(angle);
        Self::new(m, m.transpose())
    }

    /// Rotation around the z axis, angle in radians.
    pub fn rotation_z(angle: f32) -> Self {
        let m = Mat4::from_rotation_z(angle);
        Self::new(m, m.transpose())
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.m
    }

    #[inline]
    pub fn inverse_matrix(&self) -> &Mat4 {
        &self.m_inv
    }

    /// The inverse transformation. O(1): the two matrices swap roles.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self::new(self.m_inv, self.m)
    }

    /// Checks `M * M^-1 ≈ I`.
    pub fn is_consistent(&self) -> bool {
        (self.m * self.m_inv).abs_diff_eq(Mat4::IDENTITY, EPSILON)
    }

    pub fn is_close(&self, other: &Transformation) -> bool {
        self.m.abs_diff_eq(other.m, EPSILON) && self.m_inv.abs_diff_eq(other.m_inv, EPSILON)
    }

    /// Apply to a free vector: only the 3x3 linear block takes part.
    #[inline]
    pub fn apply_vector(&self, v: Vec3) -> Vec3 {
        self.m.transform_vector3(v)
    }

    /// Apply to a point, dividing by `w` when the map is projective.
    #[inline]
    pub fn apply_point(&self, p: Point) -> Point {
        let h: Vec4 = self.m * p.to_homogeneous();
        if h.w == 1.0 {
            Point::new(h.x, h.y, h.z)
        } else {
            Point::new(h.x / h.w, h.y / h.w, h.z / h.w)
        }
    }

    /// Apply to a normal through the transpose of the inverse linear block.
    #[inline]
    pub fn apply_normal(&self, n: Normal) -> Normal {
        let inv = &self.m_inv;
        Normal::new(
            inv.x_axis.x * n.x + inv.x_axis.y * n.y + inv.x_axis.z * n.z,
            inv.y_axis.x * n.x + inv.y_axis.y * n.y + inv.y_axis.z * n.z,
            inv.z_axis.x * n.x + inv.z_axis.y * n.y + inv.z_axis.z * n.z,
        )
    }

    /// Apply to a ray; the parameter interval and depth are preserved.
    #[inline]
    pub fn apply_ray(&self, ray: &Ray) -> Ray {
        ray.with_geometry(self.apply_point(ray.origin), self.apply_vector(ray.dir))
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn vec3_from_slice(components: &[f32]) -> MathResult<Vec3> {
    match components {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(MathError::Arity {
            expected: 3,
            found: components.len(),
        }),
    }
}

impl Mul for Transformation {
    type Output = Transformation;

    /// `(a * b)` applies `b` first, then `a`.
    fn mul(self, rhs: Transformation) -> Transformation {
        Transformation::new(self.m * rhs.m, rhs.m_inv * self.m_inv)
    }
}

impl<'a> Mul<&'a Transformation> for &'a Transformation {
    type Output = Transformation;

    fn mul(self, rhs: &'a Transformation) -> Transformation {
        *self * *rhs
    }
}

impl Mul<Vec3> for &Transformation {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.apply_vector(rhs)
    }
}

impl Mul<Point> for &Transformation {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply_point(rhs)
    }
}

impl Mul<Normal> for &Transformation {
    type Output = Normal;

    fn mul(self, rhs: Normal) -> Normal {
        self.apply_normal(rhs)
    }
}

impl Mul<&Ray> for &Transformation {
    type Output = Ray;

    fn mul(self, rhs: &Ray) -> Ray {
        self.apply_ray(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn sample_rows() -> [[f32; 4]; 4] {
        [
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 9.0, 8.0, 7.0],
            [6.0, 5.0, 4.0, 1.0],
        ]
    }

    fn affine_transforms() -> Vec<Transformation> {
        vec![
            Transformation::IDENTITY,
            Transformation::translation(Vec3::new(1.0, -2.0, 3.5)),
            Transformation::rotation_x(0.3),
            Transformation::rotation_y(-1.1),
            Transformation::rotation_z(2.4),
            Transformation::scaling(Vec3::new(2.0, 0.5, 3.0)),
            Transformation::translation(Vec3::X)
                * Transformation::rotation_z(0.7)
                * Transformation::scaling(Vec3::new(1.0, 2.0, 3.0)),
        ]
    }

    fn sample_transforms() -> Vec<Transformation> {
        let mut transforms = affine_transforms();
        transforms.push(Transformation::from_rows(sample_rows()));
        transforms
    }

    #[test]
    fn test_from_rows_inverse() {
        let t = Transformation::from_rows(sample_rows());
        let expected_inv = Mat4::from_cols_array_2d(&[
            [-3.75, 2.75, -1.0, 0.0],
            [4.375, -3.875, 2.0, -0.5],
            [0.5, 0.5, -1.0, 1.0],
            [-1.375, 0.875, 0.0, -0.5],
        ])
        .transpose();

        assert!(t.is_consistent());
        assert!(t.inverse_matrix().abs_diff_eq(expected_inv, 1e-3));
    }

    #[test]
    fn test_inconsistent_pair_is_detected() {
        let t = Transformation::new(Mat4::from_translation(Vec3::X), Mat4::IDENTITY);
        assert!(!t.is_consistent());
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        for t in sample_transforms() {
            assert!(t.is_consistent());
            assert!((t * t.inverse()).is_close(&Transformation::IDENTITY));
            assert!((t.inverse() * t).is_close(&Transformation::IDENTITY));
            assert!(t.inverse().inverse().is_close(&t));
        }
    }

    #[test]
    fn test_composition_keeps_inverse_in_sync() {
        let a = Transformation::translation(Vec3::new(0.0, 1.0, 2.0));
        let b = Transformation::scaling(Vec3::new(2.0, 3.0, 4.0));
        let c = &a * &b;

        assert!(c.is_consistent());
        assert!(c
            .inverse_matrix()
            .abs_diff_eq(*b.inverse_matrix() * *a.inverse_matrix(), EPSILON));
    }

    #[test]
    fn test_composition_applies_rightmost_first() {
        let translate = Transformation::translation(Vec3::X);
        let scale = Transformation::uniform_scaling(2.0);
        let p = Point::new(1.0, 0.0, 0.0);

        // Scale first, then translate: 1 * 2 + 1
        assert!((&(translate * scale) * p).is_close(&Point::new(3.0, 0.0, 0.0)));
        // Translate first, then scale: (1 + 1) * 2
        assert!((&(scale * translate) * p).is_close(&Point::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_translation_ignores_vectors() {
        let t = Transformation::translation(Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(&t * Vec3::X, Vec3::X);
        assert!((&t * Point::new(1.0, 2.0, 3.0)).is_close(&Point::new(11.0, 22.0, 33.0)));
    }

    #[test]
    fn test_rotations() {
        let rx = Transformation::rotation_x(FRAC_PI_2);
        let ry = Transformation::rotation_y(FRAC_PI_2);
        let rz = Transformation::rotation_z(FRAC_PI_2);

        assert!((&rx * Vec3::Y).abs_diff_eq(Vec3::Z, EPSILON));
        assert!((&ry * Vec3::Z).abs_diff_eq(Vec3::X, EPSILON));
        assert!((&rz * Vec3::X).abs_diff_eq(Vec3::Y, EPSILON));
        assert!(rx.is_consistent() && ry.is_consistent() && rz.is_consistent());
    }

    #[test]
    fn test_scaling() {
        let s = Transformation::scaling(Vec3::new(2.0, 5.0, 10.0));
        assert!((&s * Vec3::ONE).abs_diff_eq(Vec3::new(2.0, 5.0, 10.0), EPSILON));
        assert!(s.is_consistent());
    }

    #[test]
    fn test_projective_point_divides_by_w() {
        let m = Mat4::from_cols_array_2d(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 2.0],
        ]);
        let t = Transformation::from_matrix(m);
        assert!((&t * Point::new(2.0, 4.0, 6.0)).is_close(&Point::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_normals_stay_perpendicular_under_non_uniform_scaling() {
        let t = Transformation::scaling(Vec3::new(1.0, 4.0, 1.0))
            * Transformation::rotation_z(0.5);

        // Plane spanned by a and b, with normal n = a x b
        let a = Vec3::new(1.0, 1.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 1.0);
        let n = Normal::from_vec(a.cross(b));

        let ta = &t * a;
        let tb = &t * b;
        let tn = &t * n;

        assert!(tn.dot(ta).abs() < 1e-4);
        assert!(tn.dot(tb).abs() < 1e-4);
    }

    #[test]
    fn test_transformed_ray_commutes_with_evaluation() {
        let ray = Ray::new(Point::new(1.0, 2.0, 3.0), Vec3::new(6.0, 5.0, 4.0));
        for t in affine_transforms() {
            let transformed = &t * &ray;
            for &param in &[0.0, 0.5, 1.0, 2.5, 10.0] {
                let lhs = transformed.at(param);
                let rhs = &t * ray.at(param);
                assert!(
                    lhs.to_vec().abs_diff_eq(rhs.to_vec(), 1e-2),
                    "{lhs:?} != {rhs:?}"
                );
            }
        }
    }

    #[test]
    fn test_slice_constructors_check_arity() {
        assert!(Transformation::try_translation(&[1.0, 2.0, 3.0]).is_ok());
        assert_eq!(
            Transformation::try_translation(&[1.0, 2.0]),
            Err(MathError::Arity { expected: 3, found: 2 })
        );
        assert!(Transformation::try_scaling(&[2.0])
            .unwrap()
            .is_close(&Transformation::uniform_scaling(2.0)));
        assert!(Transformation::try_scaling(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }
}
