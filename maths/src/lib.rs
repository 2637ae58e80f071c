use core::ops::{Add, Mul, Neg, Sub};
use std::fmt;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);
    pub const MAX: Self = Self::splat(f32::MAX);
    pub const MIN: Self = Self::splat(-f32::MAX);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub const fn from_array(arr: &[f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::ZERO;
        }

        Self::new(self.x / length, self.y / length, self.z / length)
    }

    pub const fn dot(&self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub const fn min(a: Self, b: Self) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
    }

    pub const fn max(a: Self, b: Self) -> Self {
        Self::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn abs_diff_eq(&self, rhs: Self, max_abs_diff: f32) -> bool {
        (self.x - rhs.x).abs() <= max_abs_diff
            && (self.y - rhs.y).abs() <= max_abs_diff
            && (self.z - rhs.z).abs() <= max_abs_diff
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(arr: [f32; 3]) -> Self {
        Self::from_array(&arr)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn from_array(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    pub const fn from_point(point: Vec3) -> Self {
        Self::new(point.x, point.y, point.z, 1.0)
    }

    pub const fn from_direction(vector: Vec3) -> Self {
        Self::new(vector.x, vector.y, vector.z, 0.0)
    }

    pub const fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub const fn truncate(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

/// Returned by [`Mat4::try_inverse`] when the matrix has no usable inverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingularMatrix {
    pub determinant: f32,
}

impl fmt::Display for SingularMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matrix is not invertible (determinant: {})",
            self.determinant
        )
    }
}

impl std::error::Error for SingularMatrix {}

/// 4x4 matrix stored as four axis vectors.
///
/// In the 2D array form `m[i][j]` is component `j` of axis `i`, so the
/// translation lives in `m[3][0..3]` (`w_axis`). Points are transformed as
/// column vectors: `m[0] * x + m[1] * y + m[2] * z + m[3]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    pub x_axis: Vec4,
    pub y_axis: Vec4,
    pub z_axis: Vec4,
    pub w_axis: Vec4,
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    /// Determinants with a magnitude at or below this are treated as singular.
    /// The threshold is absolute: a uniform scale `s` has determinant `s^3`, so
    /// scales near `1e-4` already fall below it.
    pub const DEFAULT_DETERMINANT_EPSILON: f32 = 1.0e-12;

    pub const fn a1(&self) -> f32 {
        self.x_axis.x
    }

    pub const fn a2(&self) -> f32 {
        self.x_axis.y
    }

    pub const fn a3(&self) -> f32 {
        self.x_axis.z
    }

    pub const fn a4(&self) -> f32 {
        self.x_axis.w
    }

    pub const fn b1(&self) -> f32 {
        self.y_axis.x
    }

    pub const fn b2(&self) -> f32 {
        self.y_axis.y
    }

    pub const fn b3(&self) -> f32 {
        self.y_axis.z
    }

    pub const fn b4(&self) -> f32 {
        self.y_axis.w
    }

    pub const fn c1(&self) -> f32 {
        self.z_axis.x
    }

    pub const fn c2(&self) -> f32 {
        self.z_axis.y
    }

    pub const fn c3(&self) -> f32 {
        self.z_axis.z
    }

    pub const fn c4(&self) -> f32 {
        self.z_axis.w
    }

    pub const fn d1(&self) -> f32 {
        self.w_axis.x
    }

    pub const fn d2(&self) -> f32 {
        self.w_axis.y
    }

    pub const fn d3(&self) -> f32 {
        self.w_axis.z
    }

    pub const fn d4(&self) -> f32 {
        self.w_axis.w
    }

    pub const fn from_cols(x_axis: Vec4, y_axis: Vec4, z_axis: Vec4, w_axis: Vec4) -> Self {
        Self {
            x_axis,
            y_axis,
            z_axis,
            w_axis,
        }
    }

    pub const fn from_cols_array_2d(columns: [[f32; 4]; 4]) -> Self {
        Self::from_cols(
            Vec4::from_array(columns[0]),
            Vec4::from_array(columns[1]),
            Vec4::from_array(columns[2]),
            Vec4::from_array(columns[3]),
        )
    }

    pub const fn from_rows_array_2d(rows: [[f32; 4]; 4]) -> Self {
        Self::from_cols(
            Vec4::new(rows[0][0], rows[1][0], rows[2][0], rows[3][0]),
            Vec4::new(rows[0][1], rows[1][1], rows[2][1], rows[3][1]),
            Vec4::new(rows[0][2], rows[1][2], rows[2][2], rows[3][2]),
            Vec4::new(rows[0][3], rows[1][3], rows[2][3], rows[3][3]),
        )
    }

    pub const fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        [
            self.x_axis.to_array(),
            self.y_axis.to_array(),
            self.z_axis.to_array(),
            self.w_axis.to_array(),
        ]
    }

    pub const fn determinant(&self) -> f32 {
        let (a1, a2, a3, a4) = (self.a1(), self.a2(), self.a3(), self.a4());
        let (b1, b2, b3, b4) = (self.b1(), self.b2(), self.b3(), self.b4());
        let (c1, c2, c3, c4) = (self.c1(), self.c2(), self.c3(), self.c4());
        let (d1, d2, d3, d4) = (self.d1(), self.d2(), self.d3(), self.d4());

        a1 * Self::det3(b2, b3, b4, c2, c3, c4, d2, d3, d4)
            - a2 * Self::det3(b1, b3, b4, c1, c3, c4, d1, d3, d4)
            + a3 * Self::det3(b1, b2, b4, c1, c2, c4, d1, d2, d4)
            - a4 * Self::det3(b1, b2, b3, c1, c2, c3, d1, d2, d3)
    }

    pub const fn cofactor(&self) -> Self {
        let (a1, a2, a3, a4) = (self.a1(), self.a2(), self.a3(), self.a4());
        let (b1, b2, b3, b4) = (self.b1(), self.b2(), self.b3(), self.b4());
        let (c1, c2, c3, c4) = (self.c1(), self.c2(), self.c3(), self.c4());
        let (d1, d2, d3, d4) = (self.d1(), self.d2(), self.d3(), self.d4());

        let coa1 = Self::det3(b2, b3, b4, c2, c3, c4, d2, d3, d4);
        let coa2 = -Self::det3(b1, b3, b4, c1, c3, c4, d1, d3, d4);
        let coa3 = Self::det3(b1, b2, b4, c1, c2, c4, d1, d2, d4);
        let coa4 = -Self::det3(b1, b2, b3, c1, c2, c3, d1, d2, d3);

        let cob1 = -Self::det3(a2, a3, a4, c2, c3, c4, d2, d3, d4);
        let cob2 = Self::det3(a1, a3, a4, c1, c3, c4, d1, d3, d4);
        let cob3 = -Self::det3(a1, a2, a4, c1, c2, c4, d1, d2, d4);
        let cob4 = Self::det3(a1, a2, a3, c1, c2, c3, d1, d2, d3);

        let coc1 = Self::det3(a2, a3, a4, b2, b3, b4, d2, d3, d4);
        let coc2 = -Self::det3(a1, a3, a4, b1, b3, b4, d1, d3, d4);
        let coc3 = Self::det3(a1, a2, a4, b1, b2, b4, d1, d2, d4);
        let coc4 = -Self::det3(a1, a2, a3, b1, b2, b3, d1, d2, d3);

        let cod1 = -Self::det3(a2, a3, a4, b2, b3, b4, c2, c3, c4);
        let cod2 = Self::det3(a1, a3, a4, b1, b3, b4, c1, c3, c4);
        let cod3 = -Self::det3(a1, a2, a4, b1, b2, b4, c1, c2, c4);
        let cod4 = Self::det3(a1, a2, a3, b1, b2, b3, c1, c2, c3);

        Self::from_cols(
            Vec4::new(coa1, coa2, coa3, coa4),
            Vec4::new(cob1, cob2, cob3, cob4),
            Vec4::new(coc1, coc2, coc3, coc4),
            Vec4::new(cod1, cod2, cod3, cod4),
        )
    }

    pub const fn transpose(&self) -> Self {
        Self::from_cols(
            Vec4::new(self.a1(), self.b1(), self.c1(), self.d1()),
            Vec4::new(self.a2(), self.b2(), self.c2(), self.d2()),
            Vec4::new(self.a3(), self.b3(), self.c3(), self.d3()),
            Vec4::new(self.a4(), self.b4(), self.c4(), self.d4()),
        )
    }

    pub const fn adjugate(&self) -> Self {
        self.cofactor().transpose()
    }

    /// Closed-form inverse (adjugate over determinant), no pivoting.
    pub fn try_inverse(&self) -> Result<Self, SingularMatrix> {
        self.try_inverse_with_epsilon(Self::DEFAULT_DETERMINANT_EPSILON)
    }

    /// Like [`Mat4::try_inverse`], treating `|det| <= epsilon` as singular.
    /// Never returns a matrix with non-finite components.
    pub fn try_inverse_with_epsilon(&self, epsilon: f32) -> Result<Self, SingularMatrix> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() <= epsilon {
            return Err(SingularMatrix { determinant });
        }

        let inverse = self.adjugate() * (1.0 / determinant);
        if !inverse.is_finite() {
            return Err(SingularMatrix { determinant });
        }

        Ok(inverse)
    }

    /// `dst[i][j] = Σ_k a[k][j] * b[i][k]`, same as `a * b`.
    pub fn multiply(a: &Self, b: &Self) -> Self {
        *a * *b
    }

    /// Transforms `point`, translation included.
    pub fn transform_point3(&self, point: Vec3) -> Vec3 {
        (*self * Vec4::from_point(point)).truncate()
    }

    /// Transforms `vector` by the upper-left 3x3 only.
    pub fn transform_vector3(&self, vector: Vec3) -> Vec3 {
        (*self * Vec4::from_direction(vector)).truncate()
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(translation.x, translation.y, translation.z, 1.0),
        )
    }

    pub fn from_rotation(quat: Quat) -> Self {
        let (x, y, z, w) = (quat.x, quat.y, quat.z, quat.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);

        let xx2 = x * x2;
        let yy2 = y * y2;
        let zz2 = z * z2;
        let xy2 = x * y2;
        let xz2 = x * z2;
        let yz2 = y * z2;
        let wx2 = w * x2;
        let wy2 = w * y2;
        let wz2 = w * z2;

        Self::from_cols(
            Vec4::new(1.0 - (yy2 + zz2), xy2 + wz2, xz2 - wy2, 0.0),
            Vec4::new(xy2 - wz2, 1.0 - (xx2 + zz2), yz2 + wx2, 0.0),
            Vec4::new(xz2 + wy2, yz2 - wx2, 1.0 - (xx2 + yy2), 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    pub fn extract_translation(&self) -> Vec3 {
        self.w_axis.truncate()
    }

    /// Copy of `self` with the translation axis zeroed. `w_axis.w` is kept.
    pub fn without_translation(&self) -> Self {
        let mut m = *self;
        m.w_axis.x = 0.0;
        m.w_axis.y = 0.0;
        m.w_axis.z = 0.0;
        m
    }

    pub fn is_finite(&self) -> bool {
        self.x_axis.is_finite()
            && self.y_axis.is_finite()
            && self.z_axis.is_finite()
            && self.w_axis.is_finite()
    }

    pub fn abs_diff_eq(&self, rhs: &Self, max_abs_diff: f32) -> bool {
        self.to_cols_array_2d()
            .iter()
            .flatten()
            .zip(rhs.to_cols_array_2d().iter().flatten())
            .all(|(a, b)| (a - b).abs() <= max_abs_diff)
    }

    #[allow(clippy::too_many_arguments)]
    const fn det3(
        a1: f32,
        a2: f32,
        a3: f32,
        b1: f32,
        b2: f32,
        b3: f32,
        c1: f32,
        c2: f32,
        c3: f32,
    ) -> f32 {
        a1 * (b2 * c3 - b3 * c2) - a2 * (b1 * c3 - b3 * c1) + a3 * (b1 * c2 - b2 * c1)
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, axis) in self.to_cols_array_2d().iter().enumerate() {
            writeln!(
                f,
                "m[{i}] = {:.6}, {:.6}, {:.6}, {:.6}",
                axis[0], axis[1], axis[2], axis[3]
            )?;
        }
        Ok(())
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::from_cols(
            self.x_axis * rhs,
            self.y_axis * rhs,
            self.z_axis * rhs,
            self.w_axis * rhs,
        )
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_cols(
            self * rhs.x_axis,
            self * rhs.y_axis,
            self * rhs.z_axis,
            self * rhs.w_axis,
        )
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.a1() * rhs.x + self.b1() * rhs.y + self.c1() * rhs.z + self.d1() * rhs.w,
            self.a2() * rhs.x + self.b2() * rhs.y + self.c2() * rhs.z + self.d2() * rhs.w,
            self.a3() * rhs.x + self.b3() * rhs.y + self.c3() * rhs.z + self.d3() * rhs.w,
            self.a4() * rhs.x + self.b4() * rhs.y + self.c4() * rhs.z + self.d4() * rhs.w,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn normalize(&self) -> Self {
        let length = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if length == 0.0 {
            return Self::IDENTITY;
        }

        Self::new(
            self.x / length,
            self.y / length,
            self.z / length,
            self.w / length,
        )
    }

    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let sin_half_angle = half_angle.sin();
        let cos_half_angle = half_angle.cos();

        Self::new(
            axis.x * sin_half_angle,
            axis.y * sin_half_angle,
            axis.z * sin_half_angle,
            cos_half_angle,
        )
        .normalize()
    }

    pub fn from_rotation_y(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, angle)
    }

    pub fn from_rotation_z(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Z, angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    fn sample_matrix() -> Mat4 {
        Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0))
            * Mat4::from_rotation(Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalized(), 0.7))
            * Mat4::from_scale(Vec3::new(2.0, 0.5, 3.0))
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample_matrix();
        assert!((Mat4::IDENTITY * m).abs_diff_eq(&m, EPS));
        assert!((m * Mat4::IDENTITY).abs_diff_eq(&m, EPS));
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn test_multiply_matches_index_formula() {
        let a = sample_matrix();
        let b = Mat4::from_rotation(Quat::from_rotation_z(0.3)) * Mat4::from_translation(Vec3::X);
        let (am, bm) = (a.to_cols_array_2d(), b.to_cols_array_2d());

        let mut expected = [[0.0f32; 4]; 4];
        for (i, row) in expected.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4).map(|k| am[k][j] * bm[i][k]).sum();
            }
        }

        let dst = Mat4::multiply(&a, &b);
        assert!(dst.abs_diff_eq(&Mat4::from_cols_array_2d(expected), EPS));
    }

    #[test]
    fn test_multiply_applies_rhs_first() {
        let a = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let b = Mat4::from_scale(Vec3::splat(2.0));
        let p = Vec3::new(1.0, 1.0, 1.0);

        let composed = Mat4::multiply(&a, &b).transform_point3(p);
        let chained = a.transform_point3(b.transform_point3(p));
        assert!(composed.abs_diff_eq(chained, EPS));
        assert!(composed.abs_diff_eq(Vec3::new(7.0, 2.0, 2.0), EPS));
    }

    #[test]
    fn test_transpose_round_trip() {
        let m = sample_matrix();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().a2(), m.b1());
        assert_eq!(m.transpose().d1(), m.a4());
    }

    #[test]
    fn test_rows_and_cols_agree() {
        let rows = [
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ];
        assert_eq!(
            Mat4::from_rows_array_2d(rows),
            Mat4::from_cols_array_2d(rows).transpose()
        );
    }

    #[test]
    fn test_transform_point_includes_translation() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_rotation_about_z() {
        let m = Mat4::from_rotation(Quat::from_rotation_z(FRAC_PI_2));
        assert!(m.transform_vector3(Vec3::X).abs_diff_eq(Vec3::Y, EPS));
        assert!(m.transform_vector3(Vec3::Y).abs_diff_eq(-Vec3::X, EPS));
    }

    #[test]
    fn test_inverse_of_sample() {
        let m = sample_matrix();
        let inv = m.try_inverse().unwrap();
        assert!((m * inv).abs_diff_eq(&Mat4::IDENTITY, EPS));
        assert!((inv * m).abs_diff_eq(&Mat4::IDENTITY, EPS));
    }

    #[test]
    fn test_inverse_of_translation() {
        let m = Mat4::from_translation(Vec3::new(3.0, -4.0, 5.0));
        let inv = m.try_inverse().unwrap();
        assert!(inv.abs_diff_eq(&Mat4::from_translation(Vec3::new(-3.0, 4.0, -5.0)), EPS));
    }

    #[test]
    fn test_singular_matrix_is_reported() {
        let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let err = flat.try_inverse().unwrap_err();
        assert_eq!(err.determinant, 0.0);
        assert!(err.to_string().contains("not invertible"));

        let zero: Mat4 = bytemuck::Zeroable::zeroed();
        assert!(zero.try_inverse().is_err());
    }

    #[test]
    fn test_non_finite_matrix_is_reported() {
        let mut m = Mat4::IDENTITY;
        m.x_axis.x = f32::NAN;
        assert!(m.try_inverse().is_err());

        m.x_axis.x = f32::INFINITY;
        assert!(m.try_inverse().is_err());
    }

    #[test]
    fn test_epsilon_threshold() {
        let tiny = Mat4::from_scale(Vec3::splat(1.0e-2));
        assert!(tiny.try_inverse().is_ok());
        assert!(tiny.try_inverse_with_epsilon(1.0e-3).is_err());
    }

    #[test]
    fn test_without_translation() {
        let m = sample_matrix().without_translation();
        assert_eq!(m.extract_translation(), Vec3::ZERO);
        assert_eq!(m.d4(), 1.0);
        assert_eq!(m.x_axis, sample_matrix().x_axis);
    }

    #[test]
    fn test_display_prints_each_axis() {
        let printed = Mat4::IDENTITY.to_string();
        assert_eq!(printed.lines().count(), 4);
        assert!(printed.starts_with("m[0] = 1.000000, 0.000000"));
    }

    #[test]
    fn test_mat4_is_pod() {
        let bytes = bytemuck::bytes_of(&Mat4::IDENTITY);
        assert_eq!(bytes.len(), 64);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[15], 1.0);
    }

    fn trs_strategy() -> impl Strategy<Value = Mat4> {
        (
            prop::array::uniform3(-10.0f32..10.0),
            prop::array::uniform3(-1.0f32..1.0),
            -3.1f32..3.1,
            prop::array::uniform3(0.25f32..4.0),
        )
            .prop_filter("rotation axis must not be degenerate", |(_, axis, _, _)| {
                Vec3::from(*axis).length() > 0.1
            })
            .prop_map(|(t, axis, angle, s)| {
                let rotation = Quat::from_axis_angle(Vec3::from(axis).normalized(), angle);
                Mat4::from_translation(t.into())
                    * Mat4::from_rotation(rotation)
                    * Mat4::from_scale(s.into())
            })
    }

    proptest! {
        #[test]
        fn prop_inverse_of_inverse_is_original(m in trs_strategy()) {
            let inv = m.try_inverse().unwrap();
            let back = inv.try_inverse().unwrap();
            prop_assert!(back.abs_diff_eq(&m, 1e-2), "{m}\nvs\n{back}");
        }

        #[test]
        fn prop_inverse_undoes_point_transform(
            m in trs_strategy(),
            p in prop::array::uniform3(-10.0f32..10.0),
        ) {
            let inv = m.try_inverse().unwrap();
            let p = Vec3::from(p);
            let round_trip = inv.transform_point3(m.transform_point3(p));
            prop_assert!(round_trip.abs_diff_eq(p, 1e-2));
        }
    }
}
