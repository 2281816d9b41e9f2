use std::ops::{Add, Mul};

use super::quat::Quat;
use super::vec3::Vec3;

/// A 3x3 matrix stored in row-major order.
///
/// Used for rotation matrices and inverse inertia tensors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Rows of the matrix
    pub rows: [Vec3; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// Zero matrix
    pub const ZERO: Self = Self {
        rows: [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO],
    };

    /// Identity matrix
    pub const IDENTITY: Self = Self {
        rows: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// Creates a matrix from row vectors
    #[inline]
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    /// Creates a diagonal matrix
    #[inline]
    pub fn from_diagonal(diag: Vec3) -> Self {
        Self::from_rows(
            Vec3::new(diag.x, 0.0, 0.0),
            Vec3::new(0.0, diag.y, 0.0),
            Vec3::new(0.0, 0.0, diag.z),
        )
    }

    /// Creates a rotation matrix from a unit quaternion using the standard
    /// identities (`1 - 2y^2 - 2z^2`, ...).
    #[inline]
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Self::from_rows(
            Vec3::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)),
            Vec3::new(2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)),
            Vec3::new(2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)),
        )
    }

    /// Returns a row of the matrix
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        self.rows[i]
    }

    /// Returns a column of the matrix
    #[inline]
    pub fn col(&self, j: usize) -> Vec3 {
        Vec3::new(self.rows[0][j], self.rows[1][j], self.rows[2][j])
    }

    /// Returns the element at row `i`, column `j`
    #[inline]
    pub fn element(&self, i: usize, j: usize) -> f32 {
        self.rows[i][j]
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows(self.col(0), self.col(1), self.col(2))
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(&self) -> Self {
        Self::from_rows(self.rows[0].abs(), self.rows[1].abs(), self.rows[2].abs())
    }

    /// Transforms a vector by this matrix
    #[inline]
    pub fn transform_vec(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    /// Scalar multiplication
    #[inline]
    pub fn scale(&self, s: f32) -> Self {
        Self::from_rows(self.rows[0] * s, self.rows[1] * s, self.rows[2] * s)
    }
}

impl Add for Mat3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_rows(
            self.rows[0] + other.rows[0],
            self.rows[1] + other.rows[1],
            self.rows[2] + other.rows[2],
        )
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        let t = other.transpose();
        Self::from_rows(
            Vec3::new(
                self.rows[0].dot(t.rows[0]),
                self.rows[0].dot(t.rows[1]),
                self.rows[0].dot(t.rows[2]),
            ),
            Vec3::new(
                self.rows[1].dot(t.rows[0]),
                self.rows[1].dot(t.rows[1]),
                self.rows[1].dot(t.rows[2]),
            ),
            Vec3::new(
                self.rows[2].dot(t.rows[0]),
                self.rows[2].dot(t.rows[1]),
                self.rows[2].dot(t.rows[2]),
            ),
        )
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.transform_vec(v)
    }
}

impl Mul<f32> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        self.scale(s)
    }
}
