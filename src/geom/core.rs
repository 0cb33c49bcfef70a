use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Vec3
// ─────────────────────────────────────────────────────────────────────────────

/// Direction or displacement in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Strict normalization: `None` for zero or non-finite lengths.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len.is_finite() && len > 0.0).then(|| self.div_scalar(len))
    }

    /// Total normalization used by the discrete estimators.
    ///
    /// The length is clamped to [`Tolerance::ZERO_LENGTH`] before dividing, so a
    /// (near) zero vector stays (near) zero instead of blowing up.
    #[must_use]
    pub fn normalize_clamped(self) -> Self {
        self.div_scalar(self.length().max(Tolerance::ZERO_LENGTH.eps))
    }

    /// Angle between two unit vectors in radians.
    ///
    /// The cosine is clamped to `[-1, 1]` so round-off on nearly (anti)parallel
    /// inputs never produces `NaN`.
    #[must_use]
    pub fn safe_angle(self, rhs: Self) -> f64 {
        self.dot(rhs).clamp(-1.0, 1.0).acos()
    }

    /// Component of `self` orthogonal to the unit vector `axis`.
    #[must_use]
    pub fn reject_from(self, axis: Self) -> Self {
        self.sub(axis.mul_scalar(self.dot(axis)))
    }

    #[must_use]
    pub const fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[must_use]
    pub const fn div_scalar(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s)
    }

    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Vec3::add(self, rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::sub(self, rhs)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.mul_scalar(-1.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point3
// ─────────────────────────────────────────────────────────────────────────────

/// Sample position of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    /// Displacement from `rhs` to `self`.
    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self::Output {
        self.add_vec(rhs)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_point(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// Linear map plus translation: `p -> L p + t`.
///
/// Curve memories are invariant under rigid motions (and flip the torsion sign
/// under reflections). This type moves sampled curves around to exercise that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rows of the linear part.
    rows: [Vec3; 3],
    translation: Vec3,
}

impl Transform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            rows: [Vec3::X, Vec3::Y, Vec3::Z],
            translation: Vec3::ZERO,
        }
    }

    #[must_use]
    pub const fn translation(offset: Vec3) -> Self {
        Self {
            rows: [Vec3::X, Vec3::Y, Vec3::Z],
            translation: offset,
        }
    }

    /// Reflection through the plane `x = 0`.
    #[must_use]
    pub const fn mirror_x() -> Self {
        Self {
            rows: [Vec3::new(-1.0, 0.0, 0.0), Vec3::Y, Vec3::Z],
            translation: Vec3::ZERO,
        }
    }

    /// Right-handed rotation by `angle` radians about `axis` (Rodrigues).
    /// `None` for a zero axis.
    #[must_use]
    pub fn rotation(axis: Vec3, angle: f64) -> Option<Self> {
        let Vec3 { x, y, z } = axis.normalized()?;
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Some(Self {
            rows: [
                Vec3::new(t * x * x + c, t * x * y - s * z, t * x * z + s * y),
                Vec3::new(t * x * y + s * z, t * y * y + c, t * y * z - s * x),
                Vec3::new(t * x * z - s * y, t * y * z + s * x, t * z * z + c),
            ],
            translation: Vec3::ZERO,
        })
    }

    #[must_use]
    pub fn apply_vec(self, v: Vec3) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    #[must_use]
    pub fn apply_point(self, p: Point3) -> Point3 {
        let v = self.apply_vec(Vec3::new(p.x, p.y, p.z)).add(self.translation);
        Point3::new(v.x, v.y, v.z)
    }

    /// Apply to every point of a polyline.
    #[must_use]
    pub fn apply_points(self, points: &[Point3]) -> Vec<Point3> {
        points.iter().map(|&p| self.apply_point(p)).collect()
    }

    /// The map that applies `inner` first, then `self`.
    #[must_use]
    pub fn after(self, inner: Self) -> Self {
        let columns = [
            inner.apply_vec(Vec3::X),
            inner.apply_vec(Vec3::Y),
            inner.apply_vec(Vec3::Z),
        ];
        let mapped = columns.map(|c| self.apply_vec(c));
        Self {
            rows: [
                Vec3::new(mapped[0].x, mapped[1].x, mapped[2].x),
                Vec3::new(mapped[0].y, mapped[1].y, mapped[2].y),
                Vec3::new(mapped[0].z, mapped[1].z, mapped[2].z),
            ],
            translation: self.apply_vec(inner.translation).add(self.translation),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `a * b` applies `b` first.
impl Mul for Transform {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.after(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance configuration for curve-memory computations.
///
/// Every epsilon used by the estimators and the integrator lives here:
/// - `Tolerance::ZERO_LENGTH` - clamping denominators and detecting zero-length curves (1e-12)
/// - `Tolerance::PARALLEL` - detecting locally parallel tangents in the binormal pass (1e-9)
/// - `Tolerance::LOOSE` - frame orthonormality checks after integration (1e-6)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// General-purpose comparison tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Minimum length used when dividing by a vector norm or a segment length,
    /// and the total length below which a curve is degenerate (1e-12).
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };

    /// Cross-product norm below which two unit tangents count as parallel (1e-9).
    pub const PARALLEL: Self = Self { eps: 1e-9 };

    /// Loose tolerance for coarse comparisons such as frame drift (1e-6).
    pub const LOOSE: Self = Self { eps: 1e-6 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        a.distance_to(b) <= self.eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
