//! Orthonormal moving frames.
//!
//! A [`Frame`] is the (tangent, normal, binormal) triple carried along a curve.
//! Two constructions use it: the Frenet integrator in `memory::reconstruct`,
//! which advances a frame by curvature and torsion increments, and the
//! rotation-minimizing sweep in [`super::rmf`], which seeds its first frame
//! with [`Frame::from_tangent`].

use serde::{Deserialize, Serialize};

use super::{Tolerance, Vec3};

/// `|dot(reference, tangent)|` above which the default reference axis counts as
/// too close to the tangent (about 25 degrees) and the fallback axis is used.
pub const REFERENCE_AXIS_DOT_LIMIT: f64 = 0.9;

/// Orthonormal frame attached to a point of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unit vector pointing along the curve direction.
    pub tangent: Vec3,
    /// Unit vector perpendicular to the tangent, in the osculating plane.
    pub normal: Vec3,
    /// Unit vector perpendicular to both (tangent × normal).
    pub binormal: Vec3,
}

impl Frame {
    /// World axes: tangent = X, normal = Y, binormal = Z.
    pub const WORLD: Self = Self {
        tangent: Vec3::X,
        normal: Vec3::Y,
        binormal: Vec3::Z,
    };

    /// Create a frame from three vectors without validation.
    #[must_use]
    pub const fn new(tangent: Vec3, normal: Vec3, binormal: Vec3) -> Self {
        Self { tangent, normal, binormal }
    }

    /// Build a frame around `tangent` using a reference axis that is not nearly
    /// parallel to it.
    ///
    /// The reference is world X unless the tangent lies within the
    /// [`REFERENCE_AXIS_DOT_LIMIT`] cone around X, in which case world Y is used.
    /// The binormal is `normalize(T × a)` and the normal `normalize(B × T)`.
    ///
    /// A zero tangent yields a frame whose tangent is zero; callers that need
    /// a guaranteed orthonormal result must pass a non-degenerate tangent.
    #[must_use]
    pub fn from_tangent(tangent: Vec3) -> Self {
        let reference = if Vec3::X.dot(tangent).abs() > REFERENCE_AXIS_DOT_LIMIT {
            Vec3::Y
        } else {
            Vec3::X
        };
        let binormal = tangent.cross(reference).normalize_clamped();
        let normal = binormal.cross(tangent).normalize_clamped();
        Self { tangent, normal, binormal }
    }

    /// Rescale all three vectors to unit length.
    #[must_use]
    pub fn renormalized(self) -> Self {
        Self {
            tangent: self.tangent.normalize_clamped(),
            normal: self.normal.normalize_clamped(),
            binormal: self.binormal.normalize_clamped(),
        }
    }

    /// Advance the frame by one arclength step of the Frenet-Serret equations.
    ///
    /// First the tangent/normal pair turns in its own plane by `kappa * ds`
    /// (curvature), then the normal twists about the new tangent by `tau * ds`
    /// (torsion). The binormal is rebuilt as `T × N` and all three vectors are
    /// renormalized to absorb floating-point drift.
    #[must_use]
    pub fn frenet_step(self, kappa: f64, tau: f64, ds: f64) -> Self {
        let (sin_k, cos_k) = (kappa * ds).sin_cos();
        let tangent = self.tangent.mul_scalar(cos_k).add(self.normal.mul_scalar(sin_k));
        let turned_normal = self.tangent.mul_scalar(-sin_k).add(self.normal.mul_scalar(cos_k));

        let (sin_t, cos_t) = (tau * ds).sin_cos();
        let normal = turned_normal
            .mul_scalar(cos_t)
            .add(tangent.cross(turned_normal).mul_scalar(sin_t));
        let binormal = tangent.cross(normal);

        Self { tangent, normal, binormal }.renormalized()
    }

    /// Largest deviation from orthonormality: `max(| |v| - 1 |, |dot(a, b)|)`
    /// over the three vectors and their three pairs.
    #[must_use]
    pub fn orthonormality_error(&self) -> f64 {
        let unit = [self.tangent, self.normal, self.binormal]
            .iter()
            .map(|v| (v.length() - 1.0).abs())
            .fold(0.0_f64, f64::max);
        let ortho = [
            self.tangent.dot(self.normal),
            self.tangent.dot(self.binormal),
            self.normal.dot(self.binormal),
        ]
        .iter()
        .map(|d| d.abs())
        .fold(0.0_f64, f64::max);
        unit.max(ortho)
    }

    #[must_use]
    pub fn is_orthonormal(&self, tol: Tolerance) -> bool {
        self.orthonormality_error() <= tol.eps
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::WORLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_frame_is_orthonormal() {
        assert!(Frame::WORLD.is_orthonormal(Tolerance::ZERO_LENGTH));
        assert_eq!(Frame::default(), Frame::WORLD);
    }

    #[test]
    fn from_tangent_switches_reference_near_x() {
        // Tangent along X must not use X as its reference.
        let frame = Frame::from_tangent(Vec3::X);
        assert!(frame.is_orthonormal(Tolerance::DEFAULT));
        assert!((frame.binormal.dot(Vec3::Z).abs() - 1.0).abs() < 1e-12);

        let frame = Frame::from_tangent(Vec3::new(0.0, 0.6, 0.8));
        assert!(frame.is_orthonormal(Tolerance::DEFAULT));
    }

    #[test]
    fn zero_step_is_identity() {
        let f = Frame::WORLD.frenet_step(3.0, -2.0, 0.0);
        assert!((f.tangent - Vec3::X).length() < 1e-15);
        assert!((f.normal - Vec3::Y).length() < 1e-15);
        assert!((f.binormal - Vec3::Z).length() < 1e-15);
    }

    #[test]
    fn curvature_turn_rotates_tangent_toward_normal() {
        let f = Frame::WORLD.frenet_step(1.0, 0.0, std::f64::consts::FRAC_PI_2);
        assert!((f.tangent - Vec3::Y).length() < 1e-12);
        assert!((f.normal + Vec3::X).length() < 1e-12);
        assert!((f.binormal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn torsion_twist_rotates_normal_toward_binormal() {
        let f = Frame::WORLD.frenet_step(0.0, 1.0, std::f64::consts::FRAC_PI_2);
        assert!((f.tangent - Vec3::X).length() < 1e-12);
        assert!((f.normal - Vec3::Z).length() < 1e-12);
        assert!((f.binormal + Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn many_steps_stay_orthonormal() {
        let mut f = Frame::WORLD;
        for i in 0..10_000 {
            let k = 0.5 + 0.4 * (i as f64 * 0.01).sin();
            f = f.frenet_step(k, 0.3, 0.01);
        }
        assert!(f.is_orthonormal(Tolerance::LOOSE), "drift {}", f.orthonormality_error());
    }
}
