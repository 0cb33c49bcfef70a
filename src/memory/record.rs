use serde::{Deserialize, Serialize};

use super::error::{CurveMemoryError, Result};
use crate::geom::{MultiscalePack, Tolerance};

/// Rigid-motion-invariant memory of a sampled space curve.
///
/// `u`, `kappa` and `tau` are index-aligned with the encoded points. A
/// degenerate curve (total length below [`Tolerance::ZERO_LENGTH`]) has
/// `length == 0` and all-zero arrays.
///
/// The serde layout uses the field names `L`, `u`, `kappa`, `tau` and `pack`,
/// so persisted records stay readable by other tooling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Total arclength of the encoded polyline.
    #[serde(rename = "L")]
    pub length: f64,
    /// Normalized arclength in `[0, 1]`, nondecreasing.
    pub u: Vec<f64>,
    /// Curvature per sample.
    pub kappa: Vec<f64>,
    /// Torsion per sample.
    pub tau: Vec<f64>,
    /// Multiscale summary of `(u, kappa, tau)`.
    pub pack: MultiscalePack,
}

impl MemoryRecord {
    /// Number of profile samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.u.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// Whether the record describes a curve of (numerically) zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length < Tolerance::ZERO_LENGTH.eps
    }

    /// Checks the invariants reconstruction relies on.
    ///
    /// Records produced by `encode` always pass; this is meant for records
    /// that went through external storage.
    pub fn validate(&self) -> Result<()> {
        if self.kappa.len() != self.u.len() || self.tau.len() != self.u.len() {
            return Err(CurveMemoryError::InvalidRecord(format!(
                "profile lengths differ: u={}, kappa={}, tau={}",
                self.u.len(),
                self.kappa.len(),
                self.tau.len()
            )));
        }
        if !self.length.is_finite() || self.length < 0.0 {
            return Err(CurveMemoryError::InvalidRecord(format!(
                "length must be finite and non-negative, got {}",
                self.length
            )));
        }
        if self.is_degenerate() {
            return Ok(());
        }
        if self.u.is_empty() {
            return Err(CurveMemoryError::InvalidRecord(
                "non-zero length with an empty profile".to_string(),
            ));
        }
        if let Some(i) = self
            .u
            .windows(2)
            .position(|w| w[0].is_nan() || w[1].is_nan() || w[1] < w[0])
        {
            return Err(CurveMemoryError::InvalidRecord(format!(
                "u is not nondecreasing at index {}",
                i + 1
            )));
        }
        Ok(())
    }

    /// Linearly interpolated `(kappa, tau)` at normalized arclength `u`.
    ///
    /// Queries outside the sampled range take the end values; an empty record
    /// yields zeros.
    #[must_use]
    pub fn sample_at(&self, u: f64) -> (f64, f64) {
        (
            interpolate(&self.u, &self.kappa, u),
            interpolate(&self.u, &self.tau, u),
        )
    }
}

/// Piecewise-linear interpolation of `values` over nondecreasing `xs`,
/// clamped to the end values outside `[xs[0], xs[n-1]]`.
pub(crate) fn interpolate(xs: &[f64], values: &[f64], x: f64) -> f64 {
    let n = xs.len().min(values.len());
    if n == 0 {
        return 0.0;
    }
    let j = xs[..n].partition_point(|&v| v <= x);
    if j == 0 {
        return values[0];
    }
    if j == n {
        return values[n - 1];
    }
    let (x0, x1) = (xs[j - 1], xs[j]);
    let t = (x - x0) / (x1 - x0);
    values[j - 1] + (values[j] - values[j - 1]) * t
}
