//! Discrete differential geometry of sampled space curves.
//!
//! These are finite-difference analogues of the Frenet-Serret quantities:
//!
//! - **Tangent**: unit direction at each vertex. Boundary vertices use their
//!   single adjacent segment; interior vertices average the two adjacent unit
//!   segment directions.
//! - **Curvature**: change of the vertex tangent per unit arclength.
//! - **Torsion**: signed rotation of the discrete binormal per unit arclength.
//!
//! Sampled curves have uneven spacing and straight runs, so every division is
//! clamped with [`Tolerance::ZERO_LENGTH`] and parallel tangents fall back to
//! the previous binormal instead of producing an undefined direction.
//!
//! With the `parallel` feature, tangents and curvature are computed per vertex
//! with rayon. The binormal pass is inherently sequential and always runs on
//! the calling thread. Each vertex value is computed by the same expression
//! on either path, so the results are identical.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::arclength::arclength_profile;
use super::{Point3, Tolerance, Vec3};

/// Binormal used when the first tangent pair is parallel and there is no
/// previous binormal to reuse.
pub const DEFAULT_BINORMAL: Vec3 = Vec3::Z;

/// How values at vertices without a full finite-difference stencil are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Copy the value of the nearest vertex that has a full stencil.
    ///
    /// This is a smoothing choice, not a derived estimate.
    #[default]
    NearestInterior,
    /// Assign each leading slot from its right neighbour, walking up from
    /// index 0, then each trailing slot from its left neighbour.
    ///
    /// With a two-slot head this leaves `values[0]` at the value `values[1]`
    /// held before filling, which is zero for a freshly computed profile.
    ForwardCopy,
}

impl BoundaryPolicy {
    /// Fill `values[..first]` and `values[last + 1..]` from the stencil range
    /// `first..=last`. Does nothing when the range is empty or out of bounds.
    pub fn apply(self, values: &mut [f64], first: usize, last: usize) {
        if first > last || last >= values.len() {
            return;
        }
        match self {
            Self::NearestInterior => {
                let head = values[first];
                let tail = values[last];
                values[..first].fill(head);
                values[last + 1..].fill(tail);
            }
            Self::ForwardCopy => {
                for i in 0..first {
                    values[i] = values[i + 1];
                }
                for i in last + 1..values.len() {
                    values[i] = values[i - 1];
                }
            }
        }
    }
}

/// Fill for `kappa[0]` and `kappa[n-1]`.
pub const CURVATURE_BOUNDARY_POLICY: BoundaryPolicy = BoundaryPolicy::NearestInterior;

/// Fill for `tau[0]`, `tau[1]` and `tau[n-1]`: `tau[0] = tau[1]` runs before
/// `tau[1] = tau[2]`, so the first entry stays zero.
pub const TORSION_BOUNDARY_POLICY: BoundaryPolicy = BoundaryPolicy::ForwardCopy;

/// Curvature and torsion, index-aligned with the input points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurvatureTorsionProfile {
    /// Curvature magnitude per vertex (non-negative).
    pub kappa: Vec<f64>,
    /// Signed torsion per vertex.
    pub tau: Vec<f64>,
}

/// Unit tangent at every vertex. All-zero for fewer than two points.
#[must_use]
pub fn discrete_tangents(points: &[Point3]) -> Vec<Vec3> {
    if points.len() < 2 {
        return vec![Vec3::ZERO; points.len()];
    }
    let segments = segment_directions(points);
    vertex_tangents(&segments, points.len())
}

/// Discrete curvature at every vertex. All-zero for fewer than three points.
#[must_use]
pub fn discrete_curvature(points: &[Point3]) -> Vec<f64> {
    if points.len() < 3 {
        return vec![0.0; points.len()];
    }
    let tangents = discrete_tangents(points);
    let lengths = arclength_profile(points).segment_lengths;
    curvature_from_tangents(&tangents, &lengths)
}

/// Discrete torsion at every vertex. All-zero for fewer than four points.
#[must_use]
pub fn discrete_torsion(points: &[Point3]) -> Vec<f64> {
    if points.len() < 4 {
        return vec![0.0; points.len()];
    }
    let tangents = discrete_tangents(points);
    let lengths = arclength_profile(points).segment_lengths;
    torsion_from_tangents(&tangents, &lengths)
}

/// Curvature and torsion sharing a single tangent and arclength pass.
#[must_use]
pub fn curvature_torsion(points: &[Point3]) -> CurvatureTorsionProfile {
    let n = points.len();
    let tangents = discrete_tangents(points);
    let lengths = arclength_profile(points).segment_lengths;

    let kappa = if n < 3 {
        vec![0.0; n]
    } else {
        curvature_from_tangents(&tangents, &lengths)
    };
    let tau = if n < 4 {
        vec![0.0; n]
    } else {
        torsion_from_tangents(&tangents, &lengths)
    };

    log::debug!("curvature/torsion computed for {n} vertices");
    CurvatureTorsionProfile { kappa, tau }
}

fn segment_directions(points: &[Point3]) -> Vec<Vec3> {
    points
        .windows(2)
        .map(|w| w[1].sub_point(w[0]).normalize_clamped())
        .collect()
}

fn vertex_tangent(segments: &[Vec3], i: usize) -> Vec3 {
    let last = segments.len();
    if i == 0 {
        segments[0]
    } else if i == last {
        segments[last - 1]
    } else {
        segments[i - 1].add(segments[i]).normalize_clamped()
    }
}

#[cfg(feature = "parallel")]
fn vertex_tangents(segments: &[Vec3], n: usize) -> Vec<Vec3> {
    (0..n)
        .into_par_iter()
        .map(|i| vertex_tangent(segments, i))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn vertex_tangents(segments: &[Vec3], n: usize) -> Vec<Vec3> {
    (0..n).map(|i| vertex_tangent(segments, i)).collect()
}

/// Average length of the two segments meeting at interior vertex `i`,
/// clamped away from zero.
fn local_step(lengths: &[f64], i: usize) -> f64 {
    (0.5 * (lengths[i - 1] + lengths[i])).max(Tolerance::ZERO_LENGTH.eps)
}

fn interior_curvature(tangents: &[Vec3], lengths: &[f64], i: usize) -> f64 {
    tangents[i].sub(tangents[i - 1]).length() / local_step(lengths, i)
}

#[cfg(feature = "parallel")]
fn interior_curvatures(tangents: &[Vec3], lengths: &[f64]) -> Vec<f64> {
    (1..tangents.len() - 1)
        .into_par_iter()
        .map(|i| interior_curvature(tangents, lengths, i))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn interior_curvatures(tangents: &[Vec3], lengths: &[f64]) -> Vec<f64> {
    (1..tangents.len() - 1)
        .map(|i| interior_curvature(tangents, lengths, i))
        .collect()
}

/// Requires `tangents.len() >= 3` and `lengths.len() == tangents.len() - 1`.
fn curvature_from_tangents(tangents: &[Vec3], lengths: &[f64]) -> Vec<f64> {
    let n = tangents.len();
    let mut kappa = vec![0.0; n];
    kappa[1..n - 1].copy_from_slice(&interior_curvatures(tangents, lengths));
    CURVATURE_BOUNDARY_POLICY.apply(&mut kappa, 1, n - 2);
    kappa
}

/// Discrete binormals from consecutive tangent pairs.
///
/// `B[i]` (for `i >= 1`) is the unit direction of `T[i] × T[i-1]`. Parallel
/// pairs reuse the previous binormal, or [`DEFAULT_BINORMAL`] at the start.
/// `B[0]` copies `B[1]`.
fn binormals(tangents: &[Vec3]) -> Vec<Vec3> {
    let n = tangents.len();
    let mut out = vec![DEFAULT_BINORMAL; n];
    for i in 1..n {
        let cross = tangents[i].cross(tangents[i - 1]);
        let norm = cross.length();
        out[i] = if norm < Tolerance::PARALLEL.eps {
            if i > 1 { out[i - 1] } else { DEFAULT_BINORMAL }
        } else {
            cross.div_scalar(norm)
        };
    }
    if n > 1 {
        out[0] = out[1];
    }
    out
}

/// Requires `tangents.len() >= 4` and `lengths.len() == tangents.len() - 1`.
fn torsion_from_tangents(tangents: &[Vec3], lengths: &[f64]) -> Vec<f64> {
    let n = tangents.len();
    let b = binormals(tangents);
    let mut tau = vec![0.0; n];

    for i in 2..n - 1 {
        let angle = b[i - 1].safe_angle(b[i]);
        let sign = b[i - 1].cross(b[i]).dot(tangents[i]);
        // A zero sign (binormals coincide or the twist axis is normal to T)
        // contributes no torsion.
        let signum = if sign > 0.0 {
            1.0
        } else if sign < 0.0 {
            -1.0
        } else {
            0.0
        };
        tau[i] = signum * angle / local_step(lengths, i);
    }

    TORSION_BOUNDARY_POLICY.apply(&mut tau, 2, n - 2);
    tau
}
