//! Rotation-minimizing frames along sampled curves.
//!
//! The Frenet frame is undefined where curvature vanishes and flips across
//! inflections. The sweep here instead parallel-transports the normal from
//! vertex to vertex: each new normal is the previous one projected onto the
//! plane orthogonal to the new tangent. The result has no twist about the
//! tangent and no discontinuities on straight runs.
//!
//! This is a service for consumers such as frame visualization or profile
//! sweeping; it is not part of the encode/reconstruct path.

use serde::{Deserialize, Serialize};

use super::differential::discrete_tangents;
use super::frame::Frame;
use super::metrics::{CurveMetrics, TimingBucket};
use super::{Point3, Tolerance, Vec3};

/// Tangent, normal and binormal per vertex, each aligned with the input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RmfFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

impl RmfFrames {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }

    /// Frame at vertex `i`, if present.
    #[must_use]
    pub fn frame(&self, i: usize) -> Option<Frame> {
        Some(Frame::new(
            *self.tangents.get(i)?,
            *self.normals.get(i)?,
            *self.binormals.get(i)?,
        ))
    }

    /// Iterate frames in vertex order.
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.tangents
            .iter()
            .zip(&self.normals)
            .zip(&self.binormals)
            .map(|((&t, &n), &b)| Frame::new(t, n, b))
    }
}

/// Computes a rotation-minimizing frame at every vertex.
///
/// The first frame is seeded by [`Frame::from_tangent`]. Degenerate tangents
/// (coincident points, or a single point) are replaced by the previous
/// tangent, or world X at the start, so every returned frame is orthonormal.
/// When the transported normal collapses (the curve reverses direction), a
/// fresh perpendicular is seeded from the new tangent.
#[must_use]
pub fn rmf_sweep(points: &[Point3]) -> RmfFrames {
    let mut metrics = CurveMetrics::default();
    rmf_sweep_with_metrics(points, &mut metrics)
}

/// [`rmf_sweep`] with the sweep time accumulated into `metrics`.
#[must_use]
pub fn rmf_sweep_with_metrics(points: &[Point3], metrics: &mut CurveMetrics) -> RmfFrames {
    metrics.time(TimingBucket::RmfSweep, || sweep(points))
}

fn sweep(points: &[Point3]) -> RmfFrames {
    let n = points.len();
    if n == 0 {
        return RmfFrames::default();
    }

    let raw = discrete_tangents(points);
    let mut tangents = Vec::with_capacity(n);
    let mut normals = Vec::with_capacity(n);
    let mut binormals = Vec::with_capacity(n);

    let mut previous_tangent = Vec3::X;
    let mut degenerate = 0usize;
    for t in raw {
        let tangent = match t.normalized() {
            Some(unit) if t.length() > Tolerance::PARALLEL.eps => unit,
            _ => {
                degenerate += 1;
                previous_tangent
            }
        };
        tangents.push(tangent);
        previous_tangent = tangent;
    }
    if degenerate > 0 {
        log::debug!("rmf sweep: {degenerate} degenerate tangents replaced");
    }

    let first = Frame::from_tangent(tangents[0]);
    normals.push(first.normal);
    binormals.push(first.binormal);

    for i in 1..n {
        let tangent = tangents[i];
        let projected = normals[i - 1].reject_from(tangent);
        let normal = if projected.length() > Tolerance::PARALLEL.eps {
            projected.normalize_clamped()
        } else {
            Frame::from_tangent(tangent).normal
        };
        let binormal = tangent.cross(normal).normalize_clamped();
        normals.push(normal);
        binormals.push(binormal);
    }

    RmfFrames {
        tangents,
        normals,
        binormals,
    }
}
