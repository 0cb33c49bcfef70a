//! Arclength sampling of polylines.

use super::Point3;

/// Per-segment lengths and cumulative arclength of a sampled curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArclengthProfile {
    /// Euclidean length of each segment (`N - 1` values, empty for `N < 2`).
    pub segment_lengths: Vec<f64>,
    /// Cumulative arclength `s` at each vertex (`N` values, `s[0] = 0`).
    pub cumulative: Vec<f64>,
    /// Total length `L = s[N - 1]`, zero for fewer than two points.
    pub total: f64,
}

impl ArclengthProfile {
    /// Arclength normalized to `[0, 1]` by the total length.
    ///
    /// Callers must check the total against their degenerate-length tolerance
    /// first; this divides unconditionally.
    #[must_use]
    pub fn normalized(&self) -> Vec<f64> {
        self.cumulative.iter().map(|s| s / self.total).collect()
    }
}

/// Computes segment lengths, cumulative arclength and total length.
///
/// For `N < 2` the profile is degenerate: no segments, `N` zero entries in
/// `cumulative` and a total of zero.
#[must_use]
pub fn arclength_profile(points: &[Point3]) -> ArclengthProfile {
    if points.len() < 2 {
        return ArclengthProfile {
            segment_lengths: Vec::new(),
            cumulative: vec![0.0; points.len()],
            total: 0.0,
        };
    }

    let segment_lengths: Vec<f64> = points
        .windows(2)
        .map(|w| w[1].sub_point(w[0]).length())
        .collect();

    let mut cumulative = Vec::with_capacity(points.len());
    let mut running = 0.0;
    cumulative.push(running);
    for len in &segment_lengths {
        running += len;
        cumulative.push(running);
    }

    ArclengthProfile {
        segment_lengths,
        cumulative,
        total: running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_point_are_degenerate() {
        let empty = arclength_profile(&[]);
        assert!(empty.cumulative.is_empty());
        assert_eq!(empty.total, 0.0);

        let single = arclength_profile(&[Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(single.cumulative, vec![0.0]);
        assert!(single.segment_lengths.is_empty());
        assert_eq!(single.total, 0.0);
    }

    #[test]
    fn cumulative_matches_segments() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(3.0, 4.0, 2.0),
        ];
        let profile = arclength_profile(&pts);
        assert_eq!(profile.segment_lengths, vec![5.0, 2.0]);
        assert_eq!(profile.cumulative, vec![0.0, 5.0, 7.0]);
        assert_eq!(profile.total, 7.0);

        let u = profile.normalized();
        assert_eq!(u[0], 0.0);
        assert!((u[1] - 5.0 / 7.0).abs() < 1e-15);
        assert_eq!(u[2], 1.0);
    }

    #[test]
    fn repeated_points_keep_cumulative_monotonic() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let pts = [p, p, Point3::new(2.0, 1.0, 1.0), Point3::new(2.0, 1.0, 1.0)];
        let profile = arclength_profile(&pts);
        assert!(profile.cumulative.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(profile.total, 1.0);
    }
}
