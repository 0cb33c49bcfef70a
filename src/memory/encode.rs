//! Forward transform: sampled points to a [`MemoryRecord`].

use super::error::{CurveMemoryError, Result};
use super::record::MemoryRecord;
use crate::geom::{
    CurveMetrics, DEFAULT_LEVELS, Point3, TimingBucket, Tolerance, arclength_profile,
    curvature_torsion, multiscale_pack,
};

/// Number of coordinate columns every input row must have.
pub const POINT_COLUMNS: usize = 3;

/// Options for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Number of multiscale levels; values below one are treated as one.
    pub levels: usize,
}

impl EncodeOptions {
    #[must_use]
    pub const fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
        }
    }
}

/// Converts coordinate rows into points, requiring exactly three columns each.
pub fn points_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Point3>> {
    rows.iter()
        .enumerate()
        .map(|(row, values)| match values.as_ref() {
            &[x, y, z] => Ok(Point3::new(x, y, z)),
            other => {
                log::warn!("rejecting point row {row} with {} columns", other.len());
                Err(CurveMemoryError::InvalidShape {
                    row,
                    columns: other.len(),
                })
            }
        })
        .collect()
}

/// Converts a row-major `(N, columns)` buffer into points.
///
/// `columns` must be three and `coords.len()` a multiple of it.
pub fn points_from_flat(coords: &[f64], columns: usize) -> Result<Vec<Point3>> {
    if columns != POINT_COLUMNS || coords.len() % POINT_COLUMNS != 0 {
        log::warn!(
            "rejecting flat buffer of {} values with {columns} columns",
            coords.len()
        );
        return Err(CurveMemoryError::InvalidFlatShape {
            len: coords.len(),
            columns,
        });
    }
    Ok(coords
        .chunks_exact(POINT_COLUMNS)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

/// Encodes a sampled curve into its curvature/torsion memory.
///
/// Total over all inputs: curves shorter than [`Tolerance::ZERO_LENGTH`]
/// (empty, a single point, or coincident points) produce a zero-length record
/// with all-zero `u`, `kappa` and `tau` of the input's length.
#[must_use]
pub fn encode(points: &[Point3], options: &EncodeOptions) -> MemoryRecord {
    let mut metrics = CurveMetrics::default();
    encode_with_metrics(points, options, &mut metrics)
}

/// [`encode`] with per-stage timings accumulated into `metrics`.
#[must_use]
pub fn encode_with_metrics(
    points: &[Point3],
    options: &EncodeOptions,
    metrics: &mut CurveMetrics,
) -> MemoryRecord {
    let n = points.len();
    let profile = metrics.time(TimingBucket::Arclength, || arclength_profile(points));

    if profile.total < Tolerance::ZERO_LENGTH.eps {
        log::debug!("encode: degenerate curve of {n} points (L = {})", profile.total);
        let zeros = vec![0.0; n];
        let pack = metrics.time(TimingBucket::Multiscale, || {
            multiscale_pack(&zeros, &zeros, &zeros, options.levels)
        });
        return MemoryRecord {
            length: 0.0,
            u: zeros.clone(),
            kappa: zeros.clone(),
            tau: zeros,
            pack,
        };
    }

    let u = profile.normalized();
    let ct = metrics.time(TimingBucket::Differential, || curvature_torsion(points));
    let pack = metrics.time(TimingBucket::Multiscale, || {
        multiscale_pack(&u, &ct.kappa, &ct.tau, options.levels)
    });

    log::debug!(
        "encode: {n} points, L = {}, {} levels",
        profile.total,
        pack.levels.len()
    );

    MemoryRecord {
        length: profile.total,
        u,
        kappa: ct.kappa,
        tau: ct.tau,
        pack,
    }
}

/// Validates coordinate rows and encodes them.
pub fn encode_rows<R: AsRef<[f64]>>(rows: &[R], options: &EncodeOptions) -> Result<MemoryRecord> {
    let points = points_from_rows(rows)?;
    Ok(encode(&points, options))
}

/// Validates a row-major coordinate buffer and encodes it.
pub fn encode_flat(coords: &[f64], columns: usize, options: &EncodeOptions) -> Result<MemoryRecord> {
    let points = points_from_flat(coords, columns)?;
    Ok(encode(&points, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_with_wrong_width_are_rejected() {
        let rows = vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0]];
        assert_eq!(
            points_from_rows(&rows),
            Err(CurveMemoryError::InvalidShape { row: 1, columns: 2 })
        );

        let rows = [[0.0, 1.0, 2.0, 3.0]];
        assert!(matches!(
            encode_rows(&rows, &EncodeOptions::default()),
            Err(CurveMemoryError::InvalidShape { row: 0, columns: 4 })
        ));
    }

    #[test]
    fn flat_buffer_shape_is_checked() {
        assert!(points_from_flat(&[0.0; 6], 3).is_ok());
        assert_eq!(points_from_flat(&[0.0; 6], 3).unwrap().len(), 2);
        assert!(matches!(
            points_from_flat(&[0.0; 6], 2),
            Err(CurveMemoryError::InvalidFlatShape { len: 6, columns: 2 })
        ));
        assert!(points_from_flat(&[0.0; 7], 3).is_err());
        assert!(points_from_flat(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn options_default_to_three_levels() {
        assert_eq!(EncodeOptions::default().levels, 3);
        assert_eq!(EncodeOptions::default().with_levels(5).levels, 5);
    }

    #[test]
    fn empty_input_encodes_to_empty_record() {
        let record = encode(&[], &EncodeOptions::default());
        assert_eq!(record.length, 0.0);
        assert!(record.is_empty());
        assert_eq!(record.pack.levels.len(), 3);
    }
}
