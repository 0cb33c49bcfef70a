//! Inverse transform: integrate a moving frame along a stored profile.
//!
//! The reconstruction walks the record's arclength in fixed steps `ds`. At
//! each step it interpolates curvature and torsion, turns and twists the frame
//! accordingly ([`Frame::frenet_step`]) and advances the position along the new
//! tangent. Per-step renormalization keeps the frame orthonormal to within
//! round-off; the polyline itself is an approximation whose error shrinks with
//! `ds`.

use super::error::{CurveMemoryError, Result};
use super::record::MemoryRecord;
use crate::geom::{CurveMetrics, Frame, Point3, TimingBucket};

/// Lower bound on the profile resolution used to derive a default step.
pub const MIN_DEFAULT_STEPS: usize = 50;

/// Slack subtracted from `L / ds` before rounding up, so a step that divides
/// the length exactly does not gain an extra sample from round-off.
pub const STEP_COUNT_SLACK: f64 = 1e-9;

/// Upper bound on the number of reconstructed points.
pub const MAX_RECONSTRUCT_SAMPLES: usize = 1 << 24;

/// Options for [`reconstruct`].
///
/// `step` and `sample_count` are mutually exclusive. With neither set the
/// step is `L / max(50, record.len())`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructOptions {
    /// Arclength step between reconstructed samples.
    pub step: Option<f64>,
    /// Target number of steps; the step becomes `L / sample_count`.
    pub sample_count: Option<usize>,
    /// First reconstructed position.
    pub start: Point3,
    /// Initial frame; renormalized before use.
    pub frame: Frame,
}

impl ReconstructOptions {
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub const fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = Some(count);
        self
    }

    #[must_use]
    pub const fn with_start(mut self, start: Point3) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub const fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Resolves the arclength step for a record of total length `length` and
    /// `samples` profile entries.
    fn resolve_step(&self, length: f64, samples: usize) -> Result<f64> {
        match (self.step, self.sample_count) {
            (Some(_), Some(_)) => Err(CurveMemoryError::ConflictingArguments),
            (Some(step), None) => {
                if step.is_finite() && step > 0.0 {
                    Ok(step)
                } else {
                    Err(CurveMemoryError::InvalidStep(step))
                }
            }
            (None, Some(count)) if count == 0 || count > MAX_RECONSTRUCT_SAMPLES => {
                Err(CurveMemoryError::InvalidSampleCount(count))
            }
            (None, Some(count)) => Ok(length / count as f64),
            (None, None) => Ok(length / samples.max(MIN_DEFAULT_STEPS) as f64),
        }
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            step: None,
            sample_count: None,
            start: Point3::ORIGIN,
            frame: Frame::WORLD,
        }
    }
}

/// Rebuilds an approximate polyline from a memory record.
///
/// Returns `M = max(2, ceil(L / ds))` points starting at `options.start`. A
/// degenerate record yields two copies of the start position.
///
/// # Errors
///
/// - [`CurveMemoryError::ConflictingArguments`] if both step and sample count are set.
/// - [`CurveMemoryError::InvalidStep`] / [`CurveMemoryError::InvalidSampleCount`]
///   for a non-positive step or a zero count, or when the walk would need more
///   than [`MAX_RECONSTRUCT_SAMPLES`] points.
/// - [`CurveMemoryError::InvalidRecord`] if the record fails [`MemoryRecord::validate`].
pub fn reconstruct(record: &MemoryRecord, options: &ReconstructOptions) -> Result<Vec<Point3>> {
    let mut metrics = CurveMetrics::default();
    reconstruct_with_metrics(record, options, &mut metrics)
}

/// [`reconstruct`] with the integration time accumulated into `metrics`.
pub fn reconstruct_with_metrics(
    record: &MemoryRecord,
    options: &ReconstructOptions,
    metrics: &mut CurveMetrics,
) -> Result<Vec<Point3>> {
    let length = record.length;
    // Argument conflicts are reported even for degenerate records.
    let ds = options.resolve_step(length, record.len())?;
    record.validate()?;

    if record.is_degenerate() {
        log::debug!("reconstruct: degenerate record, returning start placeholder");
        return Ok(vec![options.start, options.start]);
    }

    let ratio = length / ds;
    if !ratio.is_finite() || ratio - STEP_COUNT_SLACK > MAX_RECONSTRUCT_SAMPLES as f64 {
        return Err(CurveMemoryError::InvalidStep(ds));
    }
    let steps = ((ratio - STEP_COUNT_SLACK).ceil() as usize).max(2);
    log::debug!("reconstruct: L = {length}, ds = {ds}, {steps} samples");

    Ok(metrics.time(TimingBucket::Reconstruct, || {
        integrate(record, options.start, options.frame.renormalized(), ds, steps)
    }))
}

fn integrate(record: &MemoryRecord, start: Point3, frame: Frame, ds: f64, steps: usize) -> Vec<Point3> {
    let length = record.length;
    let mut points = Vec::with_capacity(steps);
    let mut position = start;
    let mut frame = frame;
    let mut travelled = 0.0_f64;
    points.push(position);

    for _ in 1..steps {
        travelled = (travelled + ds).min(length);
        let (kappa, tau) = record.sample_at(travelled / length);
        frame = frame.frenet_step(kappa, tau, ds);
        position = position.add_vec(frame.tangent.mul_scalar(ds));
        points.push(position);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{MultiscalePack, Vec3};

    fn straight_record(length: f64, n: usize) -> MemoryRecord {
        let u: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        MemoryRecord {
            length,
            kappa: vec![0.0; n],
            tau: vec![0.0; n],
            u,
            pack: MultiscalePack::default(),
        }
    }

    #[test]
    fn step_and_count_conflict() {
        let options = ReconstructOptions::default().with_step(0.1).with_sample_count(10);
        assert_eq!(
            reconstruct(&straight_record(1.0, 5), &options),
            Err(CurveMemoryError::ConflictingArguments)
        );
    }

    #[test]
    fn invalid_step_and_count_are_rejected() {
        let record = straight_record(1.0, 5);
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let options = ReconstructOptions::default().with_step(step);
            assert!(matches!(
                reconstruct(&record, &options),
                Err(CurveMemoryError::InvalidStep(_))
            ));
        }
        let options = ReconstructOptions::default().with_sample_count(0);
        assert_eq!(
            reconstruct(&record, &options),
            Err(CurveMemoryError::InvalidSampleCount(0))
        );
    }

    #[test]
    fn tiny_step_is_rejected_before_allocating() {
        let record = straight_record(1.0, 10);
        for step in [1e-300, f64::MIN_POSITIVE, 1.0 / (MAX_RECONSTRUCT_SAMPLES as f64 * 2.0)] {
            let options = ReconstructOptions::default().with_step(step);
            assert_eq!(
                reconstruct(&record, &options),
                Err(CurveMemoryError::InvalidStep(step))
            );
        }
    }

    #[test]
    fn sample_count_above_limit_is_rejected() {
        let record = straight_record(1.0, 10);
        let options = ReconstructOptions::default().with_sample_count(MAX_RECONSTRUCT_SAMPLES + 1);
        assert_eq!(
            reconstruct(&record, &options),
            Err(CurveMemoryError::InvalidSampleCount(MAX_RECONSTRUCT_SAMPLES + 1))
        );
        let options = ReconstructOptions::default().with_sample_count(usize::MAX);
        assert!(matches!(
            reconstruct(&record, &options),
            Err(CurveMemoryError::InvalidSampleCount(_))
        ));
    }

    #[test]
    fn sample_count_below_limit_is_accepted() {
        let record = straight_record(1.0, 10);
        let options = ReconstructOptions::default().with_sample_count(1 << 10);
        assert_eq!(reconstruct(&record, &options).unwrap().len(), 1 << 10);
    }

    #[test]
    fn default_step_uses_at_least_fifty_samples() {
        let points = reconstruct(&straight_record(2.0, 5), &ReconstructOptions::default()).unwrap();
        assert_eq!(points.len(), MIN_DEFAULT_STEPS);
    }

    #[test]
    fn sample_count_sets_step() {
        let options = ReconstructOptions::default().with_sample_count(20);
        let points = reconstruct(&straight_record(4.0, 5), &options).unwrap();
        assert_eq!(points.len(), 20);
        let step = points[1].distance_to(points[0]);
        assert!((step - 0.2).abs() < 1e-12);
    }

    #[test]
    fn straight_profile_walks_along_initial_tangent() {
        let frame = Frame::new(Vec3::Z, Vec3::X, Vec3::Y);
        let start = Point3::new(1.0, 1.0, 1.0);
        let options = ReconstructOptions::default()
            .with_step(0.25)
            .with_start(start)
            .with_frame(frame);
        let points = reconstruct(&straight_record(1.0, 3), &options).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], start);
        let last = points[3];
        assert!((last.x - 1.0).abs() < 1e-12);
        assert!((last.y - 1.0).abs() < 1e-12);
        assert!((last.z - 1.75).abs() < 1e-12);
    }

    #[test]
    fn unnormalized_frame_is_normalized_on_entry() {
        let frame = Frame::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Z);
        let options = ReconstructOptions::default().with_step(0.5).with_frame(frame);
        let points = reconstruct(&straight_record(1.0, 3), &options).unwrap();
        assert!((points[1].distance_to(points[0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn invalid_record_is_rejected() {
        let mut record = straight_record(1.0, 4);
        record.tau.pop();
        assert!(matches!(
            reconstruct(&record, &ReconstructOptions::default()),
            Err(CurveMemoryError::InvalidRecord(_))
        ));
    }
}
