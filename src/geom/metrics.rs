//! Opt-in timing hooks for encode/reconstruct stages.
//!
//! Timing is only collected when the `curve_metrics` feature is enabled and the
//! target is not WASM (`std::time::Instant` is unavailable there). Otherwise
//! every call compiles down to invoking the timed closure.
//!
//! # Usage
//!
//! ```ignore
//! use curve_memory::geom::{CurveMetrics, TimingBucket};
//!
//! let mut metrics = CurveMetrics::default();
//! metrics.begin();
//! let record = curve_memory::memory::encode_with_metrics(&points, &options, &mut metrics);
//! if let Some(report) = metrics.end() {
//!     println!("differential: {} ns", report.differential_ns);
//! }
//! ```

/// Stages that can be timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Segment lengths and cumulative arclength.
    Arclength,
    /// Tangent, curvature and torsion estimation.
    Differential,
    /// Multiscale pyramid and global norms.
    Multiscale,
    /// Frenet integration of a stored profile.
    Reconstruct,
    /// Rotation-minimizing frame sweep.
    RmfSweep,
}

/// Cumulative nanoseconds per stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CurveTimingReport {
    pub arclength_ns: u64,
    pub differential_ns: u64,
    pub multiscale_ns: u64,
    pub reconstruct_ns: u64,
    pub rmf_sweep_ns: u64,
}

impl CurveTimingReport {
    /// Returns the total time across all buckets in nanoseconds.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.arclength_ns
            .saturating_add(self.differential_ns)
            .saturating_add(self.multiscale_ns)
            .saturating_add(self.reconstruct_ns)
            .saturating_add(self.rmf_sweep_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for stage timings.
///
/// Call [`begin`](Self::begin) to reset, wrap stages with
/// [`time`](Self::time), and read the report with [`end`](Self::end).
#[derive(Debug, Default)]
pub struct CurveMetrics {
    #[cfg(all(feature = "curve_metrics", not(target_arch = "wasm32")))]
    report: CurveTimingReport,
}

impl CurveMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "curve_metrics", not(target_arch = "wasm32")))]
        {
            self.report = CurveTimingReport::default();
        }
    }

    /// Returns the accumulated report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<CurveTimingReport> {
        #[cfg(all(feature = "curve_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "curve_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times `f` and adds the elapsed time to `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "curve_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "curve_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "curve_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::Arclength => &mut self.report.arclength_ns,
            TimingBucket::Differential => &mut self.report.differential_ns,
            TimingBucket::Multiscale => &mut self.report.multiscale_ns,
            TimingBucket::Reconstruct => &mut self.report.reconstruct_ns,
            TimingBucket::RmfSweep => &mut self.report.rmf_sweep_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}
