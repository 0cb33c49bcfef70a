//! Multiscale summaries of curvature/torsion profiles.
//!
//! A [`MultiscalePack`] is a pyramid of progressively halved `(u, kappa, tau)`
//! samplings, each with summary statistics, plus [`GlobalNorms`] integrated over
//! the full-resolution profile. The global norms depend only on the profile, so
//! they work as resolution-independent fingerprints for coarse shape
//! comparison.

use serde::{Deserialize, Serialize};

/// Number of levels used when the caller does not choose one.
pub const DEFAULT_LEVELS: usize = 3;

/// Smallest number of samples a subsampled level keeps.
pub const MIN_LEVEL_SAMPLES: usize = 2;

/// Mean, population standard deviation, max and min of kappa and tau.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelStats {
    pub kappa_mean: f64,
    pub kappa_std: f64,
    pub kappa_max: f64,
    pub kappa_min: f64,
    pub tau_mean: f64,
    pub tau_std: f64,
    pub tau_max: f64,
    pub tau_min: f64,
}

/// One resolution of the pyramid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiscaleLevel {
    pub u: Vec<f64>,
    pub kappa: Vec<f64>,
    pub tau: Vec<f64>,
    pub stats: LevelStats,
}

impl MultiscaleLevel {
    #[must_use]
    pub fn len(&self) -> usize {
        self.u.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }
}

/// L1 and L2 norms of kappa and tau over `u ∈ [0, 1]` (trapezoidal rule).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalNorms {
    #[serde(rename = "kappa_L1")]
    pub kappa_l1: f64,
    #[serde(rename = "tau_L1")]
    pub tau_l1: f64,
    #[serde(rename = "kappa_L2")]
    pub kappa_l2: f64,
    #[serde(rename = "tau_L2")]
    pub tau_l2: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiscalePack {
    /// Level 0 is full resolution; each later level has about half the samples.
    pub levels: Vec<MultiscaleLevel>,
    pub global: GlobalNorms,
}

impl MultiscalePack {
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&MultiscaleLevel> {
        self.levels.get(index)
    }

    /// The lowest-resolution level.
    #[must_use]
    pub fn coarsest(&self) -> Option<&MultiscaleLevel> {
        self.levels.last()
    }
}

/// Builds the multiscale pyramid and global norms.
///
/// `levels` is clamped to at least one. The three slices must have equal
/// length; the shortest length wins otherwise.
#[must_use]
pub fn multiscale_pack(u: &[f64], kappa: &[f64], tau: &[f64], levels: usize) -> MultiscalePack {
    let n = u.len().min(kappa.len()).min(tau.len());
    let (u, kappa, tau) = (&u[..n], &kappa[..n], &tau[..n]);
    let levels = levels.max(1);

    let mut pack_levels = Vec::with_capacity(levels);
    let mut current = MultiscaleLevel {
        u: u.to_vec(),
        kappa: kappa.to_vec(),
        tau: tau.to_vec(),
        stats: level_stats(kappa, tau),
    };

    for _ in 1..levels {
        let next = subsample(&current);
        pack_levels.push(current);
        current = next;
    }
    pack_levels.push(current);

    let global = GlobalNorms {
        kappa_l1: trapezoid(u, kappa.iter().map(|k| k.abs())),
        tau_l1: trapezoid(u, tau.iter().map(|t| t.abs())),
        kappa_l2: trapezoid(u, kappa.iter().map(|k| k * k)).sqrt(),
        tau_l2: trapezoid(u, tau.iter().map(|t| t * t)).sqrt(),
    };

    log::debug!(
        "multiscale pack: {} levels, sizes {:?}",
        pack_levels.len(),
        pack_levels.iter().map(MultiscaleLevel::len).collect::<Vec<_>>()
    );

    MultiscalePack {
        levels: pack_levels,
        global,
    }
}

/// Evenly spaced indices selecting `max(2, (n + 1) / 2)` of `n` samples.
///
/// Indices run from `0` to `n - 1` inclusive and are truncated toward zero,
/// so small inputs may repeat an index.
#[must_use]
pub fn halving_indices(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let count = ((n + 1) / 2).max(MIN_LEVEL_SAMPLES);
    let last = n - 1;
    let step = last as f64 / (count - 1) as f64;
    (0..count)
        .map(|k| {
            if k + 1 == count {
                last
            } else {
                ((k as f64 * step) as usize).min(last)
            }
        })
        .collect()
}

fn subsample(level: &MultiscaleLevel) -> MultiscaleLevel {
    let idx = halving_indices(level.len());
    let pick = |values: &[f64]| idx.iter().map(|&i| values[i]).collect::<Vec<_>>();
    let kappa = pick(&level.kappa);
    let tau = pick(&level.tau);
    MultiscaleLevel {
        u: pick(&level.u),
        stats: level_stats(&kappa, &tau),
        kappa,
        tau,
    }
}

fn level_stats(kappa: &[f64], tau: &[f64]) -> LevelStats {
    let (kappa_mean, kappa_std, kappa_max, kappa_min) = describe(kappa);
    let (tau_mean, tau_std, tau_max, tau_min) = describe(tau);
    LevelStats {
        kappa_mean,
        kappa_std,
        kappa_max,
        kappa_min,
        tau_mean,
        tau_std,
        tau_max,
        tau_min,
    }
}

/// `(mean, population std, max, min)`; all zero for an empty slice.
fn describe(values: &[f64]) -> (f64, f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    (mean, variance.sqrt(), max, min)
}

/// Trapezoidal integral of `y` against the abscissae `x`.
fn trapezoid(x: &[f64], y: impl Iterator<Item = f64>) -> f64 {
    let y: Vec<f64> = y.collect();
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}
