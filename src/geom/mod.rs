mod arclength;
mod core;
mod differential;
mod frame;
mod metrics;
mod multiscale;
mod rmf;

pub use arclength::{ArclengthProfile, arclength_profile};
pub use core::{Point3, Tolerance, Transform, Vec3};
pub use differential::{
    BoundaryPolicy, CURVATURE_BOUNDARY_POLICY, CurvatureTorsionProfile, DEFAULT_BINORMAL,
    TORSION_BOUNDARY_POLICY, curvature_torsion, discrete_curvature, discrete_tangents,
    discrete_torsion,
};
pub use frame::{Frame, REFERENCE_AXIS_DOT_LIMIT};
pub use metrics::{CurveMetrics, CurveTimingReport, TimingBucket};
pub use multiscale::{
    DEFAULT_LEVELS, GlobalNorms, LevelStats, MIN_LEVEL_SAMPLES, MultiscaleLevel, MultiscalePack,
    halving_indices, multiscale_pack,
};
pub use rmf::{RmfFrames, rmf_sweep, rmf_sweep_with_metrics};
