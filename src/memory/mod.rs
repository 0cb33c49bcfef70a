//! Curve memory: encode a sampled curve as arclength-parameterized curvature
//! and torsion, and rebuild an approximate curve from that record.

mod encode;
mod error;
mod record;
mod reconstruct;

pub use encode::{
    EncodeOptions, POINT_COLUMNS, encode, encode_flat, encode_rows, encode_with_metrics,
    points_from_flat, points_from_rows,
};
pub use error::{CurveMemoryError, Result};
pub use record::MemoryRecord;
pub use reconstruct::{
    MAX_RECONSTRUCT_SAMPLES, MIN_DEFAULT_STEPS, ReconstructOptions, STEP_COUNT_SLACK, reconstruct,
    reconstruct_with_metrics,
};

#[cfg(test)]
mod tests;
