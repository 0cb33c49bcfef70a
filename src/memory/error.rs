use thiserror::Error;

/// Result type for curve-memory operations.
pub type Result<T> = std::result::Result<T, CurveMemoryError>;

/// Failures of the encode/reconstruct entry points.
///
/// Degenerate curves are not errors: they encode to a zero-length record and
/// reconstruct to a placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveMemoryError {
    /// A coordinate row does not have exactly three columns.
    #[error("point row {row} has {columns} columns, expected 3")]
    InvalidShape { row: usize, columns: usize },
    /// A flat coordinate buffer does not describe an `(N, 3)` array.
    #[error("flat buffer of {len} values with {columns} columns is not an (N, 3) array")]
    InvalidFlatShape { len: usize, columns: usize },
    /// Both a step size and a sample count were given to reconstruct.
    #[error("step and sample count are mutually exclusive")]
    ConflictingArguments,
    /// The reconstruction step is not finite and positive, or is so small
    /// that the walk would exceed the sample limit.
    #[error("reconstruction step {0} is not finite and positive or needs too many samples")]
    InvalidStep(f64),
    /// The reconstruction sample count is zero or above the sample limit.
    #[error("reconstruction sample count {0} is outside 1..={max}", max = crate::memory::MAX_RECONSTRUCT_SAMPLES)]
    InvalidSampleCount(usize),
    /// A record (typically loaded from external storage) is inconsistent.
    #[error("invalid memory record: {0}")]
    InvalidRecord(String),
}
