use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors raised while computing distance or matrix profiles.
///
/// Input-shape problems, degenerate statistics and internal invariant
/// violations are kept as distinct variants so callers can tell a bad
/// argument from a bug in offset arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("time series is empty")]
    EmptySeries,

    #[error("no dimensions supplied")]
    EmptyDimensions,

    #[error("dimension {dimension} has length {len}, expected {expected}")]
    LengthMismatch {
        dimension: usize,
        len: usize,
        expected: usize,
    },

    #[error("subsequence length must be at least 2, got {m}")]
    QueryTooShort { m: usize },

    #[error("subsequence length {m} must be less than half the series length {n}")]
    QueryTooLong { m: usize, n: usize },

    #[error("index {idx} with subsequence length {m} reaches beyond series length {len}")]
    WindowOutOfRange { idx: usize, m: usize, len: usize },

    #[error("sample fraction must be in (0, 1], got {0}")]
    InvalidSample(f64),

    #[error("standard deviation is zero")]
    ZeroStandardDeviation,

    #[error("internal invariant violated: {what} has length {actual}, expected {expected}")]
    InvariantViolation {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("fourier transform failed: {0}")]
    Fourier(String),
}

/// Failure of [`z_normalize`](crate::algorithms::normalize::z_normalize).
///
/// `ZeroStd` still hands back the mean-centered buffer. It is not a
/// normalized series and must not be used as one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("series does not have any data")]
    Empty,

    #[error("standard deviation is zero")]
    ZeroStd { centered: Vec<f64> },
}

impl From<NormalizeError> for ProfileError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Empty => ProfileError::EmptySeries,
            NormalizeError::ZeroStd { .. } => ProfileError::ZeroStandardDeviation,
        }
    }
}
