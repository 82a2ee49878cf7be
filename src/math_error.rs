//! Error handling for transform and matrix helpers

use std::io;

/// Unified error for the few operations that refuse degenerate input. Most helpers in this
/// crate are lenient and never fail; see `MathConfig::strict` for the variants that do.
#[derive(Debug)]
pub enum MathError {
    IoError(io::Error),
    DimensionMismatch { expected: usize, found: usize },
    InvalidLength { expected: usize, found: usize },
    NotSquare { rows: usize, cols: usize },
    MalformedRow { row: usize, expected: usize, found: usize },
    UnparseableToken { row: usize, column: usize, token: String },
    ZeroDirection,
    DecompositionFailed(String),
    ConfigError(String),
}

/// Convenience alias for `Result<T, MathError>`.
pub type MathResult<T> = Result<T, MathError>;

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            MathError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            MathError::DimensionMismatch { expected, found } =>
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found),
            MathError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            MathError::NotSquare { rows, cols } =>
                write!(f, "Matrix is not square: {} x {}", rows, cols),
            MathError::MalformedRow { row, expected, found } =>
                write!(f, "Malformed row {}: expected {} columns, found {}", row, expected, found),
            MathError::UnparseableToken { row, column, ref token } =>
                write!(f, "Cannot parse '{}' at row {}, column {}", token, row, column),
            MathError::ZeroDirection =>
                write!(f, "Line direction vector is zero"),
            MathError::DecompositionFailed(ref msg) =>
                write!(f, "Eigen decomposition failed: {}", msg),
            MathError::ConfigError(ref msg) =>
                write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for MathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MathError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MathError {
    fn from(err: io::Error) -> Self {
        MathError::IoError(err)
    }
}
