//! Error types for the anofox-scaler library.

use thiserror::Error;

/// Result type alias for scaling operations.
pub type Result<T> = std::result::Result<T, ScalerError>;

/// Errors that can occur during scaling operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalerError {
    /// Input has the wrong shape or kind for the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Recursive winsorization did not settle within its iteration bound.
    #[error("winsorization did not converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },
}

impl ScalerError {
    /// True when the error comes from the data being numerically
    /// pathological rather than from a bad call.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, ScalerError::ConvergenceFailure { .. })
    }
}
