use thiserror::Error;

/// Errors reported at the boundary of the engine.
///
/// Numerical operations never fail: singular configurations produce non-finite values and a
/// rejected adaptive step is an ordinary [`StepResult`](crate::integrator::StepResult).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A vector-like argument did not have three components.
    #[error("expected a vector of {expected} components, found {found}")]
    VectorLength {
        /// Number of components required.
        expected: usize,
        /// Number of components received.
        found: usize,
    },

    /// Adaptive step-size parameters are out of range.
    #[error("invalid adaptive parameters: {0}")]
    InvalidParams(String),
}

/// Result type for fallible boundary operations.
pub type Result<T> = std::result::Result<T, Error>;
