use thiserror::Error;

/// Errors raised while resolving an algorithm by key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgoError {
    /// The requested key is not registered.
    #[error("Invalid algorithm '{key}'. Choose from: {}", .valid.join(", "))]
    UnknownAlgorithm {
        key:   String,
        valid: Vec<&'static str>,
    },
}

/// Errors raised by the timing harness.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// A zero step would never reach the upper bound.
    #[error("step must be greater than zero")]
    InvalidStep,

    /// Stepping past `usize::MAX` before reaching the upper bound.
    #[error("input size overflowed while stepping from {last} by {step}")]
    SizeOverflow { last: usize, step: usize },

    /// The algorithm panicked for one input size; no samples are kept.
    #[error("algorithm failed at size {size}: {message}")]
    AlgorithmPanicked { size: usize, message: String },
}
