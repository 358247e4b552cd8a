//! Defines the error types reported by the transform chain checker.
use thiserror::Error;

/// The specific category of a chain problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainErrorType {
    /// The target takes a different number of arguments than the chain expects.
    ArityMismatch,
    /// A parameter of the target cannot receive what the chain passes in.
    ParameterMismatch,
    /// The target's return type cannot flow out through the chain.
    ReturnMismatch,
}

/// A structured report from the transform chain checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at step {step}, {transform})")]
pub struct ChainError {
    /// Index of the transform that produced the expectation, outermost first.
    /// Equal to the chain length when the problem is at the target itself.
    pub step: usize,
    pub transform: String,
    pub error_type: ChainErrorType,
    pub message: String,
}

impl ChainError {
    pub fn new(error_type: ChainErrorType, message: String) -> Self {
        Self {
            step: 0,
            transform: "target".to_string(),
            error_type,
            message,
        }
    }

    pub fn at_step(mut self, step: usize, transform: String) -> Self {
        self.step = step;
        self.transform = transform;
        self
    }
}
