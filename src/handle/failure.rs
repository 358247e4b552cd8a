//! failure.rs
//! Failures raised while invoking a handle.

use crate::types::Type;
use thiserror::Error;

/// A failure raised during invocation.
///
/// Failures are plain values: they can be carried as a `Value::Failure`
/// argument, re-raised unchanged, and compared structurally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Raised by a handle's own behavior.
    #[error("{kind}: {message}")]
    Raised { kind: String, message: String },
    #[error("Argument count mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Argument {position} has type {actual}, expected {expected}")]
    ArgumentType { position: usize, expected: Type, actual: Type },
    #[error("Returned a value of type {actual}, expected {expected}")]
    ReturnType { expected: Type, actual: Type },
}

impl Failure {
    pub fn raise(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Failure::Raised { kind: kind.into(), message: message.into() }
    }

    /// The category name used by guards to decide what to intercept.
    pub fn kind(&self) -> &str {
        match self {
            Failure::Raised { kind, .. } => kind,
            Failure::ArityMismatch { .. } => "ArityMismatch",
            Failure::ArgumentType { .. } => "ArgumentType",
            Failure::ReturnType { .. } => "ReturnType",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_message() {
        let f = Failure::raise("DivideByZero", "attempt to divide by zero");
        assert_eq!(f.kind(), "DivideByZero");
        assert_eq!(f.to_string(), "DivideByZero: attempt to divide by zero");

        let f = Failure::ArgumentType { position: 1, expected: Type::Int, actual: Type::Str };
        assert_eq!(f.kind(), "ArgumentType");
        assert_eq!(f.to_string(), "Argument 1 has type str, expected int");
    }
}
