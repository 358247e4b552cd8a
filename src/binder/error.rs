//! Defines the composition-time error type for binders, combinators and transforms.
use crate::transform::ChainError;
use crate::types::Signature;
use thiserror::Error;

/// Raised while *assembling* a call chain, before anything is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("Index {index} out of range for arity {arity}")]
    IndexOutOfRange { index: usize, arity: usize },
    #[error("Range {index}+{count} out of bounds for arity {arity}")]
    RangeOutOfBounds { index: usize, count: usize, arity: usize },
    #[error("Cannot invoke '{unit}' with signature {actual} from working signature {expected}")]
    InvokeMismatch { unit: String, expected: Signature, actual: Signature },
    #[error("Cannot fold '{unit}' with signature {actual} into working signature {working}")]
    FoldMismatch { unit: String, working: Signature, actual: Signature },
    #[error("Cannot throw from working signature {working}; expected a single failure parameter")]
    ThrowShape { working: Signature },
    #[error("Cannot return identity from working signature {working}")]
    IdentityShape { working: Signature },
    #[error("Catch handler '{unit}' has signature {actual}, expected {expected}")]
    HandlerMismatch { unit: String, expected: Signature, actual: Signature },
    #[error("Combiner '{combiner}' with signature {combiner_sig} does not fit target {target}")]
    CombinerMismatch { combiner: String, combiner_sig: Signature, target: Signature },
    #[error("Transform '{transform}' produced {actual}, but its contract requires {expected}")]
    ContractViolation { transform: String, expected: Signature, actual: Signature },
    #[error("Transform chain failed validation with {} problem(s)", .0.len())]
    Chain(Vec<ChainError>),
}
