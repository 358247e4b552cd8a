//! Transforms: composable adaptations applied to handles.
//!
//! A `Transform` weaves behavior around a target handle (`up`) and states,
//! purely in terms of signatures, what it requires of that target (`down`).
//! `TransformChain` sequences several of them and checks the whole stack
//! before anything is bound.

pub use self::chain::TransformChain;
pub use self::contract::Transform;
pub use self::error::{ChainError, ChainErrorType};
pub use self::try_finally::TryFinally;

// --- MODULE DECLARATIONS ---
mod chain;
mod contract;
mod error;
mod try_finally;
