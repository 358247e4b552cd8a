//! Sequences transforms and checks a chain statically before binding it.
use super::contract::Transform;
use super::error::{ChainError, ChainErrorType};
use crate::binder::BindError;
use crate::handle::Handle;
use crate::types::Signature;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// An ordered stack of transforms, outermost first.
#[derive(Clone, Default)]
pub struct TransformChain {
    transforms: Vec<Arc<dyn Transform>>,
}

impl TransformChain {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.transforms.len() }
    pub fn is_empty(&self) -> bool { self.transforms.is_empty() }

    /// Adds `transform` inside every transform already pushed.
    pub fn push(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Maps the outward signature through every `down`, outermost first.
    pub fn down(&self, outward: &Signature) -> Signature {
        self.expectations(outward).pop().unwrap_or_else(|| outward.clone())
    }

    /// Wraps `target` in every transform; the first pushed ends up outermost.
    pub fn up(&self, target: Handle) -> Result<Handle, BindError> {
        self.transforms.iter().rev().try_fold(target, |handle, t| t.up(handle))
    }

    /// Checks, without invoking anything, that a target with signature
    /// `target` can sit at the bottom of this chain presenting `outward`.
    /// Reports every problem found rather than stopping at the first.
    pub fn check(&self, outward: &Signature, target: &Signature) -> Result<(), Vec<ChainError>> {
        let required = self.down(outward);
        let mut errors = Vec::new();

        if required.arity() != target.arity() {
            errors.push(ChainError::new(
                ChainErrorType::ArityMismatch,
                format!(
                    "Chain passes {} argument(s), target {} takes {}.",
                    required.arity(),
                    target,
                    target.arity()
                ),
            ));
        } else {
            let pairs = required.params().iter().zip(target.params());
            for (position, (passed, slot)) in pairs.enumerate() {
                if !slot.accepts(passed) {
                    errors.push(ChainError::new(
                        ChainErrorType::ParameterMismatch,
                        format!(
                            "Argument {} is {}, but target {} expects {}.",
                            position, passed, target, slot
                        ),
                    ));
                }
            }
        }

        if !required.accepts_return(target.return_type()) {
            errors.push(ChainError::new(
                ChainErrorType::ReturnMismatch,
                format!(
                    "Target {} returns {}, but the chain must return {}.",
                    target,
                    target.return_type(),
                    required.return_type()
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            let step = self.len();
            Err(errors.into_iter().map(|e| e.at_step(step, "target".to_string())).collect())
        }
    }

    /// Checks the chain, wraps `target`, and verifies after each layer that
    /// the transform honored the signature its `down` promised.
    pub fn bind(&self, outward: &Signature, target: Handle) -> Result<Handle, BindError> {
        self.check(outward, target.signature()).map_err(BindError::Chain)?;
        debug!(
            outward = %outward,
            transforms = self.len(),
            "binding transform chain to {}",
            target
        );

        // expectations[i] is what transform i presents; the target sits below the last.
        let mut expected = vec![outward.clone()];
        expected.extend(self.expectations(outward));
        expected.pop();

        let mut handle = target;
        for (transform, presents) in self.transforms.iter().zip(expected).rev() {
            handle = transform.up(handle)?;
            // The wrapped handle must take whatever callers pass and return
            // something the slot above accepts.
            if !handle.signature().accepts_params(presents.params())
                || !presents.accepts_return(handle.signature().return_type())
            {
                return Err(BindError::ContractViolation {
                    transform: transform.to_string(),
                    expected: presents,
                    actual: handle.signature().clone(),
                });
            }
        }
        Ok(handle)
    }

    /// The signature each transform requires of whatever it wraps, outermost first.
    fn expectations(&self, outward: &Signature) -> Vec<Signature> {
        let mut current = outward.clone();
        self.transforms
            .iter()
            .map(|t| {
                current = t.down(&current);
                current.clone()
            })
            .collect()
    }
}

impl fmt::Display for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.transforms.iter().map(|t| t.to_string()).collect();
        write!(f, "[{}]", names.join(" => "))
    }
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransformChain{}", self)
    }
}
