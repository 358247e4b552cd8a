//! unit.rs
//! The invocable unit: a shared behavior carrying its declared signature.

use super::failure::Failure;
use crate::types::{Args, Signature, Type, Value};
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// The executable part of a handle. Receives arguments already checked
/// against the handle's signature.
pub type Behavior = dyn Fn(&[Value]) -> Result<Value, Failure> + Send + Sync;

/// An opaque callable value conforming to a `Signature`.
///
/// Cloning a handle shares its behavior. Handles hold no mutable state of
/// their own, so they can be invoked from any number of threads as long as
/// the wrapped behavior is itself reentrant.
#[derive(Clone)]
pub struct Handle {
    name: Arc<str>,
    signature: Signature,
    behavior: Arc<Behavior>,
}

impl Handle {
    pub fn new<F>(name: impl Into<Arc<str>>, signature: Signature, behavior: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        Self { name: name.into(), signature, behavior: Arc::new(behavior) }
    }

    /// Returns its single argument unchanged.
    pub fn identity(ty: Type) -> Self {
        Self::new("identity", Signature::new(ty, vec![ty]), |args| Ok(args[0].clone()))
    }

    /// Ignores its arguments and returns `value`.
    pub fn constant(value: Value, params: impl Into<Vec<Type>>) -> Self {
        let signature = Signature::new(value.ty(), params);
        Self::new("constant", signature, move |_| Ok(value.clone()))
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn signature(&self) -> &Signature { &self.signature }

    /// Same behavior under a different name.
    pub fn renamed(&self, name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into(), ..self.clone() }
    }

    /// Invokes the behavior after checking the arguments against the
    /// signature. A successful result is checked against the return type;
    /// void handles always yield `Value::Void`.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, Failure> {
        self.signature.check_args(args)?;
        let value = (self.behavior)(args)?;
        self.check_return(value)
    }

    /// Invokes the handle once per argument list, in parallel.
    ///
    /// Results keep the order of `batch`; one failing element does not affect
    /// the others.
    pub fn invoke_all(&self, batch: &[Args]) -> Vec<Result<Value, Failure>> {
        batch.par_iter().map(|args| self.invoke(args)).collect()
    }

    fn check_return(&self, value: Value) -> Result<Value, Failure> {
        let expected = self.signature.return_type();
        if expected.is_void() {
            return Ok(Value::Void);
        }
        let actual = value.ty();
        if expected.accepts(&actual) {
            Ok(value)
        } else {
            Err(Failure::ReturnType { expected, actual })
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
