//! signature.rs
//! Immutable call signatures and the pure derivations used to reshape them.

use super::ty::Type;
use super::value::Value;
use crate::binder::BindError;
use crate::handle::Failure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An ordered parameter list plus a return type.
///
/// Signatures are never mutated. Every derivation (`insert_params`,
/// `drop_params`, `change_return`, ...) builds a new value, so a signature can
/// be shared freely between handles and binders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    params: Arc<[Type]>,
    #[serde(rename = "return")]
    return_type: Type,
}

impl Signature {
    pub fn new(return_type: Type, params: impl Into<Vec<Type>>) -> Self {
        Self { params: Arc::from(params.into()), return_type }
    }

    /// A signature taking nothing and returning `return_type`.
    pub fn returning(return_type: Type) -> Self {
        Self::new(return_type, Vec::new())
    }

    pub fn params(&self) -> &[Type] { &self.params }
    pub fn param(&self, index: usize) -> Option<Type> { self.params.get(index).copied() }
    pub fn return_type(&self) -> Type { self.return_type }
    pub fn arity(&self) -> usize { self.params.len() }
    pub fn returns_void(&self) -> bool { self.return_type.is_void() }

    /// Inserts `types` so that the first of them lands at `index`.
    pub fn insert_params(&self, index: usize, types: &[Type]) -> Result<Self, BindError> {
        if index > self.arity() {
            return Err(BindError::IndexOutOfRange { index, arity: self.arity() });
        }
        let mut params = Vec::with_capacity(self.arity() + types.len());
        params.extend_from_slice(&self.params[..index]);
        params.extend_from_slice(types);
        params.extend_from_slice(&self.params[index..]);
        Ok(Self::new(self.return_type, params))
    }

    /// Removes `count` parameters starting at `index`.
    pub fn drop_params(&self, index: usize, count: usize) -> Result<Self, BindError> {
        let end = index.checked_add(count).filter(|&end| end <= self.arity());
        let Some(end) = end else {
            return Err(BindError::RangeOutOfBounds { index, count, arity: self.arity() });
        };
        let mut params = Vec::with_capacity(self.arity() - count);
        params.extend_from_slice(&self.params[..index]);
        params.extend_from_slice(&self.params[end..]);
        Ok(Self::new(self.return_type, params))
    }

    pub fn change_return(&self, return_type: Type) -> Self {
        Self { params: Arc::clone(&self.params), return_type }
    }

    /// True when arguments typed as `supplied` can be passed to these parameters.
    pub fn accepts_params(&self, supplied: &[Type]) -> bool {
        self.arity() == supplied.len()
            && self.params.iter().zip(supplied).all(|(slot, ty)| slot.accepts(ty))
    }

    /// True when `supplied` fits the return slot. A void slot discards anything.
    pub fn accepts_return(&self, supplied: Type) -> bool {
        self.returns_void() || self.return_type.accepts(&supplied)
    }

    /// Verifies an argument list at the call boundary.
    pub fn check_args(&self, args: &[Value]) -> Result<(), Failure> {
        if args.len() != self.arity() {
            return Err(Failure::ArityMismatch { expected: self.arity(), actual: args.len() });
        }
        for (position, (expected, arg)) in self.params.iter().zip(args).enumerate() {
            let actual = arg.ty();
            if !expected.accepts(&actual) {
                return Err(Failure::ArgumentType { position, expected: *expected, actual });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, ty) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ty)?;
        }
        write!(f, "){}", self.return_type)
    }
}
