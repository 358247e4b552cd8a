//! value.rs
//! Dynamically-typed runtime values passed through handles.

use super::ty::Type;
use crate::handle::Failure;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Argument list for a single invocation. Most handles take few arguments,
/// so the common case stays inline.
pub type Args = SmallVec<[Value; 4]>;

/// The atomic unit of data flowing through a call chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Shared so that argument lists clone cheaply.
    Str(Arc<str>),
    /// A captured failure, used by catch handlers to receive what was raised.
    Failure(Box<Failure>),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Void => Type::Void,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::Failure(_) => Type::Failure,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Unwraps a carried failure, handing back the value itself otherwise.
    pub fn into_failure(self) -> Result<Failure, Value> {
        match self {
            Value::Failure(f) => Ok(*f),
            other => Err(other),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl From<Failure> for Value {
    fn from(f: Failure) -> Self {
        Value::Failure(Box::new(f))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Failure(e) => write!(f, "<{}>", e),
        }
    }
}
