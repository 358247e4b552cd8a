//! builder.rs
//! The fluent composer: reshapes an incoming signature step by step and binds
//! the result to a terminal handle.

use super::error::BindError;
use crate::handle::{Failure, Handle};
use crate::types::{Args, Signature, Type, Value};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone)]
enum Step {
    Drop { index: usize, count: usize },
    Insert { index: usize, values: Vec<Value> },
    Fold { unit: Handle },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Drop { index, count } => write!(f, "drop({}, {})", index, count),
            Step::Insert { index, values } => {
                let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "insert({}, [{}])", index, rendered.join(", "))
            }
            Step::Fold { unit } => write!(f, "fold({})", unit),
        }
    }
}

/// Builds a handle by describing how incoming arguments are reshaped before
/// they reach a terminal.
///
/// The binder starts from the *incoming* signature: the one the finished
/// handle presents to callers. Each step derives a new working signature and
/// is validated immediately, so an ill-shaped chain fails at composition
/// time with a `BindError` rather than at call time.
///
/// ```
/// use invokebinder_core::{Binder, Handle, Signature, Type, Value};
///
/// let len = Handle::new("len", Signature::new(Type::Int, vec![Type::Str]), |args| {
///     Ok(Value::Int(args[0].as_str().map_or(0, |s| s.len() as i64)))
/// });
/// let bound = Binder::from(Signature::new(Type::Int, vec![Type::Int, Type::Str]))
///     .drop(0, 1)?
///     .invoke(&len)?;
/// assert_eq!(bound.invoke(&[Value::Int(9), Value::from("abc")]), Ok(Value::Int(3)));
/// # Ok::<(), invokebinder_core::BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Binder {
    start: Signature,
    current: Signature,
    steps: Vec<Step>,
}

impl From<Signature> for Binder {
    fn from(start: Signature) -> Self {
        Self { current: start.clone(), start, steps: Vec::new() }
    }
}

impl Binder {
    /// The signature callers of the finished handle will use.
    pub fn incoming(&self) -> &Signature { &self.start }

    /// The signature after every step so far.
    pub fn working(&self) -> &Signature { &self.current }

    /// Discards `count` arguments starting at `index`.
    pub fn drop(mut self, index: usize, count: usize) -> Result<Self, BindError> {
        self.current = self.current.drop_params(index, count)?;
        self.steps.push(Step::Drop { index, count });
        Ok(self)
    }

    /// Splices fixed `values` into the argument list at `index`.
    pub fn insert(
        mut self,
        index: usize,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self, BindError> {
        let values: Vec<Value> = values.into_iter().collect();
        let types: Vec<Type> = values.iter().map(Value::ty).collect();
        self.current = self.current.insert_params(index, &types)?;
        self.steps.push(Step::Insert { index, values });
        Ok(self)
    }

    /// Runs `unit` on the leading arguments before continuing. A non-void
    /// result is prepended to the arguments; a void result leaves them as
    /// they were.
    pub fn fold(mut self, unit: &Handle) -> Result<Self, BindError> {
        let unit_sig = unit.signature();
        let arity = unit_sig.arity();
        let fits = arity <= self.current.arity()
            && unit_sig.accepts_params(&self.current.params()[..arity]);
        if !fits {
            return Err(BindError::FoldMismatch {
                unit: unit.name().to_string(),
                working: self.current,
                actual: unit_sig.clone(),
            });
        }
        if !unit_sig.returns_void() {
            self.current = self.current.insert_params(0, &[unit_sig.return_type()])?;
        }
        self.steps.push(Step::Fold { unit: unit.clone() });
        Ok(self)
    }

    /// Terminal: passes the reshaped arguments to `unit`. When the working
    /// return type is void the unit's result is discarded.
    pub fn invoke(self, unit: &Handle) -> Result<Handle, BindError> {
        let unit_sig = unit.signature();
        if !unit_sig.accepts_params(self.current.params())
            || !self.current.accepts_return(unit_sig.return_type())
        {
            return Err(BindError::InvokeMismatch {
                unit: unit.name().to_string(),
                expected: self.current,
                actual: unit_sig.clone(),
            });
        }
        debug!(incoming = %self.start, steps = self.steps.len(), "binding to {}", unit);

        let unit = unit.clone();
        let steps = self.steps;
        Ok(Handle::new(unit.name().to_string(), self.start, move |args| {
            let args = replay(&steps, args)?;
            unit.invoke(&args)
        }))
    }

    /// Terminal: re-raises the single remaining argument, which must be a
    /// captured failure. The failure is raised exactly as it was captured.
    pub fn throw_failure(self) -> Result<Handle, BindError> {
        if self.current.params() != [Type::Failure].as_slice() {
            return Err(BindError::ThrowShape { working: self.current });
        }
        debug!(incoming = %self.start, steps = self.steps.len(), "binding to throw");

        let steps = self.steps;
        Ok(Handle::new("throw", self.start, move |args| {
            let mut args = replay(&steps, args)?;
            match args.pop() {
                Some(Value::Failure(failure)) => Err(*failure),
                other => Err(Failure::ArgumentType {
                    position: 0,
                    expected: Type::Failure,
                    actual: other.map_or(Type::Void, |v| v.ty()),
                }),
            }
        }))
    }

    /// Terminal: returns the single remaining argument unchanged.
    pub fn identity(self) -> Result<Handle, BindError> {
        let fits = self.current.arity() == 1
            && self.current.param(0).is_some_and(|ty| self.current.return_type().accepts(&ty));
        if !fits {
            return Err(BindError::IdentityShape { working: self.current });
        }
        debug!(incoming = %self.start, steps = self.steps.len(), "binding to identity");

        let steps = self.steps;
        Ok(Handle::new("identity", self.start, move |args| {
            let mut args = replay(&steps, args)?;
            Ok(args.pop().unwrap_or(Value::Void))
        }))
    }
}

impl fmt::Display for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binder {}", self.start)?;
        for step in &self.steps {
            write!(f, " -> {}", step)?;
        }
        Ok(())
    }
}

/// Applies the recorded steps to a concrete argument list. Index ranges were
/// validated when each step was added and the incoming arguments have
/// already been checked against the incoming signature.
fn replay(steps: &[Step], args: &[Value]) -> Result<Args, Failure> {
    let mut current: Args = args.iter().cloned().collect();
    for step in steps {
        match step {
            Step::Drop { index, count } => {
                current.drain(*index..*index + *count);
            }
            Step::Insert { index, values } => {
                current.insert_many(*index, values.iter().cloned());
            }
            Step::Fold { unit } => {
                let arity = unit.signature().arity();
                let folded = unit.invoke(&current[..arity])?;
                if !unit.signature().returns_void() {
                    current.insert(0, folded);
                }
            }
        }
    }
    Ok(current)
}
