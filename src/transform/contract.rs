use crate::binder::BindError;
use crate::handle::Handle;
use crate::types::Signature;
use std::fmt;

/// A composable adaptation of a handle.
///
/// `up` weaves behavior around a target and returns a new handle without
/// touching the target. `down` maps the signature the transform presents to
/// callers back to the signature the target must have, so a chain of
/// transforms can be checked without invoking anything.
///
/// Transforms nest: for a chain `[a, b]` (outermost first) the finished handle
/// is `a.up(b.up(target))` and the target must satisfy
/// `b.down(a.down(outward))`.
pub trait Transform: fmt::Display + Send + Sync {
    fn up(&self, target: Handle) -> Result<Handle, BindError>;

    fn down(&self, outward: &Signature) -> Signature;
}
