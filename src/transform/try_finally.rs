//! The try/finally transform: run a cleanup handle after every attempt to
//! run the target, whether it returned or failed.
use super::contract::Transform;
use crate::binder::{catch_failure, fold_arguments, BindError, Binder};
use crate::handle::{Guard, Handle};
use crate::types::{Signature, Type};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace, warn};

/// Wraps a target so that `post` runs exactly once per invocation.
///
/// The wrapped handle has the target's signature. Per invocation:
///
/// * the target returns `v`: `post` runs with the original arguments, then
///   `v` is returned unchanged;
/// * the target raises a failure accepted by the guard: `post` runs with the
///   original arguments, then the same failure is raised again;
/// * the target raises a failure the guard does not accept: it propagates and
///   `post` does not run;
/// * the target panics: with [`Guard::All`], `post` runs with the original
///   arguments while the panic unwinds, and the panic then continues to the
///   caller. With [`Guard::Kinds`] the panic passes through and `post` does
///   not run.
///
/// `post` never sees the return value or the failure. If `post` itself fails,
/// its failure propagates; on the failure path this masks the original
/// failure, which is lost. No suppressed-failure chaining is attempted.
#[derive(Clone)]
pub struct TryFinally {
    post: Handle,
    guard: Guard,
}

#[derive(Debug, Clone, Copy)]
enum CleanupPath {
    Success,
    Failure,
    Unwind,
}

impl TryFinally {
    /// Guards every failure.
    pub fn new(post: Handle) -> Self {
        Self::with_guard(post, Guard::All)
    }

    pub fn with_guard(post: Handle, guard: Guard) -> Self {
        Self { post, guard }
    }

    pub fn post(&self) -> &Handle { &self.post }
    pub fn guard(&self) -> &Guard { &self.guard }

    /// `post` with tracing around it, tagged by which path it cleans up after.
    fn traced_post(&self, path: CleanupPath) -> Handle {
        let post = self.post.clone();
        Handle::new(post.name().to_string(), post.signature().clone(), move |args| {
            trace!(?path, "running cleanup {}", post);
            let outcome = post.invoke(args);
            if let Err(failure) = &outcome {
                let effect = match path {
                    CleanupPath::Unwind => "the panic continues",
                    _ => "its failure replaces the original outcome",
                };
                warn!(?path, %failure, "cleanup {} failed; {}", post, effect);
            }
            outcome
        })
    }

    /// Runs `post` if `target` panics, then resumes the unwind with the same
    /// payload. The cleanup outcome is dropped; the panic stays the result.
    fn clean_on_unwind(&self, target: Handle) -> Handle {
        let post = self.traced_post(CleanupPath::Unwind);
        let name = target.name().to_string();
        let signature = target.signature().clone();
        Handle::new(name, signature, move |args| {
            match panic::catch_unwind(AssertUnwindSafe(|| target.invoke(args))) {
                Ok(outcome) => outcome,
                Err(payload) => {
                    let _ = post.invoke(args);
                    panic::resume_unwind(payload)
                }
            }
        })
    }
}

impl Transform for TryFinally {
    fn up(&self, target: Handle) -> Result<Handle, BindError> {
        let target_sig = target.signature().clone();
        let arity = target_sig.arity();
        debug!(handle = %target, post = %self.post, guard = %self.guard, "weaving try/finally");

        // Failure path: (failure, T...) -> run post(T...) -> re-raise failure.
        let with_failure = target_sig.insert_params(0, &[Type::Failure])?;
        let exception_handler = Binder::from(with_failure.change_return(Type::Void))
            .drop(0, 1)?
            .invoke(&self.traced_post(CleanupPath::Failure))?;
        let rethrow = Binder::from(with_failure)
            .fold(&exception_handler)?
            .drop(1, arity)?
            .throw_failure()?;
        let target = match self.guard {
            Guard::All => self.clean_on_unwind(target),
            Guard::Kinds(_) => target,
        };
        let guarded = catch_failure(target, self.guard.clone(), rethrow)?;

        // Success path: post must not disturb the value being returned.
        let success_post = self.traced_post(CleanupPath::Success);
        let real_post = if target_sig.returns_void() {
            Binder::from(target_sig.clone()).invoke(&success_post)?
        } else {
            let with_value = target_sig.insert_params(0, &[target_sig.return_type()])?;
            let new_post = Binder::from(with_value.change_return(Type::Void))
                .drop(0, 1)?
                .invoke(&success_post)?;
            Binder::from(with_value)
                .fold(&new_post)?
                .drop(1, arity)?
                .identity()?
        };

        let name = format!("try_finally({})", guarded.name());
        let wrapped = fold_arguments(real_post, guarded)?.renamed(name);
        if wrapped.signature() != &target_sig {
            return Err(BindError::ContractViolation {
                transform: self.to_string(),
                expected: target_sig,
                actual: wrapped.signature().clone(),
            });
        }
        Ok(wrapped)
    }

    fn down(&self, outward: &Signature) -> Signature {
        outward.clone()
    }
}

impl fmt::Display for TryFinally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "try/finally with {}", self.post)?;
        if self.guard != Guard::All {
            write!(f, " guarding {}", self.guard)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TryFinally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFinally")
            .field("post", &self.post)
            .field("guard", &self.guard)
            .finish()
    }
}
