//! combinators.rs
//! Catch and fold as explicit control flow around existing handles.

use super::error::BindError;
use crate::handle::{Guard, Handle};
use crate::types::{Args, Type, Value};

/// Wraps `target` so that a failure accepted by `guard` is handed to
/// `handler` together with the original arguments.
///
/// For a target `(T...)R` the handler must be `(failure, T...)R`. Whatever the
/// handler returns or raises becomes the outcome. Failures outside the guard
/// propagate unchanged and the handler never runs.
pub fn catch_failure(target: Handle, guard: Guard, handler: Handle) -> Result<Handle, BindError> {
    let expected = target.signature().insert_params(0, &[Type::Failure])?;
    let handler_sig = handler.signature();
    if !handler_sig.accepts_params(expected.params())
        || !expected.accepts_return(handler_sig.return_type())
    {
        return Err(BindError::HandlerMismatch {
            unit: handler.name().to_string(),
            expected,
            actual: handler_sig.clone(),
        });
    }

    let name = target.name().to_string();
    let signature = target.signature().clone();
    Ok(Handle::new(name, signature, move |args| match target.invoke(args) {
        Err(failure) if guard.catches(&failure) => {
            let mut handler_args = Args::with_capacity(args.len() + 1);
            handler_args.push(Value::from(failure));
            handler_args.extend(args.iter().cloned());
            handler.invoke(&handler_args)
        }
        outcome => outcome,
    }))
}

/// Runs `combiner` on the leading arguments, then `target` with the
/// combiner's result prepended (or with the arguments unchanged when the
/// combiner returns void).
///
/// For a non-void combiner `(P...)c` the target must be `(c, A...)R` where
/// `P...` is a prefix of `A...`; the result is `(A...)R`. For a void combiner
/// the target must be `(A...)R` and the result has the same signature.
/// A failure raised by the combiner propagates and `target` does not run.
pub fn fold_arguments(target: Handle, combiner: Handle) -> Result<Handle, BindError> {
    let combiner_sig = combiner.signature().clone();
    let target_sig = target.signature().clone();
    let mismatch = || BindError::CombinerMismatch {
        combiner: combiner.name().to_string(),
        combiner_sig: combiner_sig.clone(),
        target: target_sig.clone(),
    };

    let folds_value = !combiner_sig.returns_void();
    let outward = if folds_value {
        let leading_fits = target_sig
            .param(0)
            .is_some_and(|slot| slot.accepts(&combiner_sig.return_type()));
        if !leading_fits {
            return Err(mismatch());
        }
        target_sig.drop_params(0, 1)?
    } else {
        target_sig.clone()
    };

    let prefix = combiner_sig.arity();
    if prefix > outward.arity() || !combiner_sig.accepts_params(&outward.params()[..prefix]) {
        return Err(mismatch());
    }

    let name = target.name().to_string();
    Ok(Handle::new(name, outward, move |args| {
        let folded = combiner.invoke(&args[..prefix])?;
        if folds_value {
            let mut full = Args::with_capacity(args.len() + 1);
            full.push(folded);
            full.extend(args.iter().cloned());
            target.invoke(&full)
        } else {
            target.invoke(args)
        }
    }))
}
