//! Behavioural tests for the try/finally transform through the public API.
use invokebinder_core::{
    Args, Failure, Guard, Handle, Signature, Transform, TryFinally, Type, Value,
};
use rstest::rstest;
use smallvec::smallvec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn sig(ret: Type, params: &[Type]) -> Signature {
    Signature::new(ret, params.to_vec())
}

/// A cleanup handle that records every argument list it is called with.
fn recording_post(params: &[Type]) -> (Handle, Arc<Mutex<Vec<Vec<Value>>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let post = {
        let calls = Arc::clone(&calls);
        Handle::new("post", sig(Type::Void, params), move |args| {
            calls.lock().unwrap().push(args.to_vec());
            Ok(Value::Void)
        })
    };
    (post, calls)
}

fn counting_post(params: &[Type]) -> (Handle, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let post = {
        let count = Arc::clone(&count);
        Handle::new("post", sig(Type::Void, params), move |_| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Void)
        })
    };
    (post, count)
}

fn add_one() -> Handle {
    Handle::new("add_one", sig(Type::Int, &[Type::Int]), |args| {
        Ok(Value::Int(args[0].as_int().unwrap_or_default() + 1))
    })
}

fn always_fails(kind: &'static str) -> Handle {
    Handle::new("always_fails", sig(Type::Int, &[Type::Int]), move |_| {
        Err(Failure::raise(kind, "target failed"))
    })
}

#[test]
fn test_success_returns_value_and_cleans_up_once() {
    let (post, count) = counting_post(&[Type::Int]);
    let wrapped = TryFinally::new(post).up(add_one()).unwrap();

    assert_eq!(wrapped.invoke(&[Value::Int(5)]), Ok(Value::Int(6)));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_guarded_failure_is_reraised_after_cleanup() {
    let (post, count) = counting_post(&[Type::Int]);
    let wrapped = TryFinally::new(post).up(always_fails("DivideByZero")).unwrap();

    assert_eq!(
        wrapped.invoke(&[Value::Int(5)]),
        Err(Failure::raise("DivideByZero", "target failed"))
    );
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_void_target_cleans_up_with_original_arguments() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let post = {
        let log = Arc::clone(&log);
        Handle::new("log", sig(Type::Void, &[Type::Int]), move |args| {
            log.lock().unwrap().push(args[0].as_int().unwrap_or_default());
            Ok(Value::Void)
        })
    };
    let target = Handle::new("work", sig(Type::Void, &[Type::Int]), |_| Ok(Value::Void));
    let wrapped = TryFinally::new(post).up(target).unwrap();

    assert_eq!(wrapped.invoke(&[Value::Int(7)]), Ok(Value::Void));
    assert_eq!(*log.lock().unwrap(), vec![7]);
}

#[rstest]
#[case::success(false)]
#[case::failure(true)]
fn test_post_sees_only_original_arguments(#[case] fail: bool) {
    let (post, calls) = recording_post(&[Type::Int, Type::Str]);
    let target = Handle::new("target", sig(Type::Str, &[Type::Int, Type::Str]), move |args| {
        if fail {
            Err(Failure::raise("Boom", "bang"))
        } else {
            Ok(Value::from(format!("{}!", args[1].as_str().unwrap_or_default())))
        }
    });
    let wrapped = TryFinally::new(post).up(target).unwrap();
    let outcome = wrapped.invoke(&[Value::Int(1), Value::from("hi")]);

    if fail {
        assert_eq!(outcome, Err(Failure::raise("Boom", "bang")));
    } else {
        assert_eq!(outcome, Ok(Value::from("hi!")));
    }
    // Exactly one call, with neither the return value nor the failure in it.
    assert_eq!(*calls.lock().unwrap(), vec![vec![Value::Int(1), Value::from("hi")]]);
}

#[test]
fn test_cleanup_never_runs_twice_across_invocations() {
    let (post, count) = counting_post(&[Type::Int]);
    let target = Handle::new("odd_fails", sig(Type::Int, &[Type::Int]), |args| {
        let n = args[0].as_int().unwrap_or_default();
        if n % 2 == 1 {
            Err(Failure::raise("Odd", "odd input"))
        } else {
            Ok(Value::Int(n / 2))
        }
    });
    let wrapped = TryFinally::new(post).up(target).unwrap();

    for n in 0..10 {
        let _ = wrapped.invoke(&[Value::Int(n)]);
        assert_eq!(count.load(Ordering::SeqCst), n as usize + 1);
    }
}

#[test]
fn test_post_failure_masks_original_failure() {
    let post = Handle::new("post", sig(Type::Void, &[Type::Int]), |_| {
        Err(Failure::raise("CleanupFailed", "could not close"))
    });
    let wrapped = TryFinally::new(post).up(always_fails("DivideByZero")).unwrap();

    // The original DivideByZero is lost.
    assert_eq!(
        wrapped.invoke(&[Value::Int(5)]),
        Err(Failure::raise("CleanupFailed", "could not close"))
    );
}

#[test]
fn test_post_failure_replaces_success_value() {
    let post = Handle::new("post", sig(Type::Void, &[Type::Int]), |_| {
        Err(Failure::raise("CleanupFailed", "could not close"))
    });
    let wrapped = TryFinally::new(post).up(add_one()).unwrap();
    assert_eq!(
        wrapped.invoke(&[Value::Int(5)]),
        Err(Failure::raise("CleanupFailed", "could not close"))
    );
}

#[test]
fn test_unguarded_failure_skips_cleanup() {
    let (post, count) = counting_post(&[Type::Int]);
    let tf = TryFinally::with_guard(post, Guard::kinds(["Io"]));

    let wrapped = tf.up(always_fails("DivideByZero")).unwrap();
    assert_eq!(
        wrapped.invoke(&[Value::Int(5)]),
        Err(Failure::raise("DivideByZero", "target failed"))
    );
    assert_eq!(count.load(Ordering::SeqCst), 0);

    let wrapped = tf.up(always_fails("Io")).unwrap();
    assert_eq!(wrapped.invoke(&[Value::Int(5)]), Err(Failure::raise("Io", "target failed")));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_bad_arguments_are_rejected_before_target_or_cleanup() {
    let (post, count) = counting_post(&[Type::Int]);
    let wrapped = TryFinally::new(post).up(add_one()).unwrap();

    assert_eq!(
        wrapped.invoke(&[Value::from("five")]),
        Err(Failure::ArgumentType { position: 0, expected: Type::Int, actual: Type::Str })
    );
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_nested_try_finally_runs_inner_cleanup_first() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let named_post = |name: &'static str| {
        let order = Arc::clone(&order);
        Handle::new(name, sig(Type::Void, &[Type::Int]), move |_| {
            order.lock().unwrap().push(name);
            Ok(Value::Void)
        })
    };
    let inner = TryFinally::new(named_post("inner")).up(always_fails("Boom")).unwrap();
    let outer = TryFinally::new(named_post("outer")).up(inner).unwrap();

    assert_eq!(outer.invoke(&[Value::Int(0)]), Err(Failure::raise("Boom", "target failed")));
    assert_eq!(*order.lock().unwrap(), vec!["inner", "outer"]);
}

#[test]
fn test_parallel_invocations_share_post() {
    let (post, count) = counting_post(&[Type::Int]);
    let target = Handle::new("half", sig(Type::Int, &[Type::Int]), |args| {
        let n = args[0].as_int().unwrap_or_default();
        if n % 3 == 0 {
            Err(Failure::raise("Fizz", "multiple of three"))
        } else {
            Ok(Value::Int(n * 2))
        }
    });
    let wrapped = TryFinally::new(post).up(target).unwrap();

    let batch: Vec<Args> = (1..=300).map(|n| smallvec![Value::Int(n)]).collect();
    let results = wrapped.invoke_all(&batch);

    assert_eq!(count.load(Ordering::SeqCst), 300);
    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 100);
    assert_eq!(results[0], Ok(Value::Int(2)));
    assert_eq!(results[2], Err(Failure::raise("Fizz", "multiple of three")));
}
