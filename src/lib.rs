//! Signature-checked combinators over dynamically-typed handles.
//!
//! A [`Handle`] is a shared callable carrying its [`Signature`]. A [`Binder`]
//! reshapes argument lists (drop, insert, fold) before a terminal handle,
//! checking every step at composition time. [`Transform`]s such as
//! [`TryFinally`] wrap whole handles with extra behavior while keeping, or
//! deliberately changing, their call contract.
//!
//! ```
//! use invokebinder_core::{Handle, Signature, Transform, TryFinally, Type, Value};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let closed = Arc::new(AtomicUsize::new(0));
//! let post = {
//!     let closed = Arc::clone(&closed);
//!     Handle::new("close", Signature::new(Type::Void, vec![Type::Int]), move |_| {
//!         closed.fetch_add(1, Ordering::SeqCst);
//!         Ok(Value::Void)
//!     })
//! };
//! let add_one = Handle::new("add_one", Signature::new(Type::Int, vec![Type::Int]), |args| {
//!     Ok(Value::Int(args[0].as_int().unwrap_or_default() + 1))
//! });
//!
//! let wrapped = TryFinally::new(post).up(add_one)?;
//! assert_eq!(wrapped.invoke(&[Value::Int(5)]), Ok(Value::Int(6)));
//! assert_eq!(closed.load(Ordering::SeqCst), 1);
//! # Ok::<(), invokebinder_core::BindError>(())
//! ```

pub mod binder;
pub mod handle;
pub mod transform;
pub mod types;

pub use binder::{BindError, Binder};
pub use handle::{Failure, Guard, Handle};
pub use transform::{ChainError, Transform, TransformChain, TryFinally};
pub use types::{Args, Signature, Type, Value};
