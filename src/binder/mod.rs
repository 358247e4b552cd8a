//! The composition layer: a fluent binder for reshaping argument lists, plus
//! the catch and fold combinators that transforms build on.
pub mod builder;
pub mod combinators;
pub mod error;

pub use builder::Binder;
pub use combinators::{catch_failure, fold_arguments};
pub use error::BindError;
