//! Types, values and signatures: the static and dynamic vocabulary of handles.
pub mod signature;
pub mod ty;
pub mod value;

pub use signature::Signature;
pub use ty::Type;
pub use value::{Args, Value};
