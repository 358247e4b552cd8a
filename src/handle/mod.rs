//! Invocable units, the failures they raise, and the guards that catch them.
pub mod failure;
pub mod guard;
pub mod unit;

pub use failure::Failure;
pub use guard::Guard;
pub use unit::{Behavior, Handle};
