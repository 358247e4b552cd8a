//! guard.rs
//! Selects which failures a catching combinator intercepts.

use super::failure::Failure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The guarded failure category.
///
/// `All` mirrors catching the broadest failure class. `Kinds` narrows the
/// guard to failures whose `Failure::kind()` is listed; everything else
/// propagates untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guard {
    #[default]
    All,
    Kinds(Vec<String>),
}

impl Guard {
    pub fn kinds<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Guard::Kinds(kinds.into_iter().map(Into::into).collect())
    }

    pub fn catches(&self, failure: &Failure) -> bool {
        match self {
            Guard::All => true,
            Guard::Kinds(kinds) => kinds.iter().any(|k| k == failure.kind()),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::All => f.write_str("all failures"),
            Guard::Kinds(kinds) => f.write_str(&kinds.join("|")),
        }
    }
}
