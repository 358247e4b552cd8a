//! The dynamic type lattice used by signatures and values.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a parameter, a return slot, or a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// No value. Only meaningful as a return type.
    Void,
    Bool,
    Int,
    Float,
    Str,
    /// A captured failure carried as an ordinary argument (the "throwable" slot).
    Failure,
    /// Accepts any non-void value.
    Any,
}

impl Type {
    /// Assignability: can a value of type `other` flow into a slot of this type?
    pub fn accepts(&self, other: &Type) -> bool {
        match self {
            Type::Any => *other != Type::Void,
            _ => self == other,
        }
    }

    pub fn is_void(&self) -> bool {
        *self == Type::Void
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Void => "void",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Str => "str",
            Type::Failure => "failure",
            Type::Any => "any",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Type::Int, Type::Int, true)]
    #[case(Type::Int, Type::Float, false)]
    #[case(Type::Any, Type::Str, true)]
    #[case(Type::Any, Type::Failure, true)]
    #[case(Type::Any, Type::Void, false)] // Void carries nothing to assign
    #[case(Type::Str, Type::Any, false)]
    #[case(Type::Void, Type::Void, true)]
    fn test_assignability(#[case] slot: Type, #[case] value: Type, #[case] expected: bool) {
        assert_eq!(slot.accepts(&value), expected);
    }
}
