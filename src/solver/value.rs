use serde::{Deserialize, Serialize};

/// The base trait for any value that can be used in a variable's domain.
///
/// This trait establishes the minimum requirements for a value: it must be
/// cloneable, debuggable, equatable, and hashable. This is a marker trait,
/// so any type that satisfies these bounds implements `ValueEquality`.
pub trait ValueEquality: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> ValueEquality for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}

/// A concrete enum providing a standard, reusable value type.
///
/// Problem-specific value types can wrap or compose `StandardValue` to model
/// integer- or boolean-valued variables without defining their own type. Any
/// type satisfying [`ValueEquality`] works equally well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardValue {
    /// A 64-bit integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl From<i64> for StandardValue {
    fn from(v: i64) -> Self {
        StandardValue::Int(v)
    }
}

impl From<bool> for StandardValue {
    fn from(v: bool) -> Self {
        StandardValue::Bool(v)
    }
}

impl std::fmt::Display for StandardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandardValue::Int(i) => write!(f, "{i}"),
            StandardValue::Bool(b) => write!(f, "{b}"),
        }
    }
}
