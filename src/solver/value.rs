use serde::{Deserialize, Serialize};

/// The base trait for any value that can live in a variable's domain.
///
/// A value must be cloneable, debuggable, equatable, and hashable. This is a
/// marker trait, so any type that satisfies these bounds implements
/// `DomainValue` automatically.
pub trait DomainValue: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> DomainValue for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}

/// A concrete enum providing standard, reusable value types.
///
/// Problem frontends can use `StandardValue` directly (colours as small
/// integers, labels as strings) or define their own [`DomainValue`] type when
/// the extra structure is worth it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardValue {
    /// A 64-bit integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
    /// A string label.
    Str(String),
}

impl StandardValue {
    /// Renders the value without the enum wrapper, for solution reporting.
    pub fn display(&self) -> String {
        match self {
            StandardValue::Int(i) => i.to_string(),
            StandardValue::Bool(b) => b.to_string(),
            StandardValue::Str(s) => s.clone(),
        }
    }
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

impl From<&str> for StandardValue {
    fn from(v: &str) -> Self {
        StandardValue::Str(v.to_string())
    }
}
