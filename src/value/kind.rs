//! Value type tags.

use std::fmt;

/// The kind of payload a [`Value`](super::Value) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// `null`
    #[default]
    Null,
    /// `true` / `false`
    Bool,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// IEEE-754 double, including `NaN` and the infinities
    Double,
    /// UTF-8 text
    String,
    /// Ordered sequence of values
    Array,
    /// Ordered sequence of key/value members
    Object,
}

impl ValueType {
    /// Returns the type name as a string for error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
