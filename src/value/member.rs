//! Object members.

use super::{Value, ValueType};
use crate::error::contract_violation;

/// One key/value pair of an object. The key is always a string value.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Member key, of kind [`ValueType::String`].
    pub key: Value,
    /// Member value.
    pub value: Value,
}

impl Member {
    /// Pair `key` with `value`. Panics if `key` is not a string.
    #[track_caller]
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key.get_type() != ValueType::String {
            contract_violation("object member key must be a string");
        }
        Self {
            key,
            value: value.into(),
        }
    }

    /// Returns true if this member's key equals `key`.
    pub fn has_key(&self, key: &str) -> bool {
        match &self.key {
            Value::String(s) => s.read().as_str() == key,
            _ => false,
        }
    }
}
