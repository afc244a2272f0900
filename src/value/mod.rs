//! The in-memory JSON tree.
//!
//! A [`Value`] is a closed tagged union. Null, booleans and numbers are
//! stored inline. Strings, arrays and objects live in a reference-counted
//! heap block.
//!
//! # Sharing
//!
//! Cloning a string/array/object value does **not** copy its payload: the
//! clone aliases the same block, and mutation through one handle is visible
//! through every other. There is no copy-on-write.
//!
//! ```
//! use evjson::{Value, ValueType};
//!
//! let a = Value::new(ValueType::Array);
//! let b = a.clone();
//! b.add_value(1);
//! assert_eq!(a.size(), 1);
//! assert!(a.ptr_eq(&b));
//! ```
//!
//! Two kinds of mutation follow from that:
//!
//! - Methods taking `&mut self` (`set_*`, [`Value::take`]) replace what this
//!   handle holds. Other handles keep the old block.
//! - Methods taking `&self` that mutate (`add_value`, `add_member`, the
//!   `*_mut` accessors) write into the shared block.
//!
//! The block is guarded by a lock so that handles may be cloned and dropped
//! from any thread. Concurrent mutation of one tree is not a supported use,
//! and holding a read guard from [`Value::get_array`] or
//! [`Value::get_object`] while mutating the same container deadlocks.
//!
//! # Access tiers
//!
//! `get_*` accessors require the caller to know the active kind and panic
//! with a contract violation otherwise. `as_*` accessors return `Option`.

mod kind;
mod member;

pub use kind::ValueType;
pub use member::Member;

use std::fmt;
use std::sync::Arc;

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use crate::error::contract_violation;
use crate::handler::Handler;
use crate::stream::StringWriteStream;
use crate::writer::Writer;

/// Reference-counted payload block.
pub type Shared<T> = Arc<RwLock<T>>;

/// A JSON value.
#[derive(Clone, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` / `false`
    Bool(bool),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// Double, including `NaN` and the infinities
    Double(f64),
    /// Shared UTF-8 text
    String(Shared<String>),
    /// Shared ordered elements
    Array(Shared<Vec<Value>>),
    /// Shared ordered members, in insertion order
    Object(Shared<Vec<Member>>),
}

fn shared<T>(data: T) -> Shared<T> {
    Arc::new(RwLock::new(data))
}

impl Value {
    /// The empty value of a kind: `null`, `false`, `0`, `0.0`, `""`, `[]` or `{}`.
    pub fn new(ty: ValueType) -> Self {
        match ty {
            ValueType::Null => Value::Null,
            ValueType::Bool => Value::Bool(false),
            ValueType::Int32 => Value::Int32(0),
            ValueType::Int64 => Value::Int64(0),
            ValueType::Double => Value::Double(0.0),
            ValueType::String => Value::String(shared(String::new())),
            ValueType::Array => Value::Array(shared(Vec::new())),
            ValueType::Object => Value::Object(shared(Vec::new())),
        }
    }

    /// Kind of the active payload.
    pub fn get_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Element count of an array, member count of an object, 1 otherwise.
    pub fn size(&self) -> usize {
        match self {
            Value::Array(a) => a.read().len(),
            Value::Object(o) => o.read().len(),
            _ => 1,
        }
    }

    /// Returns true if both handles alias the same heap block.
    ///
    /// Always false for inline kinds.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Move the payload out, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Returns true for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true for an int32.
    pub fn is_int32(&self) -> bool {
        matches!(self, Value::Int32(_))
    }

    /// Int32 counts as Int64 (widening view).
    pub fn is_int64(&self) -> bool {
        matches!(self, Value::Int32(_) | Value::Int64(_))
    }

    /// Returns true for a double.
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns true for a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true for an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true for an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[track_caller]
    fn wrong_kind(&self, expected: &str) -> ! {
        contract_violation(&format!(
            "expected {expected}, value is {}",
            self.get_type()
        ))
    }

    /// Boolean payload. Panics unless the value is a bool.
    #[track_caller]
    pub fn get_bool(&self) -> bool {
        self.as_bool().unwrap_or_else(|| self.wrong_kind("bool"))
    }

    /// Int32 payload. Panics unless the value is an int32.
    #[track_caller]
    pub fn get_int32(&self) -> i32 {
        self.as_i32().unwrap_or_else(|| self.wrong_kind("int32"))
    }

    /// Integer payload, widened. Panics unless the value is an int32/int64.
    #[track_caller]
    pub fn get_int64(&self) -> i64 {
        self.as_i64().unwrap_or_else(|| self.wrong_kind("int64"))
    }

    /// Double payload. Panics unless the value is a double.
    #[track_caller]
    pub fn get_double(&self) -> f64 {
        self.as_f64().unwrap_or_else(|| self.wrong_kind("double"))
    }

    /// Borrow the text. Panics unless the value is a string.
    #[track_caller]
    pub fn get_str(&self) -> MappedRwLockReadGuard<'_, str> {
        match self.as_str() {
            Some(s) => s,
            None => self.wrong_kind("string"),
        }
    }

    /// Copy of the text. Panics unless the value is a string.
    #[track_caller]
    pub fn get_string(&self) -> String {
        self.get_str().to_owned()
    }

    /// Borrow the elements. Panics unless the value is an array.
    #[track_caller]
    pub fn get_array(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        match self.as_array() {
            Some(a) => a,
            None => self.wrong_kind("array"),
        }
    }

    /// Mutably borrow the shared elements. Panics unless the value is an array.
    #[track_caller]
    pub fn get_array_mut(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        match self {
            Value::Array(a) => a.write(),
            _ => self.wrong_kind("array"),
        }
    }

    /// Borrow the members. Panics unless the value is an object.
    #[track_caller]
    pub fn get_object(&self) -> RwLockReadGuard<'_, Vec<Member>> {
        match self.as_object() {
            Some(o) => o,
            None => self.wrong_kind("object"),
        }
    }

    /// Mutably borrow the shared members. Panics unless the value is an object.
    ///
    /// Writing through this guard bypasses the duplicate-key check.
    #[track_caller]
    pub fn get_object_mut(&self) -> RwLockWriteGuard<'_, Vec<Member>> {
        match self {
            Value::Object(o) => o.write(),
            _ => self.wrong_kind("object"),
        }
    }

    /// Boolean payload, if the value is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Int32 payload, if the value is an int32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Integer payload widened to i64, if the value is an int32 or int64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Double payload, if the value is a double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Borrowed text, if the value is a string.
    pub fn as_str(&self) -> Option<MappedRwLockReadGuard<'_, str>> {
        match self {
            Value::String(s) => Some(RwLockReadGuard::map(s.read(), String::as_str)),
            _ => None,
        }
    }

    /// Borrowed elements, if the value is an array.
    pub fn as_array(&self) -> Option<RwLockReadGuard<'_, Vec<Value>>> {
        match self {
            Value::Array(a) => Some(a.read()),
            _ => None,
        }
    }

    /// Borrowed members, if the value is an object.
    pub fn as_object(&self) -> Option<RwLockReadGuard<'_, Vec<Member>>> {
        match self {
            Value::Object(o) => Some(o.read()),
            _ => None,
        }
    }

    /// Replace with `null`.
    pub fn set_null(&mut self) -> &mut Self {
        *self = Value::Null;
        self
    }

    /// Replace with a boolean.
    pub fn set_bool(&mut self, b: bool) -> &mut Self {
        *self = Value::Bool(b);
        self
    }

    /// Replace with an int32.
    pub fn set_int32(&mut self, i: i32) -> &mut Self {
        *self = Value::Int32(i);
        self
    }

    /// Replace with an int64.
    pub fn set_int64(&mut self, i: i64) -> &mut Self {
        *self = Value::Int64(i);
        self
    }

    /// Replace with a double.
    pub fn set_double(&mut self, d: f64) -> &mut Self {
        *self = Value::Double(d);
        self
    }

    /// Replace with a fresh copy of `s`.
    pub fn set_string(&mut self, s: &str) -> &mut Self {
        *self = Value::from(s);
        self
    }

    /// Replace with a fresh empty array.
    pub fn set_array(&mut self) -> &mut Self {
        *self = Value::new(ValueType::Array);
        self
    }

    /// Replace with a fresh empty object.
    pub fn set_object(&mut self) -> &mut Self {
        *self = Value::new(ValueType::Object);
        self
    }

    /// Append an element to the shared array. Panics unless the value is an array.
    #[track_caller]
    pub fn add_value(&self, value: impl Into<Value>) {
        self.get_array_mut().push(value.into());
    }

    /// Append a member to the shared object.
    ///
    /// Panics unless the value is an object, `key` is a string, and no
    /// member with that key exists yet.
    #[track_caller]
    pub fn add_member(&self, key: impl Into<Value>, value: impl Into<Value>) {
        let member = Member::new(key, value);
        let mut members = self.get_object_mut();
        let key = member.key.get_str();
        if members.iter().any(|m| m.has_key(&key)) {
            contract_violation(&format!("duplicate object key {:?}", &*key));
        }
        drop(key);
        members.push(member);
    }

    /// Append a member without the duplicate-key scan. The caller keeps
    /// keys unique.
    pub(crate) fn push_member(&self, member: Member) {
        self.get_object_mut().push(member);
    }

    /// Position of the member named `key`. Panics unless the value is an object.
    #[track_caller]
    pub fn find_member(&self, key: &str) -> Option<usize> {
        self.get_object().iter().position(|m| m.has_key(key))
    }

    /// Handle to the member named `key`, if this is an object that has one.
    ///
    /// The handle aliases shared payloads; scalars are copied.
    pub fn get(&self, key: &str) -> Option<Value> {
        let members = self.as_object()?;
        members.iter().find(|m| m.has_key(key)).map(|m| m.value.clone())
    }

    /// Handle to the member named `key`. The key must be present.
    #[track_caller]
    pub fn member(&self, key: &str) -> Value {
        match self.get_object().iter().find(|m| m.has_key(key)) {
            Some(m) => m.value.clone(),
            None => contract_violation(&format!("missing object key {key:?}")),
        }
    }

    /// In-place access to the member named `key`, if present.
    pub fn get_mut(&self, key: &str) -> Option<MappedRwLockWriteGuard<'_, Value>> {
        match self {
            Value::Object(o) => RwLockWriteGuard::try_map(o.write(), |members| {
                members
                    .iter_mut()
                    .find(|m| m.has_key(key))
                    .map(|m| &mut m.value)
            })
            .ok(),
            _ => None,
        }
    }

    /// In-place access to the member named `key`. The key must be present.
    #[track_caller]
    pub fn member_mut(&self, key: &str) -> MappedRwLockWriteGuard<'_, Value> {
        if !self.is_object() {
            self.wrong_kind("object");
        }
        match self.get_mut(key) {
            Some(v) => v,
            None => contract_violation(&format!("missing object key {key:?}")),
        }
    }

    /// Handle to element `index`, if this is an array that long.
    pub fn get_index(&self, index: usize) -> Option<Value> {
        self.as_array()?.get(index).cloned()
    }

    /// Handle to element `index`. The index must be in bounds.
    #[track_caller]
    pub fn at(&self, index: usize) -> Value {
        match self.get_array().get(index) {
            Some(v) => v.clone(),
            None => contract_violation(&format!("array index {index} out of bounds")),
        }
    }

    /// In-place access to element `index`. The index must be in bounds.
    #[track_caller]
    pub fn at_mut(&self, index: usize) -> MappedRwLockWriteGuard<'_, Value> {
        match RwLockWriteGuard::try_map(self.get_array_mut(), |a| a.get_mut(index)) {
            Ok(v) => v,
            Err(_) => contract_violation(&format!("array index {index} out of bounds")),
        }
    }

    /// Replay this tree into `handler` as the event sequence a parse of its
    /// text would produce. Returns false as soon as the handler does.
    pub fn write_to<H: Handler + ?Sized>(&self, handler: &mut H) -> bool {
        match self {
            Value::Null => handler.null(),
            Value::Bool(b) => handler.bool(*b),
            Value::Int32(i) => handler.int32(*i),
            Value::Int64(i) => handler.int64(*i),
            Value::Double(d) => handler.double(*d),
            Value::String(s) => handler.string(&s.read()),
            Value::Array(a) => {
                if !handler.start_array() {
                    return false;
                }
                for value in a.read().iter() {
                    if !value.write_to(handler) {
                        return false;
                    }
                }
                handler.end_array()
            }
            Value::Object(o) => {
                if !handler.start_object() {
                    return false;
                }
                for member in o.read().iter() {
                    if !handler.key(&member.key.get_str()) || !member.value.write_to(handler) {
                        return false;
                    }
                }
                handler.end_object()
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int32(i) => write!(f, "Int32({i})"),
            Value::Int64(i) => write!(f, "Int64({i})"),
            Value::Double(d) => write!(f, "Double({d:?})"),
            Value::String(s) => fmt::Debug::fmt(s.read().as_str(), f),
            Value::Array(a) => f.debug_list().entries(a.read().iter()).finish(),
            Value::Object(o) => f
                .debug_map()
                .entries(o.read().iter().map(|m| (&m.key, &m.value)))
                .finish(),
        }
    }
}

/// Compact JSON text, as produced by [`Writer`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new(StringWriteStream::new());
        self.write_to(&mut writer);
        f.write_str(writer.into_inner().as_str())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(shared(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(shared(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(shared(values))
    }
}
