//! Tree building from parse events.
//!
//! [`Document`] is a [`Handler`] that folds the event stream into a
//! [`Value`] using an explicit stack of open containers. Once a parse
//! returns, the build state is gone and the document is an ordinary value
//! (it dereferences to its root).
//!
//! ```
//! use evjson::Document;
//!
//! let mut doc = Document::new();
//! doc.parse(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
//! assert_eq!(doc.member("b").size(), 3);
//! assert_eq!(doc.to_string(), r#"{"a":1,"b":[1,2,3]}"#);
//! ```

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::error::{contract_violation, ParseResult};
use crate::handler::Handler;
use crate::reader::{Limits, Reader};
use crate::stream::{ReadStream, StringReadStream};
use crate::value::{Member, Value, ValueType};

/// An open container and how many values it has received.
///
/// For objects keys count too, so an even count means a key comes next.
/// `keys` maps each member key of an open object to its position.
#[derive(Debug)]
struct Level {
    container: Value,
    value_count: usize,
    keys: HashMap<String, usize>,
}

/// A parsed JSON document.
#[derive(Debug, Default)]
pub struct Document {
    root: Value,
    stack: Vec<Level>,
    key: Option<Value>,
    seen_value: bool,
}

impl Document {
    /// An empty document with a `null` root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `json`, replacing the current root.
    pub fn parse(&mut self, json: &str) -> ParseResult<()> {
        let mut is = StringReadStream::new(json);
        self.parse_stream(&mut is)
    }

    /// Parse from any byte cursor, replacing the current root.
    pub fn parse_stream<R: ReadStream>(&mut self, is: &mut R) -> ParseResult<()> {
        self.parse_with_limits(is, Limits::default())
    }

    /// Parse with custom limits.
    ///
    /// On failure the root is reset to `null`; no partial tree is exposed.
    pub fn parse_with_limits<R: ReadStream>(
        &mut self,
        is: &mut R,
        limits: Limits,
    ) -> ParseResult<()> {
        self.root = Value::Null;
        self.seen_value = false;
        let result = Reader::parse_with_limits(is, self, limits);
        if result.is_err() {
            self.root = Value::Null;
        }
        self.stack.clear();
        self.key = None;
        result
    }

    /// The root value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consume the document and return its root.
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Place `value` according to the innermost open container.
    #[track_caller]
    fn place(&mut self, value: Value) {
        let Some(top) = self.stack.last_mut() else {
            if self.seen_value {
                contract_violation("document root not singular");
            }
            self.seen_value = true;
            self.root = value;
            return;
        };

        match top.container.get_type() {
            ValueType::Array => top.container.add_value(value),
            ValueType::Object if top.value_count % 2 == 0 => {
                if !value.is_string() {
                    contract_violation("object key must be a string");
                }
                self.key = Some(value);
            }
            ValueType::Object => {
                let Some(key) = self.key.take() else {
                    contract_violation("object value without a pending key");
                };
                let name = key.get_string();
                let existing = top.keys.get(&name).copied();
                match existing {
                    Some(index) => {
                        tracing::trace!(key = %name, "duplicate object key replaced");
                        top.container.get_object_mut()[index].value = value;
                    }
                    None => {
                        top.keys.insert(name, top.keys.len());
                        top.container.push_member(Member { key, value });
                    }
                }
            }
            other => contract_violation(&format!("open container is {other}")),
        }
        top.value_count += 1;
    }

    fn open(&mut self, container: Value) {
        self.place(container.clone());
        self.stack.push(Level {
            container,
            value_count: 0,
            keys: HashMap::new(),
        });
    }

    #[track_caller]
    fn close(&mut self, ty: ValueType) {
        match self.stack.pop() {
            Some(level) if level.container.get_type() == ty => {}
            Some(level) => contract_violation(&format!(
                "closing {ty}, open container is {}",
                level.container.get_type()
            )),
            None => contract_violation("close without open container"),
        }
    }
}

impl Handler for Document {
    fn null(&mut self) -> bool {
        self.place(Value::Null);
        true
    }

    fn bool(&mut self, b: bool) -> bool {
        self.place(Value::Bool(b));
        true
    }

    fn int32(&mut self, i: i32) -> bool {
        self.place(Value::Int32(i));
        true
    }

    fn int64(&mut self, i: i64) -> bool {
        self.place(Value::Int64(i));
        true
    }

    fn double(&mut self, d: f64) -> bool {
        self.place(Value::Double(d));
        true
    }

    fn string(&mut self, s: &str) -> bool {
        self.place(Value::from(s));
        true
    }

    fn start_object(&mut self) -> bool {
        self.open(Value::new(ValueType::Object));
        true
    }

    fn key(&mut self, s: &str) -> bool {
        self.place(Value::from(s));
        true
    }

    fn end_object(&mut self) -> bool {
        self.close(ValueType::Object);
        true
    }

    fn start_array(&mut self) -> bool {
        self.open(Value::new(ValueType::Array));
        true
    }

    fn end_array(&mut self) -> bool {
        self.close(ValueType::Array);
        true
    }
}

impl Deref for Document {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.root
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}
