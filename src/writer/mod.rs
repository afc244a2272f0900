//! Compact JSON text output.
//!
//! [`Writer`] is a [`Handler`]: feed it parser events for streaming
//! re-serialization, or replay a tree through
//! [`Value::write_to`](crate::Value::write_to). Output has no insignificant
//! whitespace.

pub mod number;

use crate::error::contract_violation;
use crate::handler::Handler;
use crate::stream::WriteStream;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// An open container.
#[derive(Debug, Clone, Copy)]
struct Level {
    in_array: bool,
    value_count: usize,
}

/// Event-driven serializer onto a [`WriteStream`].
///
/// Events must describe one well-formed value. Misuse such as a second
/// root value, a non-string in key position or a mismatched close is a
/// contract violation and panics.
#[derive(Debug)]
pub struct Writer<W: WriteStream> {
    os: W,
    stack: Vec<Level>,
    seen_value: bool,
}

impl<W: WriteStream> Writer<W> {
    /// Create a writer appending to `os`.
    pub fn new(os: W) -> Self {
        Self {
            os,
            stack: Vec::new(),
            seen_value: false,
        }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.os
    }

    /// Emit the separator owed before the next value, and account for it.
    #[track_caller]
    fn prefix(&mut self, is_string: bool) {
        let Some(top) = self.stack.last_mut() else {
            if self.seen_value {
                contract_violation("writer root not singular");
            }
            self.seen_value = true;
            return;
        };

        if top.in_array {
            if top.value_count > 0 {
                self.os.put(',');
            }
        } else if top.value_count % 2 == 0 {
            if !is_string {
                contract_violation("object key must be a string");
            }
            if top.value_count > 0 {
                self.os.put(',');
            }
        } else {
            self.os.put(':');
        }
        top.value_count += 1;
    }

    #[track_caller]
    fn close(&mut self, in_array: bool) {
        match self.stack.pop() {
            Some(level) if level.in_array == in_array => {}
            Some(_) => contract_violation("writer container close does not match open"),
            None => contract_violation("writer close without open container"),
        }
    }

    fn write_string(&mut self, s: &str) {
        self.os.put('"');
        let mut start = 0;
        for (i, b) in s.bytes().enumerate() {
            let short = match b {
                b'"' => "\\\"",
                b'\\' => "\\\\",
                0x08 => "\\b",
                0x0C => "\\f",
                b'\n' => "\\n",
                b'\r' => "\\r",
                b'\t' => "\\t",
                0x00..=0x1F => "",
                _ => continue,
            };
            self.os.put_str(&s[start..i]);
            start = i + 1;
            if short.is_empty() {
                self.os.put_str("\\u00");
                self.os.put(char::from(HEX_DIGITS[usize::from(b >> 4)]));
                self.os.put(char::from(HEX_DIGITS[usize::from(b & 0xF)]));
            } else {
                self.os.put_str(short);
            }
        }
        self.os.put_str(&s[start..]);
        self.os.put('"');
    }
}

impl<W: WriteStream> Handler for Writer<W> {
    fn null(&mut self) -> bool {
        self.prefix(false);
        self.os.put_str("null");
        true
    }

    fn bool(&mut self, b: bool) -> bool {
        self.prefix(false);
        self.os.put_str(if b { "true" } else { "false" });
        true
    }

    fn int32(&mut self, i: i32) -> bool {
        self.prefix(false);
        number::write_i32(&mut self.os, i);
        true
    }

    fn int64(&mut self, i: i64) -> bool {
        self.prefix(false);
        number::write_i64(&mut self.os, i);
        true
    }

    fn double(&mut self, d: f64) -> bool {
        self.prefix(false);
        number::write_f64(&mut self.os, d);
        true
    }

    fn string(&mut self, s: &str) -> bool {
        self.prefix(true);
        self.write_string(s);
        true
    }

    fn start_object(&mut self) -> bool {
        self.prefix(false);
        self.stack.push(Level {
            in_array: false,
            value_count: 0,
        });
        self.os.put('{');
        true
    }

    fn key(&mut self, s: &str) -> bool {
        self.string(s)
    }

    fn end_object(&mut self) -> bool {
        self.close(false);
        self.os.put('}');
        true
    }

    fn start_array(&mut self) -> bool {
        self.prefix(false);
        self.stack.push(Level {
            in_array: true,
            value_count: 0,
        });
        self.os.put('[');
        true
    }

    fn end_array(&mut self) -> bool {
        self.close(true);
        self.os.put(']');
        true
    }
}
