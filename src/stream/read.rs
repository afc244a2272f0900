//! Byte cursors over fully buffered input.

use std::io::{self, Read};

use crate::error::contract_violation;

/// Sequential one-byte-lookahead reader consumed by the parser.
pub trait ReadStream {
    /// Returns true while unread input remains.
    fn has_next(&self) -> bool;

    /// Current byte without consuming it; `0` once exhausted.
    fn peek(&self) -> u8;

    /// Consume and return the current byte; `0` once exhausted.
    fn next(&mut self) -> u8;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Consume a byte the caller already knows is `expected`.
    #[track_caller]
    fn assert_next(&mut self, expected: u8) {
        let ch = self.next();
        if ch != expected {
            contract_violation("assert_next saw an unexpected byte");
        }
    }
}

/// Cursor over an in-memory string.
#[derive(Debug, Clone)]
pub struct StringReadStream<'a> {
    json: &'a [u8],
    pos: usize,
}

impl<'a> StringReadStream<'a> {
    /// Create a cursor at the start of `json`.
    pub fn new(json: &'a str) -> Self {
        Self {
            json: json.as_bytes(),
            pos: 0,
        }
    }
}

impl ReadStream for StringReadStream<'_> {
    fn has_next(&self) -> bool {
        self.pos < self.json.len()
    }

    fn peek(&self) -> u8 {
        self.json.get(self.pos).copied().unwrap_or(0)
    }

    fn next(&mut self) -> u8 {
        match self.json.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b
            }
            None => 0,
        }
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Cursor over the whole contents of a reader, loaded up front.
#[derive(Debug, Clone)]
pub struct FileReadStream {
    buf: String,
    pos: usize,
}

impl FileReadStream {
    /// Read `input` to the end and validate it as UTF-8.
    pub fn new<R: Read>(mut input: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let buf = String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self { buf, pos: 0 })
    }
}

impl ReadStream for FileReadStream {
    fn has_next(&self) -> bool {
        self.pos < self.buf.len()
    }

    fn peek(&self) -> u8 {
        self.buf.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    fn next(&mut self) -> u8 {
        match self.buf.as_bytes().get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b
            }
            None => 0,
        }
    }

    fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_stream_walk() {
        let mut is = StringReadStream::new("ab");
        assert!(is.has_next());
        assert_eq!(is.peek(), b'a');
        assert_eq!(is.next(), b'a');
        assert_eq!(is.position(), 1);
        is.assert_next(b'b');
        assert!(!is.has_next());
        assert_eq!(is.peek(), 0);
        assert_eq!(is.next(), 0);
        assert_eq!(is.position(), 2);
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn test_assert_next_mismatch() {
        let mut is = StringReadStream::new("x");
        is.assert_next(b'y');
    }

    #[test]
    fn test_file_stream_buffers_reader() {
        let mut is = FileReadStream::new(&b"[1]"[..]).unwrap();
        assert_eq!(is.next(), b'[');
        assert_eq!(is.peek(), b'1');
        is.next();
        is.next();
        assert!(!is.has_next());
        assert_eq!(is.position(), 3);
    }

    #[test]
    fn test_file_stream_rejects_invalid_utf8() {
        let err = FileReadStream::new(&[b'"', 0xFF, 0xFE, b'"'][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
