//! Append-only sinks for the writer.

use std::io::{self, BufWriter, Write};

/// Append-only character sink consumed by the writer.
pub trait WriteStream {
    /// Append a single character.
    fn put(&mut self, ch: char);

    /// Append a string slice.
    fn put_str(&mut self, s: &str);
}

impl<W: WriteStream + ?Sized> WriteStream for &mut W {
    fn put(&mut self, ch: char) {
        (**self).put(ch);
    }

    fn put_str(&mut self, s: &str) {
        (**self).put_str(s);
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default)]
pub struct StringWriteStream {
    buf: String,
}

impl StringWriteStream {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the sink and return its text.
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl WriteStream for StringWriteStream {
    fn put(&mut self, ch: char) {
        self.buf.push(ch);
    }

    fn put_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }
}

/// Buffered sink over any [`io::Write`].
///
/// `put` cannot fail, so the first I/O error is latched and further
/// output is dropped until [`FileWriteStream::finish`] reports it.
#[derive(Debug)]
pub struct FileWriteStream<W: Write> {
    out: BufWriter<W>,
    error: Option<io::Error>,
}

impl<W: Write> FileWriteStream<W> {
    /// Wrap `out` in a buffered sink.
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
            error: None,
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(bytes) {
            self.error = Some(e);
        }
    }

    /// Flush buffered output and return the inner writer, or the first error.
    pub fn finish(self) -> io::Result<W> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> WriteStream for FileWriteStream<W> {
    fn put(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.write_bytes(ch.encode_utf8(&mut tmp).as_bytes());
    }

    fn put_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_sink() {
        let mut os = StringWriteStream::new();
        os.put('[');
        os.put_str("1,2");
        os.put(']');
        assert_eq!(os.as_str(), "[1,2]");
        assert_eq!(os.into_string(), "[1,2]");
    }

    fn emit_null<W: WriteStream>(mut os: W) {
        os.put_str("null");
    }

    #[test]
    fn test_borrowed_sink() {
        let mut os = StringWriteStream::new();
        emit_null(&mut os);
        assert_eq!(os.as_str(), "null");
    }

    #[test]
    fn test_file_sink_flushes() {
        let mut os = FileWriteStream::new(Vec::new());
        os.put_str("{\"a\":");
        os.put('1');
        os.put('}');
        let bytes = os.finish().unwrap();
        assert_eq!(bytes, b"{\"a\":1}");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_file_sink_latches_error() {
        let mut os = FileWriteStream::new(Broken);
        os.put_str(&"x".repeat(16 * 1024));
        assert!(os.finish().is_err());
    }
}
