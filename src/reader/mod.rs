//! Streaming event parser.
//!
//! The reader recognizes JSON plus two extensions, typed integer suffixes
//! (`7i64`, `7i32`) and the `NaN` / `Infinity` / `-Infinity` literals, and
//! reports what it sees to a [`Handler`] as a fixed sequence of events.
//!
//! - [`lexer`] - whitespace, literals, numbers and strings
//! - [`parser`] - the recursive descent grammar
//! - [`limits`] - the nesting bound
//!
//! # Example
//!
//! ```
//! use evjson::{Reader, StringReadStream, StringWriteStream, Writer};
//!
//! let mut is = StringReadStream::new(r#"{ "a" : [1, 2.5, null] }"#);
//! let mut writer = Writer::new(StringWriteStream::new());
//! Reader::parse(&mut is, &mut writer).unwrap();
//! assert_eq!(writer.into_inner().as_str(), r#"{"a":[1,2.5,null]}"#);
//! ```

pub mod lexer;
pub mod limits;
pub mod parser;

pub use limits::Limits;

use crate::error::ParseResult;
use crate::handler::Handler;
use crate::stream::ReadStream;
use parser::Parser;

/// Entry point for event-style parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reader;

impl Reader {
    /// Parse one document from `is`, reporting events to `handler`, with
    /// the default [`Limits`].
    pub fn parse<R: ReadStream, H: Handler>(is: &mut R, handler: &mut H) -> ParseResult<()> {
        Self::parse_with_limits(is, handler, Limits::default())
    }

    /// Parse one document with custom limits.
    ///
    /// This is the only place a parse failure leaves the reader. On error the
    /// handler has seen a prefix of the event stream and should discard it.
    pub fn parse_with_limits<R: ReadStream, H: Handler>(
        is: &mut R,
        handler: &mut H,
        limits: Limits,
    ) -> ParseResult<()> {
        let result = Parser::new(is, handler, limits).parse();
        if let Err(err) = result {
            tracing::debug!(
                code = err.code(),
                error = err.name(),
                offset = is.position(),
                "parse failed"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::stream::StringReadStream;

    /// Records every event as a short string.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        stop_after: Option<usize>,
    }

    impl Recorder {
        fn push(&mut self, event: String) -> bool {
            self.events.push(event);
            self.stop_after.map_or(true, |n| self.events.len() < n)
        }
    }

    impl Handler for Recorder {
        fn null(&mut self) -> bool {
            self.push("null".into())
        }
        fn bool(&mut self, b: bool) -> bool {
            self.push(format!("bool {b}"))
        }
        fn int32(&mut self, i: i32) -> bool {
            self.push(format!("i32 {i}"))
        }
        fn int64(&mut self, i: i64) -> bool {
            self.push(format!("i64 {i}"))
        }
        fn double(&mut self, d: f64) -> bool {
            self.push(format!("f64 {d}"))
        }
        fn string(&mut self, s: &str) -> bool {
            self.push(format!("str {s}"))
        }
        fn start_object(&mut self) -> bool {
            self.push("{".into())
        }
        fn key(&mut self, s: &str) -> bool {
            self.push(format!("key {s}"))
        }
        fn end_object(&mut self) -> bool {
            self.push("}".into())
        }
        fn start_array(&mut self) -> bool {
            self.push("[".into())
        }
        fn end_array(&mut self) -> bool {
            self.push("]".into())
        }
    }

    fn events(input: &str) -> ParseResult<Vec<String>> {
        let mut is = StringReadStream::new(input);
        let mut recorder = Recorder::default();
        Reader::parse(&mut is, &mut recorder)?;
        Ok(recorder.events)
    }

    fn error(input: &str) -> ErrorCode {
        match events(input) {
            Ok(events) => panic!("expected error for {input:?}, got {events:?}"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_scalar_events() {
        assert_eq!(events(" null ").unwrap(), ["null"]);
        assert_eq!(events("true").unwrap(), ["bool true"]);
        assert_eq!(events("false").unwrap(), ["bool false"]);
        assert_eq!(events("42").unwrap(), ["i32 42"]);
        assert_eq!(events("4294967296").unwrap(), ["i64 4294967296"]);
        assert_eq!(events("0.5").unwrap(), ["f64 0.5"]);
        assert_eq!(events(r#""hi""#).unwrap(), ["str hi"]);
    }

    #[test]
    fn test_container_events() {
        assert_eq!(
            events(r#"{"a": [1, {"b": null}], "c": "d"}"#).unwrap(),
            ["{", "key a", "[", "i32 1", "{", "key b", "null", "}", "]", "key c", "str d", "}"]
        );
        assert_eq!(events("[ ]").unwrap(), ["[", "]"]);
        assert_eq!(events("{ }").unwrap(), ["{", "}"]);
    }

    #[test]
    fn test_root_errors() {
        assert_eq!(error(""), ErrorCode::ExpectValue);
        assert_eq!(error("   "), ErrorCode::ExpectValue);
        assert_eq!(error("1 2"), ErrorCode::RootNotSingular);
        assert_eq!(error("nullx"), ErrorCode::RootNotSingular);
        assert_eq!(error("nul"), ErrorCode::BadValue);
        assert_eq!(error("?"), ErrorCode::BadValue);
    }

    #[test]
    fn test_array_errors() {
        assert_eq!(error("[1,2"), ErrorCode::MissCommaOrSquareBracket);
        assert_eq!(error("[1,"), ErrorCode::ExpectValue);
        assert_eq!(error("[1 2]"), ErrorCode::MissCommaOrSquareBracket);
        assert_eq!(error("[1,]"), ErrorCode::BadValue);
    }

    #[test]
    fn test_object_errors() {
        assert_eq!(error(r#"{"a":1,}"#), ErrorCode::MissKey);
        assert_eq!(error("{1:1}"), ErrorCode::MissKey);
        assert_eq!(error(r#"{"a" 1}"#), ErrorCode::MissColon);
        assert_eq!(error(r#"{"a":1 "b":2}"#), ErrorCode::MissCommaOrCurlyBracket);
        assert_eq!(error(r#"{"a":"#), ErrorCode::ExpectValue);
        assert_eq!(error(r#"{"a"#), ErrorCode::MissQuotationMark);
    }

    #[test]
    fn test_user_stopped() {
        let mut is = StringReadStream::new("[1, 2, 3]");
        let mut recorder = Recorder {
            stop_after: Some(2),
            ..Recorder::default()
        };
        assert_eq!(
            Reader::parse(&mut is, &mut recorder),
            Err(ErrorCode::UserStopped)
        );
        assert_eq!(recorder.events, ["[", "i32 1"]);
    }

    #[test]
    fn test_nesting_limit() {
        let limits = Limits::with_max_depth(2);

        let mut is = StringReadStream::new("[[1]]");
        let mut recorder = Recorder::default();
        assert_eq!(Reader::parse_with_limits(&mut is, &mut recorder, limits), Ok(()));

        let mut is = StringReadStream::new(r#"[{"a":[]}]"#);
        let mut recorder = Recorder::default();
        assert_eq!(
            Reader::parse_with_limits(&mut is, &mut recorder, limits),
            Err(ErrorCode::NestingTooDeep)
        );
    }

    #[test]
    fn test_default_limit_rejects_deep_input() {
        let deep = "[".repeat(10_000);
        assert_eq!(error(&deep), ErrorCode::NestingTooDeep);
    }
}
