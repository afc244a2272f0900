//! Recursive descent grammar driving a [`Handler`].
//!
//! One byte of lookahead, no backtracking. Every handler call is checked
//! and a `false` return unwinds the parse with `UserStopped`.

use super::lexer::{Lexer, Number};
use super::limits::Limits;
use crate::error::{ErrorCode, ParseResult};
use crate::handler::Handler;
use crate::stream::ReadStream;

/// Grammar state for a single parse.
pub struct Parser<'s, R: ReadStream, H: Handler> {
    lexer: Lexer<'s, R>,
    handler: &'s mut H,
    limits: Limits,
    depth: usize,
}

impl<'s, R: ReadStream, H: Handler> Parser<'s, R, H> {
    /// Create a parser reading `is` and reporting to `handler`.
    pub fn new(is: &'s mut R, handler: &'s mut H, limits: Limits) -> Self {
        Self {
            lexer: Lexer::new(is),
            handler,
            limits,
            depth: 0,
        }
    }

    /// Parse exactly one root value surrounded by optional whitespace.
    pub fn parse(&mut self) -> ParseResult<()> {
        self.lexer.skip_whitespace();
        self.parse_value()?;
        self.lexer.skip_whitespace();
        if self.lexer.has_next() {
            return Err(ErrorCode::RootNotSingular);
        }
        Ok(())
    }

    /// Map a handler verdict onto the parse result.
    fn call(ok: bool) -> ParseResult<()> {
        if ok {
            Ok(())
        } else {
            tracing::trace!("handler stopped the parse");
            Err(ErrorCode::UserStopped)
        }
    }

    fn parse_value(&mut self) -> ParseResult<()> {
        if !self.lexer.has_next() {
            return Err(ErrorCode::ExpectValue);
        }

        match self.lexer.peek() {
            b'n' => {
                self.lexer.scan_literal(b"null")?;
                Self::call(self.handler.null())
            }
            b't' => {
                self.lexer.scan_literal(b"true")?;
                Self::call(self.handler.bool(true))
            }
            b'f' => {
                self.lexer.scan_literal(b"false")?;
                Self::call(self.handler.bool(false))
            }
            b'"' => self.parse_string(false),
            b'[' => self.parse_array(),
            b'{' => self.parse_object(),
            _ => self.parse_number(),
        }
    }

    fn parse_number(&mut self) -> ParseResult<()> {
        let ok = match self.lexer.scan_number()? {
            Number::Int32(i) => self.handler.int32(i),
            Number::Int64(i) => self.handler.int64(i),
            Number::Double(d) => self.handler.double(d),
        };
        Self::call(ok)
    }

    /// The same string grammar serves keys and values.
    fn parse_string(&mut self, is_key: bool) -> ParseResult<()> {
        let s = self.lexer.scan_string()?;
        let ok = if is_key {
            self.handler.key(&s)
        } else {
            self.handler.string(&s)
        };
        Self::call(ok)
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(ErrorCode::NestingTooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_array(&mut self) -> ParseResult<()> {
        self.enter()?;
        Self::call(self.handler.start_array())?;

        self.lexer.assert_next(b'[');
        self.lexer.skip_whitespace();

        if self.lexer.peek() == b']' {
            self.lexer.next_byte();
            self.leave();
            return Self::call(self.handler.end_array());
        }

        loop {
            self.parse_value()?;
            self.lexer.skip_whitespace();
            match self.lexer.next_byte() {
                b',' => self.lexer.skip_whitespace(),
                b']' => {
                    self.leave();
                    return Self::call(self.handler.end_array());
                }
                _ => return Err(ErrorCode::MissCommaOrSquareBracket),
            }
        }
    }

    fn parse_object(&mut self) -> ParseResult<()> {
        self.enter()?;
        Self::call(self.handler.start_object())?;

        self.lexer.assert_next(b'{');
        self.lexer.skip_whitespace();

        if self.lexer.peek() == b'}' {
            self.lexer.next_byte();
            self.leave();
            return Self::call(self.handler.end_object());
        }

        loop {
            if self.lexer.peek() != b'"' {
                return Err(ErrorCode::MissKey);
            }
            self.parse_string(true)?;

            self.lexer.skip_whitespace();
            if self.lexer.next_byte() != b':' {
                return Err(ErrorCode::MissColon);
            }
            self.lexer.skip_whitespace();

            self.parse_value()?;
            self.lexer.skip_whitespace();
            match self.lexer.next_byte() {
                b',' => self.lexer.skip_whitespace(),
                b'}' => {
                    self.leave();
                    return Self::call(self.handler.end_object());
                }
                _ => return Err(ErrorCode::MissCommaOrCurlyBracket),
            }
        }
    }
}
