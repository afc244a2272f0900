//! Lexical scanning: whitespace, literals, numbers and strings.
//!
//! The lexer reads straight off a [`ReadStream`] with one byte of lookahead
//! and never backtracks. Each scan consumes exactly one token and hands back
//! its decoded payload; the parser decides which event it becomes.

use crate::error::{ErrorCode, ParseResult};
use crate::stream::ReadStream;

/// A scanned number, already classified by width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Fits in `i32`, or carried an `i32` suffix.
    Int32(i32),
    /// Needs `i64`, or carried an `i64` suffix.
    Int64(i64),
    /// Fraction, exponent, `NaN` or `Infinity`.
    Double(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    Auto,
    Int32,
    Int64,
    Double,
}

/// Tokenizer over a byte cursor.
pub struct Lexer<'s, R: ReadStream> {
    is: &'s mut R,
}

impl<'s, R: ReadStream> Lexer<'s, R> {
    /// Wrap a cursor.
    pub fn new(is: &'s mut R) -> Self {
        Self { is }
    }

    /// Returns true while unread input remains.
    pub fn has_next(&self) -> bool {
        self.is.has_next()
    }

    /// Current byte without consuming it.
    pub fn peek(&self) -> u8 {
        self.is.peek()
    }

    /// Consume and return the current byte.
    pub fn next_byte(&mut self) -> u8 {
        self.is.next()
    }

    /// Consume a byte the grammar has already identified.
    pub fn assert_next(&mut self, ch: u8) {
        self.is.assert_next(ch);
    }

    /// Skip whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while self.is.has_next() {
            match self.is.peek() {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.is.next();
                }
                _ => break,
            }
        }
    }

    /// Match a fixed token such as `null`. The first byte is already known.
    pub fn scan_literal(&mut self, literal: &[u8]) -> ParseResult<()> {
        let Some((&first, rest)) = literal.split_first() else {
            return Ok(());
        };
        self.is.assert_next(first);
        for &b in rest {
            if self.is.peek() != b {
                return Err(ErrorCode::BadValue);
            }
            self.is.next();
        }
        Ok(())
    }

    /// Scan a number, including the `NaN` / `Infinity` and `i32` / `i64`
    /// extensions.
    pub fn scan_number(&mut self) -> ParseResult<Number> {
        match self.is.peek() {
            b'N' => {
                self.scan_literal(b"NaN")?;
                return Ok(Number::Double(f64::NAN));
            }
            b'I' => {
                self.scan_literal(b"Infinity")?;
                return Ok(Number::Double(f64::INFINITY));
            }
            _ => {}
        }

        let mut text = String::new();

        if self.is.peek() == b'-' {
            self.push_next(&mut text);
            if self.is.peek() == b'I' {
                self.scan_literal(b"Infinity")?;
                return Ok(Number::Double(f64::NEG_INFINITY));
            }
        }

        // Integer part
        match self.is.peek() {
            b'0' => {
                self.push_next(&mut text);
                if self.is.peek().is_ascii_digit() {
                    return Err(ErrorCode::BadValue);
                }
            }
            b'1'..=b'9' => self.push_digits(&mut text),
            _ => return Err(ErrorCode::BadValue),
        }

        let mut width = Width::Auto;

        if self.is.peek() == b'.' {
            width = Width::Double;
            self.push_next(&mut text);
            if !self.is.peek().is_ascii_digit() {
                return Err(ErrorCode::BadValue);
            }
            self.push_digits(&mut text);
        }

        if matches!(self.is.peek(), b'e' | b'E') {
            width = Width::Double;
            self.push_next(&mut text);
            if matches!(self.is.peek(), b'+' | b'-') {
                self.push_next(&mut text);
            }
            if !self.is.peek().is_ascii_digit() {
                return Err(ErrorCode::BadValue);
            }
            self.push_digits(&mut text);
        }

        if self.is.peek() == b'i' {
            self.is.next();
            if width == Width::Double {
                return Err(ErrorCode::BadValue);
            }
            width = match (self.is.next(), self.is.next()) {
                (b'3', b'2') => Width::Int32,
                (b'6', b'4') => Width::Int64,
                _ => return Err(ErrorCode::BadValue),
            };
        }

        match width {
            // Out-of-range magnitudes saturate to infinity or zero.
            Width::Double => text
                .parse::<f64>()
                .map(Number::Double)
                .map_err(|_| ErrorCode::BadValue),
            Width::Int32 => text
                .parse::<i32>()
                .map(Number::Int32)
                .map_err(|_| ErrorCode::NumberTooBig),
            Width::Int64 => text
                .parse::<i64>()
                .map(Number::Int64)
                .map_err(|_| ErrorCode::NumberTooBig),
            Width::Auto => {
                let value = text.parse::<i64>().map_err(|_| ErrorCode::NumberTooBig)?;
                Ok(match i32::try_from(value) {
                    Ok(small) => Number::Int32(small),
                    Err(_) => Number::Int64(value),
                })
            }
        }
    }

    fn push_next(&mut self, text: &mut String) {
        text.push(char::from(self.is.next()));
    }

    fn push_digits(&mut self, text: &mut String) {
        while self.is.peek().is_ascii_digit() {
            self.push_next(text);
        }
    }

    /// Scan a quoted string and return its unescaped contents.
    pub fn scan_string(&mut self) -> ParseResult<String> {
        self.is.assert_next(b'"');
        let mut buffer = Vec::new();

        while self.is.has_next() {
            match self.is.next() {
                b'"' => return String::from_utf8(buffer).map_err(|_| ErrorCode::BadStringChar),
                0x01..=0x1F => return Err(ErrorCode::BadStringChar),
                b'\\' => self.scan_escape(&mut buffer)?,
                b => buffer.push(b),
            }
        }

        Err(ErrorCode::MissQuotationMark)
    }

    /// Decode the escape following a backslash.
    fn scan_escape(&mut self, buffer: &mut Vec<u8>) -> ParseResult<()> {
        match self.is.next() {
            b'"' => buffer.push(b'"'),
            b'\\' => buffer.push(b'\\'),
            b'/' => buffer.push(b'/'),
            b'b' => buffer.push(0x08),
            b'f' => buffer.push(0x0C),
            b'n' => buffer.push(b'\n'),
            b'r' => buffer.push(b'\r'),
            b't' => buffer.push(b'\t'),
            b'u' => {
                let mut u = self.scan_hex4()?;
                if (0xD800..=0xDBFF).contains(&u) {
                    if self.is.next() != b'\\' || self.is.next() != b'u' {
                        return Err(ErrorCode::BadUnicodeSurrogate);
                    }
                    let low = self.scan_hex4()?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(ErrorCode::BadUnicodeSurrogate);
                    }
                    u = 0x10000 + (u - 0xD800) * 0x400 + (low - 0xDC00);
                } else if (0xDC00..=0xDFFF).contains(&u) {
                    // A low surrogate has no UTF-8 encoding on its own.
                    return Err(ErrorCode::BadUnicodeSurrogate);
                }
                encode_utf8(buffer, u);
            }
            _ => return Err(ErrorCode::BadStringEscape),
        }
        Ok(())
    }

    /// Read 4 hex digits and return the code unit.
    fn scan_hex4(&mut self) -> ParseResult<u32> {
        let mut u = 0u32;
        for _ in 0..4 {
            let digit = match self.is.next() {
                b @ b'0'..=b'9' => b - b'0',
                b @ b'a'..=b'f' => b - b'a' + 10,
                b @ b'A'..=b'F' => b - b'A' + 10,
                _ => return Err(ErrorCode::BadUnicodeHex),
            };
            u = (u << 4) | u32::from(digit);
        }
        Ok(u)
    }
}

/// Append the UTF-8 encoding of code point `u` (at most `0x10FFFF`).
fn encode_utf8(buffer: &mut Vec<u8>, u: u32) {
    // Every shifted value below is masked into byte range first.
    #[allow(clippy::cast_possible_truncation)]
    match u {
        0x00..=0x7F => buffer.push(u as u8),
        0x80..=0x7FF => {
            buffer.push(0xC0 | (u >> 6) as u8);
            buffer.push(0x80 | (u & 0x3F) as u8);
        }
        0x800..=0xFFFF => {
            buffer.push(0xE0 | (u >> 12) as u8);
            buffer.push(0x80 | ((u >> 6) & 0x3F) as u8);
            buffer.push(0x80 | (u & 0x3F) as u8);
        }
        _ => {
            buffer.push(0xF0 | ((u >> 18) & 0x07) as u8);
            buffer.push(0x80 | ((u >> 12) & 0x3F) as u8);
            buffer.push(0x80 | ((u >> 6) & 0x3F) as u8);
            buffer.push(0x80 | (u & 0x3F) as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StringReadStream;

    fn number(input: &str) -> ParseResult<Number> {
        let mut is = StringReadStream::new(input);
        Lexer::new(&mut is).scan_number()
    }

    fn string(input: &str) -> ParseResult<String> {
        let mut is = StringReadStream::new(input);
        Lexer::new(&mut is).scan_string()
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(number("0"), Ok(Number::Int32(0)));
        assert_eq!(number("-0"), Ok(Number::Int32(0)));
        assert_eq!(number("2147483647"), Ok(Number::Int32(i32::MAX)));
        assert_eq!(number("-2147483648"), Ok(Number::Int32(i32::MIN)));
        assert_eq!(number("2147483648"), Ok(Number::Int64(2_147_483_648)));
        assert_eq!(number("9223372036854775807"), Ok(Number::Int64(i64::MAX)));
        assert_eq!(number("-9223372036854775808"), Ok(Number::Int64(i64::MIN)));
    }

    #[test]
    fn test_integer_too_big() {
        assert_eq!(number("92233720368547758070"), Err(ErrorCode::NumberTooBig));
        assert_eq!(number("9223372036854775808"), Err(ErrorCode::NumberTooBig));
        assert_eq!(number("2147483648i32"), Err(ErrorCode::NumberTooBig));
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(number("5i64"), Ok(Number::Int64(5)));
        assert_eq!(number("-7i32"), Ok(Number::Int32(-7)));
        assert_eq!(number("1.5i32"), Err(ErrorCode::BadValue));
        assert_eq!(number("1e3i64"), Err(ErrorCode::BadValue));
        assert_eq!(number("1i16"), Err(ErrorCode::BadValue));
        assert_eq!(number("1i3"), Err(ErrorCode::BadValue));
    }

    #[test]
    fn test_doubles() {
        assert_eq!(number("1.0"), Ok(Number::Double(1.0)));
        assert_eq!(number("-1.5e-3"), Ok(Number::Double(-0.0015)));
        assert_eq!(number("1E+2"), Ok(Number::Double(100.0)));
        assert_eq!(number("1e400"), Ok(Number::Double(f64::INFINITY)));
        assert_eq!(number("-Infinity"), Ok(Number::Double(f64::NEG_INFINITY)));
        assert!(matches!(number("NaN"), Ok(Number::Double(d)) if d.is_nan()));
    }

    #[test]
    fn test_bad_numbers() {
        for input in ["01", "-", "+1", ".5", "1.", "1e", "1e+", "Inf", "Nan", "x"] {
            assert_eq!(number(input), Err(ErrorCode::BadValue), "{input}");
        }
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(string(r#""a\nb\tc""#).unwrap(), "a\nb\tc");
        assert_eq!(string(r#""\"\\\/\b\f\r""#).unwrap(), "\"\\/\u{8}\u{c}\r");
        assert_eq!(string(r#""\u0041\u00e9\u20AC""#).unwrap(), "A\u{e9}\u{20ac}");
    }

    #[test]
    fn test_surrogate_pair() {
        let s = string(r#""\uD83D\uDE00""#).unwrap();
        assert_eq!(s.as_bytes(), &[0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(string("\"abc"), Err(ErrorCode::MissQuotationMark));
        assert_eq!(string("\"a\u{1}b\""), Err(ErrorCode::BadStringChar));
        assert_eq!(string(r#""\x""#), Err(ErrorCode::BadStringEscape));
        assert_eq!(string(r#""\u00G0""#), Err(ErrorCode::BadUnicodeHex));
        assert_eq!(string(r#""\uD800""#), Err(ErrorCode::BadUnicodeSurrogate));
        assert_eq!(string(r#""\uD800\u0041""#), Err(ErrorCode::BadUnicodeSurrogate));
        assert_eq!(string(r#""\uDC00""#), Err(ErrorCode::BadUnicodeSurrogate));
    }

    #[test]
    fn test_encode_utf8_boundaries() {
        for u in [0x7F, 0x80, 0x7FF, 0x800, 0xFFFF, 0x10000, 0x10FFFF] {
            let mut buffer = Vec::new();
            encode_utf8(&mut buffer, u);
            let expected = char::from_u32(u).unwrap().to_string();
            assert_eq!(buffer, expected.as_bytes(), "U+{u:X}");
        }
    }

    #[test]
    fn test_literal_mismatch() {
        let mut is = StringReadStream::new("nul");
        assert_eq!(Lexer::new(&mut is).scan_literal(b"null"), Err(ErrorCode::BadValue));
        let mut is = StringReadStream::new("true");
        assert_eq!(Lexer::new(&mut is).scan_literal(b"true"), Ok(()));
    }
}
