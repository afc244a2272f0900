//! Number rendering.
//!
//! Integers use `itoa`. Doubles use the shortest digit string that parses
//! back to the same bits, laid out positionally when the decimal exponent is
//! in `[-5, 17)` and in scientific form otherwise. A rendered double always
//! carries a fractional part so that a re-parse yields a double again.

use crate::stream::WriteStream;

/// Smallest decimal exponent rendered positionally.
const MIN_POSITIONAL_EXP: i32 = -5;
/// First decimal exponent rendered in scientific form.
const MAX_POSITIONAL_EXP: i32 = 17;

/// Write an `i32` in minimal decimal form.
pub fn write_i32<W: WriteStream>(os: &mut W, i: i32) {
    let mut buf = itoa::Buffer::new();
    os.put_str(buf.format(i));
}

/// Write an `i64` in minimal decimal form.
pub fn write_i64<W: WriteStream>(os: &mut W, i: i64) {
    let mut buf = itoa::Buffer::new();
    os.put_str(buf.format(i));
}

/// Write a double.
pub fn write_f64<W: WriteStream>(os: &mut W, d: f64) {
    os.put_str(&format_f64(d));
}

/// Render a double as text.
pub fn format_f64(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_owned();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    // `{:e}` yields the shortest round-tripping digits, e.g. "-1.25e-7".
    let sci = format!("{d:e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if (MIN_POSITIONAL_EXP..MAX_POSITIONAL_EXP).contains(&exp) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                out.push_str(&digits);
                out.extend(std::iter::repeat('0').take(int_len - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        } else {
            out.push_str("0.");
            out.extend(std::iter::repeat('0').take((-exp - 1) as usize));
            out.push_str(&digits);
        }
    } else {
        out.push_str(&digits[..1]);
        out.push('.');
        if digits.len() > 1 {
            out.push_str(&digits[1..]);
        } else {
            out.push('0');
        }
        out.push('e');
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(exp));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StringWriteStream;

    #[test]
    fn test_integers() {
        let mut os = StringWriteStream::new();
        write_i32(&mut os, i32::MIN);
        os.put(' ');
        write_i64(&mut os, i64::MAX);
        os.put(' ');
        write_i32(&mut os, 0);
        assert_eq!(os.as_str(), "-2147483648 9223372036854775807 0");
    }

    #[test]
    fn test_integral_doubles_keep_fraction() {
        assert_eq!(format_f64(1.0), "1.0");
        assert_eq!(format_f64(0.0), "0.0");
        assert_eq!(format_f64(-0.0), "-0.0");
        assert_eq!(format_f64(100.0), "100.0");
        assert_eq!(format_f64(1e16), "10000000000000000.0");
    }

    #[test]
    fn test_positional_range() {
        assert_eq!(format_f64(0.5), "0.5");
        assert_eq!(format_f64(-2.25), "-2.25");
        assert_eq!(format_f64(123.456), "123.456");
        assert_eq!(format_f64(0.001), "0.001");
        assert_eq!(format_f64(1.5e-5), "0.000015");
    }

    #[test]
    fn test_scientific_range() {
        assert_eq!(format_f64(1e17), "1.0e17");
        assert_eq!(format_f64(1e300), "1.0e300");
        assert_eq!(format_f64(1.5e-7), "1.5e-7");
        assert_eq!(format_f64(-2.5e-6), "-2.5e-6");
        assert_eq!(format_f64(f64::MIN_POSITIVE), "2.2250738585072014e-308");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_f64(f64::NAN), "NaN");
        assert_eq!(format_f64(f64::INFINITY), "Infinity");
        assert_eq!(format_f64(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_shortest_round_trip() {
        for d in [0.1, 1.0 / 3.0, 2.0f64.sqrt(), f64::MAX, 5e-324, 123456789.125] {
            let text = format_f64(d);
            assert_eq!(text.parse::<f64>().unwrap(), d, "{text}");
        }
        assert_eq!(format_f64(0.1), "0.1");
        assert_eq!(format_f64(f64::MAX), "1.7976931348623157e308");
        assert_eq!(format_f64(5e-324), "5.0e-324");
    }
}
