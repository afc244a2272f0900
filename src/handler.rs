//! The event sink shared by the parser, the document builder and the writer.

/// Consumer of structural parse events.
///
/// A parse emits, for each value, exactly the events a depth-first walk of
/// the equivalent tree would produce: scalars as one event, containers as a
/// start event, their children (object members as `key` followed by the
/// member value) and an end event.
///
/// Every method returns `true` to continue. Returning `false` stops the
/// producer immediately; a parse stopped this way fails with
/// [`ErrorCode::UserStopped`](crate::ErrorCode::UserStopped).
pub trait Handler {
    /// `null`
    fn null(&mut self) -> bool;
    /// `true` / `false`
    fn bool(&mut self, b: bool) -> bool;
    /// Integer that fits in 32 bits, or carried an `i32` suffix.
    fn int32(&mut self, i: i32) -> bool;
    /// Integer that needs 64 bits, or carried an `i64` suffix.
    fn int64(&mut self, i: i64) -> bool;
    /// Fractional, exponent or non-finite number.
    fn double(&mut self, d: f64) -> bool;
    /// String value (unescaped).
    fn string(&mut self, s: &str) -> bool;
    /// `{`
    fn start_object(&mut self) -> bool;
    /// Object member key (unescaped).
    fn key(&mut self, s: &str) -> bool;
    /// `}`
    fn end_object(&mut self) -> bool;
    /// `[`
    fn start_array(&mut self) -> bool;
    /// `]`
    fn end_array(&mut self) -> bool;
}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn null(&mut self) -> bool {
        (**self).null()
    }
    fn bool(&mut self, b: bool) -> bool {
        (**self).bool(b)
    }
    fn int32(&mut self, i: i32) -> bool {
        (**self).int32(i)
    }
    fn int64(&mut self, i: i64) -> bool {
        (**self).int64(i)
    }
    fn double(&mut self, d: f64) -> bool {
        (**self).double(d)
    }
    fn string(&mut self, s: &str) -> bool {
        (**self).string(s)
    }
    fn start_object(&mut self) -> bool {
        (**self).start_object()
    }
    fn key(&mut self, s: &str) -> bool {
        (**self).key(s)
    }
    fn end_object(&mut self) -> bool {
        (**self).end_object()
    }
    fn start_array(&mut self) -> bool {
        (**self).start_array()
    }
    fn end_array(&mut self) -> bool {
        (**self).end_array()
    }
}
