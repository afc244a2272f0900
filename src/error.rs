//! Error handling for the codec.
//!
//! Two classes of failure exist and are kept apart:
//!
//! - Malformed input. Every grammar or lexical violation maps to exactly one
//!   [`ErrorCode`], generated at build time from `metadata/errors.json`.
//!   Parsing routines return [`ParseResult`] and propagate with `?`; only
//!   [`Reader::parse`](crate::Reader::parse) hands a code to the caller.
//! - Misuse of the API by embedding code (wrong variant accessed, mismatched
//!   container close, duplicate key insert). These are not recoverable and
//!   go through [`contract_violation`], which panics.

include!(concat!(env!("OUT_DIR"), "/error_generated.rs"));

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ErrorCode>;

/// Returns the lookup string for an error code.
pub fn parse_error_str(err: ErrorCode) -> &'static str {
    err.message()
}

/// Abort on a broken API contract.
///
/// Contract violations are bugs in the calling code, never a property of
/// the input, so they are not reported through [`ErrorCode`].
#[cold]
#[track_caller]
#[allow(clippy::panic)]
pub fn contract_violation(what: &str) -> ! {
    panic!("contract violation: {what}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_dense() {
        for (i, err) in ErrorCode::ALL.iter().enumerate() {
            assert_eq!(err.code() as usize, i);
        }
    }

    #[test]
    fn test_lookup_strings() {
        assert_eq!(ErrorCode::Ok.message(), "ok");
        assert_eq!(ErrorCode::RootNotSingular.to_string(), "root not singular");
        assert_eq!(parse_error_str(ErrorCode::MissColon), "miss colon");
        assert_eq!(ErrorCode::UserStopped.to_string(), "user stopped parse");
        assert_eq!(ErrorCode::NestingTooDeep.message(), "nesting too deep");
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(ErrorCode::MissCommaOrSquareBracket.name(), "MISS_COMMA_OR_SQUARE_BRACKET");
        assert_eq!(
            ErrorCode::from_name("BAD_UNICODE_SURROGATE"),
            Some(ErrorCode::BadUnicodeSurrogate)
        );
        assert_eq!(ErrorCode::from_name("NOT_A_CODE"), None);
    }

    #[test]
    #[should_panic(expected = "contract violation: bad access")]
    fn test_contract_violation_panics() {
        contract_violation("bad access");
    }
}
