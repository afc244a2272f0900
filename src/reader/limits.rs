//! Stack-usage limits for parsing.
//!
//! The parser is recursive descent, so nesting depth maps directly onto call
//! stack depth. Bounding it keeps adversarial input such as `[[[[...` from
//! exhausting the stack.

/// Default nesting bound used by [`Limits::standard`].
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of simultaneously open arrays/objects.
    pub max_nesting_depth: usize,
}

impl Limits {
    /// Bounded nesting, the default.
    pub const fn standard() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// No nesting bound. Deep enough input overflows the stack.
    pub const fn unbounded() -> Self {
        Self {
            max_nesting_depth: usize::MAX,
        }
    }

    /// Bounded nesting with a custom depth.
    pub const fn with_max_depth(max_nesting_depth: usize) -> Self {
        Self { max_nesting_depth }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
