//! Literal annotation tokens: boolean spellings, `nil` and `self`.
//!
//! These spellings are matched against the *whole* trimmed annotation, never against parts of it.
//!
//! ## Examples
//! ```rust
//! use sord_core::lang::literals;
//!
//! assert!(literals::is_boolean("Boolean"));
//! assert!(literals::is_boolean("false"));
//! assert!(!literals::is_boolean("TrueClass"));
//! assert!(literals::is_nil("nil"));
//! ```

/// Every spelling that means “true or false”.
pub const BOOLEAN_SPELLINGS: &[&str] = &["bool", "Bool", "boolean", "Boolean", "true", "false"];

/// The token marking an alternative as “or nothing”.
pub const NIL: &str = "nil";

/// The token referring to the enclosing declaration.
pub const SELF: &str = "self";

/// The class of `nil`, as spelled in Sorbet signatures.
pub const NIL_CLASS: &str = "NilClass";

/// Marker for an absolute constant path (`::Foo`).
pub const ROOT_SCOPE: &str = "::";

pub fn is_boolean(text: &str) -> bool {
    BOOLEAN_SPELLINGS.contains(&text)
}

pub fn is_nil(text: &str) -> bool {
    text == NIL
}

pub fn is_self(text: &str) -> bool {
    text == SELF
}
