//! Identifier helpers shared by the converter and its callers.

/// Prefix of the constant emitted in place of an annotation that could not be parsed.
pub const ERROR_CONSTANT_PREFIX: &str = "SORD_ERROR_";

/// Strip every character outside `[0-9A-Za-z_]`.
///
/// ## Examples
/// ```rust
/// use sord_core::strings::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("foo&bar"), "foobar");
/// assert_eq!(sanitize_identifier("Hash{String, Symbol"), "HashStringSymbol");
/// assert_eq!(sanitize_identifier("Stra\u{df}e"), "Strae");
/// ```
pub fn sanitize_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// The constant name used for an unparseable annotation, e.g. `SORD_ERROR_foobar`.
pub fn error_constant(text: &str) -> String {
    format!("{ERROR_CONSTANT_PREFIX}{}", sanitize_identifier(text))
}

/// Whether `text` starts like a Ruby local/method name rather than a constant.
///
/// Annotations such as `foo` are accepted as raw names, but they are almost certainly not types.
pub fn looks_like_non_constant(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constant_with_empty_text() {
        assert_eq!(error_constant(""), "SORD_ERROR_");
    }

    #[test]
    fn test_looks_like_non_constant() {
        assert!(looks_like_non_constant("foo"));
        assert!(looks_like_non_constant("_private"));
        assert!(!looks_like_non_constant("Foo"));
        assert!(!looks_like_non_constant("::Foo"));
        assert!(!looks_like_non_constant(""));
    }
}
