//! Recognizing the surface shape of one annotation string.
//!
//! YARD annotations come in several competing syntaxes for the same idea (`Hash<K, V>`, `Hash{K => V}`, `{K => V}`),
//! so the converter first asks *which* syntax a string uses and only then decides what it means. [`classify`] tries
//! the recognizers in a fixed priority order and returns the first match:
//!
//! 1. identifier: `Foo`, `Foo::Bar`, `::Foo` (also `bool`, `nil`, `self`; the converter checks those first)
//! 2. duck type: `#read`, `#foo & #bar=`, `#<=>`
//! 3. generic: `Array<String>`, `Hash{Symbol => String}`, `Array < String >`
//! 4. ordered list: `Array(String, Symbol)`, `(String, Symbol)`
//! 5. shorthand hash: `{Symbol => String}`
//! 6. shorthand array: `<String>`
//! 7. literal: `:sym`, `3.14`, `42`
//!
//! The order matters: `#<=>` is a duck type even though it contains angle brackets.
//!
//! ## Notes
//! - Bracketed shapes must be *balanced*: the delimiter that closes the opening one has to be the final character.
//!   `Array<String` or `(A) | (B)` match nothing and end up on the converter's error path.
//! - Input is expected to be trimmed already.

/// The recognized shape of an annotation, borrowing from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'a> {
    Identifier(&'a str),
    /// Method atoms including their leading `#`.
    DuckType(Vec<&'a str>),
    Generic {
        name: &'a str,
        params: &'a str,
    },
    OrderedList(&'a str),
    ShorthandHash(&'a str),
    ShorthandArray(&'a str),
    Literal(LiteralKind),
    Unrecognized,
}

/// Kinds of data literal that stand in for their class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Symbol,
    Float,
    Integer,
}

impl LiteralKind {
    /// The class a literal of this kind is an instance of.
    pub fn class_name(self) -> &'static str {
        match self {
            LiteralKind::Symbol => "Symbol",
            LiteralKind::Float => "Float",
            LiteralKind::Integer => "Integer",
        }
    }
}

/// Operator method names accepted after `#` in a duck type.
///
/// `&` is absent: it joins duck-type atoms, so `#&` is only recognized as a whole annotation on its own.
const OPERATOR_METHODS: &[&str] = &[
    "[]=", "[]", "**", "+@", "-@", "+", "-", "*", "/", "%", "===", "==", "=~", "!=", "!~", "!", "<=>", "<=", ">=", "<<",
    ">>", "<", ">", "|", "^", "~",
];

/// Classify a trimmed annotation.
///
/// ## Examples
/// ```rust
/// use sord_syntax::shape::{classify, LiteralKind, Shape};
///
/// assert_eq!(classify("Array<String>"), Shape::Generic { name: "Array", params: "String" });
/// assert_eq!(classify("#to_s & #inspect"), Shape::DuckType(vec!["#to_s", "#inspect"]));
/// assert_eq!(classify("(String, Symbol)"), Shape::OrderedList("String, Symbol"));
/// assert_eq!(classify(":up"), Shape::Literal(LiteralKind::Symbol));
/// assert_eq!(classify("String, Symbol"), Shape::Unrecognized);
/// ```
pub fn classify(text: &str) -> Shape<'_> {
    if is_simple_identifier(text) {
        return Shape::Identifier(text);
    }
    if let Some(atoms) = duck_atoms(text) {
        return Shape::DuckType(atoms);
    }
    if let Some((name, params)) = generic_parts(text) {
        return Shape::Generic { name, params };
    }
    if let Some(params) = ordered_list_params(text) {
        return Shape::OrderedList(params);
    }
    if let Some(params) = wrapped(text, '{', '}') {
        return Shape::ShorthandHash(params);
    }
    if let Some(params) = wrapped(text, '<', '>') {
        return Shape::ShorthandArray(params);
    }
    if let Some(kind) = literal_kind(text) {
        return Shape::Literal(kind);
    }
    Shape::Unrecognized
}

/// Whether `text` is exactly a constant path: `Foo`, `Foo::Bar`, `::Foo::Bar`, `foo_bar`.
pub fn is_simple_identifier(text: &str) -> bool {
    !text.is_empty() && identifier_prefix_len(text) == text.len()
}

/// Length in bytes of the longest prefix of `text` matching `(::)?Ident(::Ident)*`, or 0.
fn identifier_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = if text.starts_with("::") { 2 } else { 0 };
    let mut end = 0;
    loop {
        let Some(len) = word_len(&bytes[pos..]) else {
            return end;
        };
        pos += len;
        end = pos;
        if bytes[pos..].starts_with(b"::") {
            pos += 2;
        } else {
            return end;
        }
    }
}

/// Length of a leading `[A-Za-z_][A-Za-z0-9_]*` word.
fn word_len(bytes: &[u8]) -> Option<usize> {
    let first = *bytes.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let rest = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    Some(1 + rest)
}

/// Split a duck type into its `#method` atoms, or `None` if `text` is not one.
pub fn duck_atoms(text: &str) -> Option<Vec<&str>> {
    if text == "#&" {
        return Some(vec![text]);
    }
    let atoms: Vec<&str> = text.split('&').map(str::trim).collect();
    atoms.iter().all(|atom| is_duck_atom(atom)).then_some(atoms)
}

fn is_duck_atom(atom: &str) -> bool {
    let Some(method) = atom.strip_prefix('#') else {
        return false;
    };
    if OPERATOR_METHODS.contains(&method) {
        return true;
    }
    match word_len(method.as_bytes()) {
        Some(len) if len == method.len() => true,
        Some(len) if len + 1 == method.len() => matches!(method.as_bytes()[len], b'?' | b'!' | b'='),
        _ => false,
    }
}

/// Split `Name<params>` / `Name{params}` into the name and the raw parameter text.
pub fn generic_parts(text: &str) -> Option<(&str, &str)> {
    let name_len = identifier_prefix_len(text);
    if name_len == 0 {
        return None;
    }
    let name = &text[..name_len];
    let rest = text[name_len..].trim_start();
    let params = wrapped(rest, '<', '>').or_else(|| wrapped(rest, '{', '}'))?;
    Some((name, params))
}

/// The parameter text of `Array(params)` or `(params)`.
pub fn ordered_list_params(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("Array").unwrap_or(text);
    wrapped(rest, '(', ')')
}

/// If `text` opens with `open` and the delimiter closing it is the last character, return the text in between.
fn wrapped(text: &str, open: char, close: char) -> Option<&str> {
    if !text.starts_with(open) {
        return None;
    }
    let closing = matching_close(text)?;
    let last = text.char_indices().last()?.0;
    (closing == last && text[closing..].starts_with(close)).then(|| &text[open.len_utf8()..closing])
}

/// Byte index of the delimiter that brings the depth opened by the first character back to zero.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut prev = None;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' if prev != Some('=') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    None
}

/// Probe for a symbol, float or integer literal.
///
/// Each kind is a narrow, independent check; nothing else is ever interpreted as data.
pub fn literal_kind(text: &str) -> Option<LiteralKind> {
    if is_symbol_literal(text) {
        Some(LiteralKind::Symbol)
    } else if is_integer_literal(text) {
        Some(LiteralKind::Integer)
    } else if is_float_literal(text) {
        Some(LiteralKind::Float)
    } else {
        None
    }
}

fn is_symbol_literal(text: &str) -> bool {
    let Some(body) = text.strip_prefix(':') else {
        return false;
    };
    if body.len() >= 2 {
        let quoted = (body.starts_with('"') && body.ends_with('"')) || (body.starts_with('\'') && body.ends_with('\''));
        if quoted {
            return true;
        }
    }
    if OPERATOR_METHODS.contains(&body) {
        return true;
    }
    match word_len(body.as_bytes()) {
        Some(len) if len == body.len() => true,
        Some(len) if len + 1 == body.len() => matches!(body.as_bytes()[len], b'?' | b'!' | b'='),
        _ => false,
    }
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['-', '+']).unwrap_or(text)
}

/// `[0-9][0-9_]*`
fn is_digits(text: &str, radix: u32) -> bool {
    text.chars().next().is_some_and(|c| c.is_digit(radix)) && text.chars().all(|c| c.is_digit(radix) || c == '_')
}

fn is_integer_literal(text: &str) -> bool {
    let body = strip_sign(text);
    if let Some(hex) = body.strip_prefix("0x") {
        return is_digits(hex, 16);
    }
    if let Some(bin) = body.strip_prefix("0b") {
        return is_digits(bin, 2);
    }
    if let Some(oct) = body.strip_prefix("0o") {
        return is_digits(oct, 8);
    }
    is_digits(body, 10)
}

fn is_float_literal(text: &str) -> bool {
    let body = strip_sign(text);
    if matches!(body, ".inf" | ".Inf" | ".INF") || matches!(text, ".nan" | ".NaN" | ".NAN") {
        return true;
    }

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    if let Some(exp) = exponent {
        if !is_digits(strip_sign(exp), 10) {
            return false;
        }
    }
    match mantissa.split_once('.') {
        Some((whole, frac)) => {
            let whole_ok = whole.is_empty() || is_digits(whole, 10);
            let frac_ok = frac.is_empty() || is_digits(frac, 10);
            whole_ok && frac_ok && !(whole.is_empty() && frac.is_empty())
        }
        None => exponent.is_some() && is_digits(mantissa, 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        for text in ["String", "Foo::Bar", "::Kernel::Array", "foo", "_x1", "Array", "nil", "self"] {
            assert_eq!(classify(text), Shape::Identifier(text), "{text}");
        }
        for text in ["Foo::", "::", "1Foo", "Foo.Bar", "Foo#bar", "Foo::1"] {
            assert!(!is_simple_identifier(text), "{text}");
        }
    }

    #[test]
    fn test_duck_types() {
        assert_eq!(classify("#to_s"), Shape::DuckType(vec!["#to_s"]));
        assert_eq!(classify("#setter="), Shape::DuckType(vec!["#setter="]));
        assert_eq!(classify("#foo & #foo_bar & #baz"), Shape::DuckType(vec!["#foo", "#foo_bar", "#baz"]));
        assert_eq!(classify("#foo&#bar"), Shape::DuckType(vec!["#foo", "#bar"]));
        assert_eq!(classify("#empty?"), Shape::DuckType(vec!["#empty?"]));
        assert_eq!(classify("#<=>"), Shape::DuckType(vec!["#<=>"]));
        assert_eq!(classify("#[]"), Shape::DuckType(vec!["#[]"]));
    }

    #[test]
    fn test_lone_ampersand_method_is_a_duck_type() {
        assert_eq!(classify("#&"), Shape::DuckType(vec!["#&"]));
        assert_eq!(classify("#& & #to_s"), Shape::Unrecognized);
    }

    #[test]
    fn test_malformed_duck_types_are_unrecognized() {
        for text in ["foo&bar", "foo&#bar", "#foo&bar", "#foo-bar", "#=foobar", "#", "#foo &", "#foo??", "#&#"] {
            assert_eq!(classify(text), Shape::Unrecognized, "{text}");
        }
    }

    #[test]
    fn test_generics() {
        assert_eq!(classify("Array < String >"), Shape::Generic { name: "Array", params: " String " });
        assert_eq!(
            classify("Hash{String => Symbol}"),
            Shape::Generic {
                name: "Hash",
                params: "String => Symbol"
            }
        );
        assert_eq!(
            classify("Hash<String=>Symbol>"),
            Shape::Generic {
                name: "Hash",
                params: "String=>Symbol"
            }
        );
        assert_eq!(
            classify("Foo::Wrapper<Array<String>>"),
            Shape::Generic {
                name: "Foo::Wrapper",
                params: "Array<String>"
            }
        );
    }

    #[test]
    fn test_unbalanced_generics_are_unrecognized() {
        for text in ["Array<String", "Array<String, Symbol", "Hash{String", "Array<String}", "Array<A> | Array<B>"] {
            assert_eq!(classify(text), Shape::Unrecognized, "{text}");
        }
    }

    #[test]
    fn test_ordered_lists() {
        assert_eq!(classify("Array(String, Integer)"), Shape::OrderedList("String, Integer"));
        assert_eq!(
            classify("(String, Symbol, (String, Symbol))"),
            Shape::OrderedList("String, Symbol, (String, Symbol)")
        );
        assert_eq!(classify("(A) | (B)"), Shape::Unrecognized);
        assert_eq!(classify("Set(String)"), Shape::Unrecognized);
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(classify("{String => Symbol}"), Shape::ShorthandHash("String => Symbol"));
        assert_eq!(
            classify("{{String => Integer} => {Symbol => Float}}"),
            Shape::ShorthandHash("{String => Integer} => {Symbol => Float}")
        );
        assert_eq!(classify("<String>"), Shape::ShorthandArray("String"));
        assert_eq!(
            classify("<String, <Boolean, Symbol>>"),
            Shape::ShorthandArray("String, <Boolean, Symbol>")
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal_kind(":up"), Some(LiteralKind::Symbol));
        assert_eq!(literal_kind(":empty?"), Some(LiteralKind::Symbol));
        assert_eq!(literal_kind(":\"with space\""), Some(LiteralKind::Symbol));
        assert_eq!(literal_kind("3"), Some(LiteralKind::Integer));
        assert_eq!(literal_kind("-1_000"), Some(LiteralKind::Integer));
        assert_eq!(literal_kind("0x1F"), Some(LiteralKind::Integer));
        assert_eq!(literal_kind("3.14"), Some(LiteralKind::Float));
        assert_eq!(literal_kind("1e5"), Some(LiteralKind::Float));
        assert_eq!(literal_kind("-.5"), Some(LiteralKind::Float));
        assert_eq!(literal_kind(".inf"), Some(LiteralKind::Float));

        for text in ["", ".", "e5", "1.2.3", "1e", ":", ":1", "'foo'", "0x"] {
            assert_eq!(literal_kind(text), None, "{text}");
        }
    }
}
