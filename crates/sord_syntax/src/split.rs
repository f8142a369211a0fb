//! Splitting the parameter list of a generic, tuple or shorthand annotation.
//!
//! The input is the text *between* the outer delimiters, e.g. `String, Array<Symbol>` for `Hash<String,
//! Array<Symbol>>`. Separators only count at bracket depth zero, where depth rises on `<`, `{`, `(` and falls on
//! `>`, `}`, `)`. A `>` directly after `=` belongs to a hash rocket and never closes a bracket.
//!
//! Two separators exist:
//! - `,` ends the current parameter;
//! - `=>` outranks the comma: everything before it is the first group and everything after it the second, so
//!   `K1, K2 => V1, V2` splits into `[[K1, K2], [V1, V2]]`.
//!
//! Without a rocket every parameter forms its own single-item group.

/// One top-level parameter. Holds several items only on either side of a hash rocket.
pub type ParamGroup = Vec<String>;

/// Split `params` into top-level parameter groups. Every item is whitespace-trimmed.
///
/// ## Examples
/// ```rust
/// use sord_syntax::split::split_type_parameters;
///
/// assert_eq!(
///     split_type_parameters("Hash<String, Symbol>, Integer"),
///     vec![vec!["Hash<String, Symbol>".to_string()], vec!["Integer".to_string()]],
/// );
/// assert_eq!(
///     split_type_parameters("String, Integer => Symbol"),
///     vec![
///         vec!["String".to_string(), "Integer".to_string()],
///         vec!["Symbol".to_string()],
///     ],
/// );
/// ```
#[tracing::instrument(level = "trace", skip_all, fields(params_len = params.len()))]
pub fn split_type_parameters(params: &str) -> Vec<ParamGroup> {
    let chars: Vec<char> = params.chars().collect();
    split_chars(&chars)
}

fn split_chars(chars: &[char]) -> Vec<ParamGroup> {
    let mut items: Vec<String> = Vec::new();
    // Items before the first top-level `=>`; everything after it lands in one value group.
    let mut keys: Option<Vec<String>> = None;
    let mut buffer = String::new();
    let mut depth: i32 = 0;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let after_equals = i > 0 && chars[i - 1] == '=';

        match c {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' if !after_equals => depth -= 1,
            _ => {}
        }

        if depth == 0 {
            if c == ',' {
                items.push(buffer.trim().to_string());
                buffer.clear();
                i += 1;
                continue;
            }
            if c == '=' && chars.get(i + 1) == Some(&'>') {
                items.push(buffer.trim().to_string());
                buffer.clear();
                if keys.is_none() {
                    keys = Some(std::mem::take(&mut items));
                }
                i += 2;
                continue;
            }
        }

        buffer.push(c);
        i += 1;
    }

    items.push(buffer.trim().to_string());
    match keys {
        Some(keys) => vec![keys, items],
        None => items.into_iter().map(|item| vec![item]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singles(items: &[&str]) -> Vec<ParamGroup> {
        items.iter().map(|s| vec![s.to_string()]).collect()
    }

    #[test]
    fn test_nested_brackets_stay_together() {
        let groups = split_type_parameters("Hash<String,Symbol>, Hash<Array<Symbol>,Integer>");
        assert_eq!(groups, singles(&["Hash<String,Symbol>", "Hash<Array<Symbol>,Integer>"]));
    }

    #[test]
    fn test_rocket_outranks_comma() {
        let groups = split_type_parameters("String, Integer => Symbol, Float");
        assert_eq!(
            groups,
            vec![
                vec!["String".to_string(), "Integer".to_string()],
                vec!["Symbol".to_string(), "Float".to_string()],
            ]
        );
    }

    #[test]
    fn test_nested_rocket_is_not_a_separator() {
        let groups = split_type_parameters("Hash{String => Symbol} => Hash{Array<Symbol> => Integer}");
        assert_eq!(groups, singles(&["Hash{String => Symbol}", "Hash{Array<Symbol> => Integer}"]));
    }

    #[test]
    fn test_rocket_without_spaces() {
        assert_eq!(split_type_parameters("String=>Symbol"), singles(&["String", "Symbol"]));
    }

    #[test]
    fn test_tuple_parens_count_as_brackets() {
        let groups = split_type_parameters("String, Symbol, (String, Symbol)");
        assert_eq!(groups, singles(&["String", "Symbol", "(String, Symbol)"]));
    }

    #[test]
    fn test_empty_input_yields_one_empty_item() {
        assert_eq!(split_type_parameters(""), singles(&[""]));
        assert_eq!(split_type_parameters("   "), singles(&[""]));
    }

    #[test]
    fn test_second_rocket_merges_into_values() {
        let groups = split_type_parameters("A => B => C");
        assert_eq!(
            groups,
            vec![vec!["A".to_string()], vec!["B".to_string(), "C".to_string()]]
        );
    }

    #[test]
    fn test_long_rocket_chain_stays_two_groups() {
        let text = vec!["A"; 5000].join(" => ");
        let groups = split_type_parameters(&text);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec!["A".to_string()]);
        assert_eq!(groups[1].len(), 4999);
    }

    #[test]
    fn test_unbalanced_closer_keeps_following_commas() {
        // The stray `>` drops depth below zero, so the comma after it is not top-level.
        assert_eq!(split_type_parameters("A>, B"), singles(&["A>, B"]));
    }
}
