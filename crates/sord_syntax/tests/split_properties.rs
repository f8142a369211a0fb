//! Property-based tests for the parameter splitter and shape recognizers.
//!
//! Parameters are generated from a small grammar of well-formed annotations so every generated string has a known
//! top-level structure to compare against.

use proptest::prelude::*;
use sord_syntax::shape::{self, Shape};
use sord_syntax::split::split_type_parameters;

/// A well-formed annotation with arbitrary nesting.
fn annotation() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("String".to_string()),
        Just("Integer".to_string()),
        Just("Foo::Bar".to_string()),
        Just(":sym".to_string()),
        Just("#to_s".to_string()),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| format!("Array<{t}>")),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| format!("Hash{{{k} => {v}}}")),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| format!("Hash<{k}, {v}>")),
            prop::collection::vec(inner.clone(), 1..4).prop_map(|ts| format!("({})", ts.join(", "))),
            inner.prop_map(|t| format!("<{t}>")),
        ]
    })
}

proptest! {
    /// Property: joining well-formed annotations with commas splits back into exactly those annotations.
    #[test]
    fn comma_join_splits_back(parts in prop::collection::vec(annotation(), 1..5)) {
        let joined = parts.join(", ");
        let groups = split_type_parameters(&joined);
        let expected: Vec<Vec<String>> = parts.iter().map(|p| vec![p.clone()]).collect();
        prop_assert_eq!(groups, expected);
    }

    /// Property: a top-level rocket always yields exactly two groups, whatever is nested on either side.
    #[test]
    fn rocket_yields_two_groups(
        keys in prop::collection::vec(annotation(), 1..3),
        values in prop::collection::vec(annotation(), 1..3),
    ) {
        let text = format!("{} => {}", keys.join(", "), values.join(", "));
        let groups = split_type_parameters(&text);
        prop_assert_eq!(groups.len(), 2);
        prop_assert_eq!(&groups[0], &keys);
        prop_assert_eq!(&groups[1], &values);
    }

    /// Property: surrounding whitespace never changes the split.
    #[test]
    fn whitespace_is_trimmed(parts in prop::collection::vec(annotation(), 1..4), pad in "[ \t]{0,3}") {
        let tight = parts.join(",");
        let loose = parts.iter().map(|p| format!("{pad}{p}{pad}")).collect::<Vec<_>>().join(",");
        prop_assert_eq!(split_type_parameters(&tight), split_type_parameters(&loose));
    }

    /// Property: every generated annotation is recognized by some rule.
    #[test]
    fn well_formed_annotations_are_recognized(text in annotation()) {
        prop_assert_ne!(shape::classify(&text), Shape::Unrecognized);
    }

    /// Property: the splitter never panics and never loses non-whitespace characters other than separators.
    #[test]
    fn splitter_is_total(text in "[A-Za-z<>{}()=, ]{0,40}") {
        let groups = split_type_parameters(&text);
        prop_assert!(!groups.is_empty());
        let kept: usize = groups.iter().flatten().map(|s| s.chars().filter(|c| !c.is_whitespace()).count()).sum();
        let original = text.chars().filter(|c| !c.is_whitespace()).count();
        prop_assert!(kept <= original);
    }
}
