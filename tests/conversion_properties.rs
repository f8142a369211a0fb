//! Property-based tests for annotation conversion.
//!
//! These tests use proptest to check the list laws (unwrap, dedup, nilable extraction) and that conversion is total
//! over arbitrary text.

use proptest::prelude::*;
use sord::frontend::diagnostics::NullSink;
use sord::{Annotation, ConverterConfig, Dialect, Registry, Resolver, ResolverOptions, TypeConverter, TypeNode};

fn convert(config: &ConverterConfig, annotation: Annotation) -> TypeNode {
    let registry = Registry::new();
    let resolver = Resolver::new(&registry, ResolverOptions::default(), &NullSink);
    TypeConverter::new(&resolver, config.clone(), &NullSink).convert(&annotation, None)
}

fn one(text: &str) -> Annotation {
    Annotation::One(text.to_string())
}

fn many(texts: &[&str]) -> Annotation {
    Annotation::Many(texts.iter().map(|t| t.to_string()).collect())
}

/// A well-formed annotation that never mentions `nil`.
fn annotation() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("String".to_string()),
        Just("Integer".to_string()),
        Just("Foo::Bar".to_string()),
        Just("Boolean".to_string()),
        Just(":sym".to_string()),
        Just("3.5".to_string()),
        Just("#to_s".to_string()),
        Just("Hash".to_string()),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| format!("Array<{t}>")),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| format!("Hash{{{k} => {v}}}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}, {b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("<{a}, {b}>")),
            inner.prop_map(|t| format!("Wrapper<{t}>")),
        ]
    })
}

fn config() -> impl Strategy<Value = ConverterConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(errors, rbs)| {
        ConverterConfig::new()
            .with_replace_errors_with_untyped(errors)
            .with_dialect(if rbs { Dialect::Rbs } else { Dialect::Rbi })
    })
}

fn mentions_nil(node: &TypeNode) -> bool {
    let nil = |n: &TypeNode| matches!(n, TypeNode::Raw(name) if name == "nil" || name == "NilClass");
    match node {
        TypeNode::Union(members) => members.iter().any(nil),
        other => nil(other),
    }
}

proptest! {
    /// Property: a one-element list converts exactly like the element itself.
    #[test]
    fn single_element_list_unwraps(text in annotation(), config in config()) {
        prop_assert_eq!(convert(&config, many(&[&text])), convert(&config, one(&text)));
    }

    /// Property: repeating an alternative changes nothing.
    #[test]
    fn duplicate_alternatives_collapse(text in annotation(), config in config()) {
        prop_assert_eq!(convert(&config, many(&[&text, &text])), convert(&config, one(&text)));
    }

    /// Property: a `nil` alternative becomes a nilable wrapper, never a union member.
    #[test]
    fn nil_alternative_wraps_instead_of_joining(a in annotation(), b in annotation(), config in config()) {
        let node = convert(&config, many(&[&a, &b, "nil"]));
        match &node {
            TypeNode::Nilable(inner) => prop_assert!(!mentions_nil(inner), "{node:?}"),
            TypeNode::Untyped => {
                prop_assert_eq!(convert(&config, one(&a)), TypeNode::Untyped);
                prop_assert_eq!(convert(&config, one(&b)), TypeNode::Untyped);
            }
            other => prop_assert!(false, "expected a nilable, got {other:?}"),
        }
    }

    /// Property: alternative order does not affect which members a union has.
    #[test]
    fn union_members_are_order_independent(a in annotation(), b in annotation()) {
        let config = ConverterConfig::default();
        let members = |node: TypeNode| -> Vec<TypeNode> {
            let mut v = match node {
                TypeNode::Union(m) => m,
                other => vec![other],
            };
            v.sort_by_key(|n| n.to_string());
            v
        };
        prop_assert_eq!(
            members(convert(&config, many(&[&a, &b]))),
            members(convert(&config, many(&[&b, &a])))
        );
    }

    /// Property: conversion never panics, and with error replacement on it never produces a placeholder.
    #[test]
    fn conversion_is_total(text in "\\PC{0,40}") {
        let replacing = ConverterConfig::new().with_replace_errors_with_untyped(true);
        prop_assert!(!convert(&replacing, one(&text)).contains_error());
        let _ = convert(&ConverterConfig::default(), one(&text)).to_string();
    }

    /// Property: well-formed annotations never hit the error path.
    #[test]
    fn well_formed_annotations_convert_cleanly(text in annotation(), config in config()) {
        prop_assert!(!convert(&config, one(&text)).contains_error());
    }
}
