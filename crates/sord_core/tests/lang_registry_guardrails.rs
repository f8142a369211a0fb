use std::collections::HashSet;

use sord_core::RubyVersion;
use sord_core::lang::{builtins, containers, duck, literals};

#[test]
fn containers_spellings_unique_and_resolvable() {
    let mut seen = HashSet::new();
    for info in containers::CONTAINERS {
        assert_eq!(
            containers::from_str(info.canonical),
            Some(info.id),
            "container spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(containers::as_str(info.id), info.canonical);
        assert!(seen.insert(info.canonical), "duplicate container spelling {:?}", info.canonical);
    }
}

#[test]
fn every_container_is_a_builtin_class_except_enumerable() {
    // `Enumerable` is a module, everything else is a real class.
    for info in containers::CONTAINERS {
        let is_class = builtins::is_builtin_class(info.canonical, RubyVersion::DEFAULT);
        assert_eq!(
            is_class,
            info.canonical != "Enumerable",
            "unexpected builtin status for {}",
            info.canonical
        );
    }
}

#[test]
fn builtin_class_names_unique() {
    let mut seen = HashSet::new();
    for info in builtins::BUILTIN_CLASSES {
        assert!(seen.insert(info.name), "duplicate builtin class {:?}", info.name);
        assert!(
            info.name.chars().next().is_some_and(|c| c.is_ascii_uppercase()),
            "builtin class {:?} must be a constant",
            info.name
        );
    }
}

#[test]
fn builtin_classes_follow_host_version() {
    let legacy: Vec<_> = builtins::builtin_classes(RubyVersion::new(2, 7)).collect();
    let modern: Vec<_> = builtins::builtin_classes(RubyVersion::new(3, 2)).collect();

    assert!(legacy.contains(&"SortedSet"));
    assert!(legacy.contains(&"Fixnum"));
    assert!(!legacy.contains(&"Data"));
    assert!(!legacy.contains(&"Ractor"));

    assert!(!modern.contains(&"SortedSet"));
    assert!(!modern.contains(&"Fixnum"));
    assert!(modern.contains(&"Data"));
    assert!(modern.contains(&"Ractor"));

    for name in ["String", "Numeric", "Integer", "Float", "IO"] {
        assert!(modern.contains(&name), "{name} missing from builtin classes");
    }
}

#[test]
fn duck_interfaces_are_well_formed() {
    let mut seen = HashSet::new();
    for info in duck::DUCK_INTERFACES {
        assert!(info.method.starts_with('#'), "duck atom {:?} must start with '#'", info.method);
        assert!(info.interface.starts_with('_'), "interface {:?} must start with '_'", info.interface);
        assert!(seen.insert(info.method), "duplicate duck atom {:?}", info.method);
        assert_eq!(duck::from_str(info.method), Some(info));
    }
}

#[test]
fn literal_tokens_do_not_overlap() {
    for spelling in literals::BOOLEAN_SPELLINGS {
        assert!(!literals::is_nil(spelling));
        assert!(!literals::is_self(spelling));
        assert!(containers::from_str(spelling).is_none());
    }
}
