#![no_main]

use libfuzzer_sys::fuzz_target;
use sord::frontend::diagnostics::NullSink;
use sord::{ConverterConfig, Dialect, EntityKind, Registry, Resolver, ResolverOptions, TypeConverter};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut registry = Registry::new();
    let scope = registry.define_path("Fuzz::Target#run", EntityKind::Method);
    let resolver = Resolver::new(&registry, ResolverOptions::default(), &NullSink);

    for dialect in [Dialect::Rbi, Dialect::Rbs] {
        let converter = TypeConverter::new(&resolver, ConverterConfig::new().with_dialect(dialect), &NullSink);
        // Conversion is total: every input yields a node, never a panic.
        let node = converter.convert_str(text, Some(registry.get(scope)));
        let _ = node.to_string();

        // The same text as one alternative of a list, next to nil.
        let listed = converter.convert(&vec![text.to_string(), "nil".to_string()].into(), None);
        let _ = listed.contains_error();
    }
});
