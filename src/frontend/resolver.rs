//! Name resolution for bare constant names found in annotations.
//!
//! Two questions get answered here:
//!
//! - [`Resolver::resolvable`]: would Ruby find this name from the given scope by itself? Lexical nesting is
//!   checked against the documentation corpus; built-in classes count only when nothing in the corpus shadows them.
//! - [`Resolver::path_for`]: if not, is there exactly one declaration anywhere whose full path ends in this name?
//!
//! The second question needs an index from simple names to full paths. It merges the corpus, the built-in class
//! table for the configured Ruby version and any dependency signature files, and it is built once on first use.
//! [`Resolver::clear`] drops it.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use sord_core::RubyVersion;
use sord_core::lang::builtins;
use sord_core::lang::literals::ROOT_SCOPE;

use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::registry::{EntityKind, EntityRef, Registry};
use super::signatures::{self, SignatureFormat};

/// Simple name to every full path declaring it.
pub type NameIndex = BTreeMap<String, BTreeSet<String>>;

pub const MISSING_COLLECTION_WARNING: &str =
    "Could not load RBS collection - run rbs collection install for dependencies";

/// Kinds a nested name component may refer to during lexical lookup.
const LOOKUP_KINDS: &[EntityKind] = &[EntityKind::Class, EntityKind::Method, EntityKind::Module];

/// Where the resolver looks for names beyond the documentation corpus.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Selects which built-in classes exist.
    pub ruby_version: RubyVersion,
    /// An installed RBS collection (e.g. `.gem_rbs_collection`); every `.rbs` file below it is read.
    pub rbs_collection: Option<PathBuf>,
    /// Dependency roots; each contributes `sig/**/*.rbs` and `rbi/**/*.rbi`.
    pub gem_dirs: Vec<PathBuf>,
}

impl ResolverOptions {
    pub fn with_ruby_version(mut self, version: RubyVersion) -> Self {
        self.ruby_version = version;
        self
    }

    pub fn with_rbs_collection(mut self, dir: impl Into<PathBuf>) -> Self {
        self.rbs_collection = Some(dir.into());
        self
    }

    pub fn with_gem_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.gem_dirs.push(dir.into());
        self
    }
}

pub struct Resolver<'r> {
    registry: &'r Registry,
    options: ResolverOptions,
    sink: &'r dyn DiagnosticSink,
    index: OnceCell<NameIndex>,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry, options: ResolverOptions, sink: &'r dyn DiagnosticSink) -> Self {
        Self {
            registry,
            options,
            sink,
            index: OnceCell::new(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Build the name index if it has not been built yet.
    pub fn prepare(&self) {
        self.index();
    }

    /// Drop the name index; the next query rebuilds it.
    pub fn clear(&mut self) {
        self.index.take();
    }

    pub fn is_prepared(&self) -> bool {
        self.index.get().is_some()
    }

    fn index(&self) -> &NameIndex {
        self.index.get_or_init(|| self.build_index())
    }

    /// Number of distinct simple names known to the index.
    pub fn known_names(&self) -> usize {
        self.index().len()
    }

    /// Every full path whose trailing components equal `name`.
    ///
    /// A name starting with `::` is already absolute and comes back unchanged.
    pub fn paths_for(&self, name: &str) -> BTreeSet<String> {
        if name.starts_with(ROOT_SCOPE) {
            return BTreeSet::from([name.to_string()]);
        }

        let simple = name.rsplit(ROOT_SCOPE).next().unwrap_or(name);
        let qualified_suffix = format!("{ROOT_SCOPE}{name}");
        self.index()
            .get(simple)
            .map(|paths| {
                paths
                    .iter()
                    .filter(|path| *path == name || path.ends_with(&qualified_suffix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The full path for `name` when exactly one is known.
    pub fn path_for(&self, name: &str) -> Option<String> {
        let mut paths = self.paths_for(name);
        if paths.len() == 1 { paths.pop_first() } else { None }
    }

    /// Built-in class names for the configured Ruby version.
    pub fn builtin_classes(&self) -> impl Iterator<Item = &'static str> {
        builtins::builtin_classes(self.options.ruby_version)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        builtins::is_builtin_class(name, self.options.ruby_version)
    }

    /// Whether `name` written inside `scope` refers to exactly one thing without further qualification.
    ///
    /// A name that is one of the scope's own enclosing namespaces always resolves. Otherwise the name is looked up
    /// as a nested path from the scope's namespace and from each of its ancestors up to the root. A built-in class
    /// resolves only when none of those lookups succeed; anything else resolves only when exactly one does.
    pub fn resolvable(&self, name: &str, scope: EntityRef<'_>) -> bool {
        let context = scope.namespace();

        if !name.contains(ROOT_SCOPE) && context.path().split(ROOT_SCOPE).any(|component| component == name) {
            return true;
        }

        let components: Vec<&str> = name.split(ROOT_SCOPE).collect();
        let mut matching_paths = BTreeSet::new();
        let mut current = Some(context);
        while let Some(ancestor) = current {
            let followed = components
                .iter()
                .try_fold(ancestor, |at, component| at.child(component, LOOKUP_KINDS));
            if let Some(found) = followed {
                matching_paths.insert(found.path());
            }
            if ancestor.is_root() {
                break;
            }
            current = ancestor.parent();
        }

        let builtin = self.is_builtin(name);
        (builtin && matching_paths.is_empty()) || (matching_paths.len() == 1 && !builtin)
    }

    #[tracing::instrument(skip_all, fields(ruby = %self.options.ruby_version))]
    fn build_index(&self) -> NameIndex {
        let mut index = NameIndex::new();

        for entity in self.registry.namespaces() {
            insert(&mut index, entity.name(), entity.path());
        }
        for name in self.builtin_classes() {
            insert(&mut index, name, name.to_string());
        }
        let corpus_and_builtins = index.len();

        self.load_dependency_names(&mut index);

        tracing::debug!(
            names = index.len(),
            from_dependencies = index.len() - corpus_and_builtins,
            "resolver index built"
        );
        index
    }

    fn load_dependency_names(&self, index: &mut NameIndex) {
        let mut files = Vec::new();

        if let Some(collection) = &self.options.rbs_collection {
            if collection.is_dir() {
                files.extend(signatures::discover(collection, SignatureFormat::Rbs));
            } else {
                self.sink.emit(Diagnostic::warn(MISSING_COLLECTION_WARNING));
            }
        }

        for gem in &self.options.gem_dirs {
            for format in [SignatureFormat::Rbs, SignatureFormat::Rbi] {
                let dir = gem.join(format.gem_subdir());
                if dir.is_dir() {
                    files.extend(signatures::discover(&dir, format));
                }
            }
        }

        for file in files {
            self.load_signature_file(&file, index);
        }
    }

    fn load_signature_file(&self, file: &Path, index: &mut NameIndex) {
        match signatures::load_file(file) {
            Ok(decls) => {
                for harvested in signatures::harvest(&decls) {
                    insert(index, &harvested.name, harvested.path);
                }
            }
            Err(err) => {
                self.sink
                    .emit(Diagnostic::warn(format!("Skipping unreadable signature file: {err}")));
            }
        }
    }
}

fn insert(index: &mut NameIndex, name: &str, path: String) {
    index.entry(name.to_string()).or_default().insert(path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::diagnostics::{CollectingSink, DiagnosticKind, NullSink};

    fn corpus(paths: &[(&str, EntityKind)]) -> Registry {
        let mut registry = Registry::new();
        for (path, kind) in paths {
            registry.define_path(path, *kind);
        }
        registry
    }

    #[test]
    fn test_prepare_is_idempotent_and_clear_resets() {
        let registry = corpus(&[("A::B", EntityKind::Class)]);
        let mut resolver = Resolver::new(&registry, ResolverOptions::default(), &NullSink);
        assert!(!resolver.is_prepared());
        resolver.prepare();
        let known = resolver.known_names();
        resolver.prepare();
        assert_eq!(resolver.known_names(), known);
        resolver.clear();
        assert!(!resolver.is_prepared());
        assert_eq!(resolver.path_for("B").as_deref(), Some("A::B"));
    }

    #[test]
    fn test_suffix_match_respects_component_boundaries() {
        let registry = corpus(&[("Outer::MyFoo", EntityKind::Class), ("Other::Foo", EntityKind::Class)]);
        let resolver = Resolver::new(&registry, ResolverOptions::default(), &NullSink);
        assert_eq!(resolver.path_for("Foo").as_deref(), Some("Other::Foo"));
        assert_eq!(resolver.path_for("Other::Foo").as_deref(), Some("Other::Foo"));
        assert!(resolver.paths_for("er::Foo").is_empty());
    }

    #[test]
    fn test_builtins_follow_ruby_version() {
        let registry = Registry::new();
        let old = Resolver::new(
            &registry,
            ResolverOptions::default().with_ruby_version(RubyVersion::new(2, 7)),
            &NullSink,
        );
        assert_eq!(old.path_for("SortedSet").as_deref(), Some("SortedSet"));

        let new = Resolver::new(&registry, ResolverOptions::default(), &NullSink);
        assert_eq!(new.path_for("SortedSet"), None);
        assert!(new.builtin_classes().any(|c| c == "Integer"));
    }

    #[test]
    fn test_missing_collection_degrades_to_warning() {
        let registry = corpus(&[("A", EntityKind::Module)]);
        let sink = CollectingSink::new();
        let resolver = Resolver::new(
            &registry,
            ResolverOptions::default().with_rbs_collection("/nonexistent/sord/.gem_rbs_collection"),
            &sink,
        );
        assert_eq!(resolver.path_for("A").as_deref(), Some("A"));
        let warnings = sink.of_kind(DiagnosticKind::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, MISSING_COLLECTION_WARNING);
    }

    #[test]
    fn test_resolvable_through_method_scope() {
        let registry = corpus(&[("A::B#run", EntityKind::Method), ("A::C", EntityKind::Class)]);
        let resolver = Resolver::new(&registry, ResolverOptions::default(), &NullSink);
        let scope = registry.at("A::B#run").expect("method exists");
        assert!(resolver.resolvable("C", scope));
        assert!(resolver.resolvable("A::C", scope));
        assert!(!resolver.resolvable("D", scope));
    }
}
