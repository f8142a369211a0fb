//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use crate::frontend::converter::{Annotation, ConverterConfig, TypeConverter};
use crate::frontend::diagnostics::{
    CollectingSink, DiagnosticKind, DiagnosticSink, FanoutSink, FilteredSink, TracingSink,
};
use crate::frontend::registry::{EntityRef, Registry};
use crate::frontend::resolver::{Resolver, ResolverOptions};
use sord_core::RubyVersion;

use super::{CliError, CliResult, CorpusArgs, ExitCode, MessageArgs};

// ============================================================================
// Corpus setup (shared between convert and resolve)
// ============================================================================

fn load_registry(args: &CorpusArgs) -> CliResult<Registry> {
    match &args.decls {
        Some(path) => Registry::load(path).map_err(|e| CliError::usage(format!("Error loading declarations: {e}"))),
        None => Ok(Registry::new()),
    }
}

fn resolver_options(args: &CorpusArgs) -> CliResult<ResolverOptions> {
    let mut options = ResolverOptions::default();
    if let Some(text) = &args.ruby {
        let version =
            RubyVersion::parse(text).ok_or_else(|| CliError::usage(format!("Error: invalid Ruby version {text:?}")))?;
        options = options.with_ruby_version(version);
    }
    if let Some(collection) = &args.collection {
        options = options.with_rbs_collection(collection);
    }
    for dir in &args.sig_dirs {
        options = options.with_gem_dir(dir);
    }
    Ok(options)
}

fn lookup_scope<'r>(registry: &'r Registry, scope: Option<&str>) -> CliResult<Option<EntityRef<'r>>> {
    let Some(path) = scope else {
        return Ok(None);
    };
    registry
        .at(path)
        .map(Some)
        .ok_or_else(|| CliError::usage(format!("Error: scope `{path}` is not declared in the corpus")))
}

fn parse_kinds(names: &[String], flag: &str) -> CliResult<Vec<DiagnosticKind>> {
    names
        .iter()
        .map(|name| {
            DiagnosticKind::from_name(&name.trim().to_lowercase()).ok_or_else(|| {
                let valid: Vec<String> = DiagnosticKind::ALL.iter().map(ToString::to_string).collect();
                CliError::usage(format!(
                    "Error: {name:?} on your --{flag} list is not a message kind. Valid options are: {}",
                    valid.join(", ")
                ))
            })
        })
        .collect()
}

/// The diagnostic kinds that get logged.
fn enabled_kinds(args: &MessageArgs) -> CliResult<Vec<DiagnosticKind>> {
    if let Some(names) = &args.include_messages {
        let mut kinds = parse_kinds(names, "include-messages")?;
        if !kinds.contains(&DiagnosticKind::Done) {
            kinds.push(DiagnosticKind::Done);
        }
        return Ok(kinds);
    }
    if let Some(names) = &args.exclude_messages {
        let excluded = parse_kinds(names, "exclude-messages")?;
        return Ok(DiagnosticKind::ALL.into_iter().filter(|k| !excluded.contains(k)).collect());
    }
    Ok(DiagnosticKind::ALL.to_vec())
}

fn print_summary(collected: &CollectingSink) {
    let warnings = collected.count(DiagnosticKind::Warn);
    let inferred = collected.count(DiagnosticKind::Infer);
    let ducks = collected.count(DiagnosticKind::Duck);
    if warnings + inferred + ducks > 0 {
        eprintln!("{warnings} warning(s), {inferred} inferred, {ducks} duck type(s)");
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Convert one annotation and print its description. Fails when the result holds an error placeholder.
pub fn convert(
    types: &[String],
    corpus: &CorpusArgs,
    messages: &MessageArgs,
    config: ConverterConfig,
) -> CliResult<ExitCode> {
    let registry = load_registry(corpus)?;
    let options = resolver_options(corpus)?;
    let scope = lookup_scope(&registry, corpus.scope.as_deref())?;

    let collected = CollectingSink::new();
    let logged = FilteredSink::new(&TracingSink, enabled_kinds(messages)?);
    let sink = FanoutSink::new(vec![&collected as &dyn DiagnosticSink, &logged]);

    let resolver = Resolver::new(&registry, options, &sink);
    let converter = TypeConverter::new(&resolver, config, &sink);

    let annotation = match types {
        [single] => Annotation::One(single.clone()),
        many => Annotation::Many(many.to_vec()),
    };
    let node = converter.convert(&annotation, scope);

    println!("{node}");
    print_summary(&collected);

    Ok(if node.contains_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Print whether `name` resolves from the scope and which full path it would be inferred as.
pub fn resolve(name: &str, corpus: &CorpusArgs, messages: &MessageArgs) -> CliResult<ExitCode> {
    let registry = load_registry(corpus)?;
    let options = resolver_options(corpus)?;
    let scope = lookup_scope(&registry, corpus.scope.as_deref())?.unwrap_or_else(|| registry.root());

    let sink = FilteredSink::new(&TracingSink, enabled_kinds(messages)?);
    let resolver = Resolver::new(&registry, options, &sink);
    resolver.prepare();

    println!("resolvable: {}", resolver.resolvable(name, scope));
    match resolver.path_for(name) {
        Some(path) => println!("path: {path}"),
        None => {
            let candidates = resolver.paths_for(name);
            if candidates.is_empty() {
                println!("path: <unknown>");
            } else {
                let listed: Vec<&str> = candidates.iter().map(String::as_str).collect();
                println!("path: <ambiguous> ({})", listed.join(", "));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
