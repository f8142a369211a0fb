//! CLI module for Sord
//!
//! ## Commands
//!
//! - `convert <TYPE>...` - Convert a YARD annotation and print the resulting type
//! - `resolve <NAME>` - Show how a constant name resolves against the corpus
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Bad input to the CLI itself (unreadable corpus, unknown scope).
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Convert YARD type annotations into Sorbet and RBS types
#[derive(Parser, Debug)]
#[command(name = "sord")]
#[command(version = VERSION)]
#[command(about = "Convert YARD type annotations into Sorbet and RBS types", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where names come from: the documented corpus and dependency signatures.
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// Declaration list describing the documented corpus (`module A`, `class A::B`, ...)
    #[arg(long = "decls", value_name = "FILE")]
    pub decls: Option<PathBuf>,

    /// Path of the entity the annotation belongs to, e.g. `A::B#run`
    #[arg(long, value_name = "PATH")]
    pub scope: Option<String>,

    /// Dependency directory containing `sig/` and/or `rbi/` signatures (repeatable)
    #[arg(long = "sig-dir", value_name = "DIR")]
    pub sig_dirs: Vec<PathBuf>,

    /// Installed RBS collection directory
    #[arg(long, value_name = "DIR")]
    pub collection: Option<PathBuf>,

    /// Ruby version whose built-in classes are known (e.g. 3.2)
    #[arg(long, value_name = "VERSION")]
    pub ruby: Option<String>,
}

/// Which diagnostic kinds are logged. Kinds are `warn`, `info`, `duck`, `infer`, `omit`, `done`, `error`.
#[derive(Args, Debug, Clone, Default)]
pub struct MessageArgs {
    /// Only log these kinds (comma-separated); `done` is always kept
    #[arg(long, value_name = "KINDS", value_delimiter = ',', conflicts_with = "exclude_messages")]
    pub include_messages: Option<Vec<String>>,

    /// Log every kind except these (comma-separated)
    #[arg(long, value_name = "KINDS", value_delimiter = ',')]
    pub exclude_messages: Option<Vec<String>>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a YARD annotation; several TYPE arguments form one list of alternatives
    Convert {
        /// Annotation text, e.g. 'Hash{Symbol => String}'
        #[arg(value_name = "TYPE", required = true)]
        types: Vec<String>,

        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        messages: MessageArgs,

        /// Target RBS instead of Sorbet RBI
        #[arg(long)]
        rbs: bool,

        /// Use untyped instead of SORD_ERROR_ constants for unknown types
        #[arg(long)]
        replace_errors_with_untyped: bool,

        /// Use untyped when a constant cannot be resolved
        #[arg(long)]
        replace_unresolved_with_untyped: bool,
    },

    /// Show whether a constant name resolves from a scope, and what it would be inferred as
    Resolve {
        /// Constant name, e.g. `Target` or `A::B`
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        messages: MessageArgs,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Convert {
            types,
            corpus,
            messages,
            rbs,
            replace_errors_with_untyped,
            replace_unresolved_with_untyped,
        } => {
            let config = crate::ConverterConfig::new()
                .with_dialect(if rbs { crate::Dialect::Rbs } else { crate::Dialect::Rbi })
                .with_replace_errors_with_untyped(replace_errors_with_untyped)
                .with_replace_unresolved_with_untyped(replace_unresolved_with_untyped);
            commands::convert(&types, &corpus, &messages, config)
        }
        Command::Resolve { name, corpus, messages } => commands::resolve(&name, &corpus, &messages),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::try_parse_from(["sord", "convert", "--rbs", "Array<String>"]).unwrap();
        if let Command::Convert { types, rbs, corpus, .. } = cli.command {
            assert_eq!(types, vec!["Array<String>"]);
            assert!(rbs);
            assert!(corpus.decls.is_none());
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_cli_parse_convert_list_and_corpus() {
        let cli = Cli::try_parse_from([
            "sord",
            "convert",
            "--decls",
            "corpus.txt",
            "--scope",
            "A::B#run",
            "--sig-dir",
            "vendor/a",
            "--sig-dir",
            "vendor/b",
            "--replace-unresolved-with-untyped",
            "String",
            "nil",
        ])
        .unwrap();
        if let Command::Convert {
            types,
            corpus,
            replace_unresolved_with_untyped,
            replace_errors_with_untyped,
            ..
        } = cli.command
        {
            assert_eq!(types, vec!["String", "nil"]);
            assert_eq!(corpus.scope.as_deref(), Some("A::B#run"));
            assert_eq!(corpus.sig_dirs.len(), 2);
            assert!(replace_unresolved_with_untyped);
            assert!(!replace_errors_with_untyped);
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_cli_convert_requires_a_type() {
        assert!(Cli::try_parse_from(["sord", "convert"]).is_err());
    }

    #[test]
    fn test_cli_parse_message_filters() {
        let cli = Cli::try_parse_from(["sord", "convert", "--include-messages", "warn,infer", "String"]).unwrap();
        if let Command::Convert { messages, .. } = cli.command {
            assert_eq!(messages.include_messages, Some(vec!["warn".to_string(), "infer".to_string()]));
            assert!(messages.exclude_messages.is_none());
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_cli_message_filters_conflict() {
        let result = Cli::try_parse_from([
            "sord",
            "resolve",
            "--include-messages",
            "warn",
            "--exclude-messages",
            "duck",
            "Foo",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_resolve() {
        let cli = Cli::try_parse_from(["sord", "resolve", "--ruby", "2.7", "SortedSet"]).unwrap();
        if let Command::Resolve { name, corpus, .. } = cli.command {
            assert_eq!(name, "SortedSet");
            assert_eq!(corpus.ruby.as_deref(), Some("2.7"));
        } else {
            panic!("Expected Resolve command");
        }
    }
}
