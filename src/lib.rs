#![forbid(unsafe_code)]
//! Sord: YARD type annotations to Sorbet RBI and RBS types.
//!
//! The crate turns the free-text types found in YARD documentation (`Array<String>`, `Hash{Symbol => Integer}`,
//! `#read`, ...) into [`TypeNode`] trees that a signature emitter can render for either dialect. Bare constant names
//! are checked against the documented corpus, the Ruby built-in classes and any dependency signatures, so an
//! annotation written as `Target` can come out as `A::B::Target`.
//!
//! ## Panic Policy
//!
//! - **Production code**: malformed annotations are values, never panics. I/O boundaries return `Result`. The `cli`
//!   module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod frontend;

pub use frontend::converter::{Annotation, ConverterConfig, Dialect, TypeConverter};
pub use frontend::diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use frontend::registry::{EntityKind, EntityRef, Registry};
pub use frontend::resolver::{Resolver, ResolverOptions};
pub use sord_core::RubyVersion;
pub use sord_syntax::{GenericBase, TypeNode};
