//! Provide the shared, pure type vocabulary used by the Sord converter and resolver.
//!
//! This crate is intentionally small and dependency-free. It contains registry tables that both the syntax layer
//! (`sord_syntax`) and the resolver/converter (`sord`) consult, so spellings like `Array` or `Hash` live in exactly
//! one place.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, no converter-specific types.
//! - Current scope: generic container names, literal tokens (`nil`, `self`, boolean spellings), the version-tagged
//!   builtin class table, the duck-type interface table, and identifier sanitizing.

pub mod lang;
pub mod strings;

pub use lang::registry::RubyVersion;
