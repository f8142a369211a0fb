//! Syntax layer for Sord: type nodes, the parameter splitter and annotation shape recognizers.
//!
//! This crate is dependency-light and shared by the converter, the CLI and the fuzz target.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not resolve names and never consults the documented project.
//!   Deciding what `Foo` refers to is the resolver's job in the `sord` crate.
//! - Container spellings come from `sord_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use sord_syntax::shape::{self, Shape};
//! use sord_syntax::split::split_type_parameters;
//!
//! assert_eq!(shape::classify("Foo::Bar"), Shape::Identifier("Foo::Bar"));
//! assert_eq!(split_type_parameters("String, Integer").len(), 2);
//! ```

pub mod ast;
pub mod shape;
pub mod split;

pub use ast::{GenericBase, TypeNode};
