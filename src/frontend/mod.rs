//! Sord frontend
//!
//! This module contains everything between a raw YARD annotation and a structured type:
//! - `registry`: the documentation corpus and scope handles
//! - `diagnostics`: diagnostic events and sinks
//! - `signatures`: names harvested from dependency RBS/RBI files
//! - `resolver`: name resolution against the corpus, built-in classes and dependencies
//! - `converter`: annotation text to [`TypeNode`]

// Syntax components are provided by the shared sord_syntax crate.
pub use sord_syntax::{GenericBase, TypeNode, shape, split};

pub mod converter;
pub mod diagnostics;
pub mod registry;
pub mod resolver;
pub mod signatures;
