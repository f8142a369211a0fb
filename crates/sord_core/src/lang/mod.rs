//! Sord type vocabulary registries.
//!
//! This module is the “front door” for type-level vocabulary: generic container names, literal tokens, host builtin
//! class names and duck-type interfaces.
//!
//! The design goal is to avoid stringly-typed checks scattered across the converter. Callers work with **stable IDs**
//! (e.g. [`containers::ContainerId`]) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no type nodes, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use sord_core::lang::containers::{self, ContainerId};
//!
//! assert_eq!(containers::from_str("Array"), Some(ContainerId::Array));
//! assert_eq!(containers::as_str(ContainerId::Hash), "Hash");
//! ```

pub mod builtins;
pub mod containers;
pub mod duck;
pub mod literals;
pub mod registry;
