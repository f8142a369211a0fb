//! Shareable metadata for `sord_core::lang` registries.
//!
//! This submodule provides the small, dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in `const` tables.
//!
//! ## See also
//! - [`crate::lang::containers`]
//! - [`crate::lang::builtins`]
//! - [`crate::lang::duck`]

use std::fmt;

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use sord_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}

/// A host Ruby version, used to tag builtin class availability.
///
/// Only `major.minor` matters for the builtin table; patch releases never add or remove core classes.
///
/// ## Examples
/// ```rust
/// use sord_core::RubyVersion;
///
/// assert!(RubyVersion::new(3, 2) > RubyVersion::new(2, 7));
/// assert_eq!(RubyVersion::parse("3.1.4"), Some(RubyVersion::new(3, 1)));
/// assert_eq!(RubyVersion::new(3, 3).to_string(), "3.3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RubyVersion {
    pub major: u8,
    pub minor: u8,
}

impl RubyVersion {
    /// The version assumed when the caller does not pick one.
    pub const DEFAULT: RubyVersion = RubyVersion::new(3, 3);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Parse `"3"`, `"3.2"` or `"3.2.1"`; anything else is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(minor) => minor.parse().ok()?,
            None => 0,
        };
        if let Some(patch) = parts.next() {
            patch.parse::<u16>().ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        Some(Self { major, minor })
    }
}

impl Default for RubyVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RubyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
