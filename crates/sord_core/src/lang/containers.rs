//! Builtin generic container vocabulary.
//!
//! This registry covers the container names that carry special meaning when they appear in an annotation, either
//! bare (`Array`, `Hash`) or parameterized (`Array<String>`, `Hash{Symbol => String}`, `Class<Foo>`).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `array` is just a (suspicious) identifier.
//! - [`Arity`] decides what happens to surplus parameters: single-argument containers fold them into a union,
//!   `Hash` rejects anything but two, `Class` fans out into one `Class` per argument.
//!
//! ## Examples
//! ```rust
//! use sord_core::lang::containers::{self, Arity, ContainerId};
//!
//! assert_eq!(containers::from_str("Set"), Some(ContainerId::Set));
//! assert_eq!(containers::arity(ContainerId::Range), Arity::Single);
//! assert_eq!(containers::arity(ContainerId::Hash), Arity::KeyValue);
//! assert_eq!(containers::from_str("Wrapper"), None);
//! ```

use super::registry::Stability;

/// Stable identifier for builtin generic containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerId {
    Array,
    Set,
    Enumerable,
    Enumerator,
    Range,
    Hash,
    Class,
}

/// How many type parameters a container takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly one element type; extra parameters are coalesced into a union.
    Single,
    /// A key and a value type; any other count is an error.
    KeyValue,
    /// One instance type; several parameters become a union of `Class` types.
    Singleton,
}

/// Metadata for a builtin generic container.
#[derive(Debug, Clone, Copy)]
pub struct ContainerInfo {
    pub id: ContainerId,
    pub canonical: &'static str,
    pub arity: Arity,
    pub description: &'static str,
    pub stability: Stability,
}

/// Registry of builtin generic containers.
pub const CONTAINERS: &[ContainerInfo] = &[
    info(ContainerId::Array, "Array", Arity::Single, "Ordered, growable list."),
    info(ContainerId::Set, "Set", Arity::Single, "Unordered collection of unique elements."),
    info(
        ContainerId::Enumerable,
        "Enumerable",
        Arity::Single,
        "Anything that yields elements through `each`.",
    ),
    info(
        ContainerId::Enumerator,
        "Enumerator",
        Arity::Single,
        "External or lazy iterator over elements.",
    ),
    info(ContainerId::Range, "Range", Arity::Single, "Interval between two endpoints."),
    info(ContainerId::Hash, "Hash", Arity::KeyValue, "Key/value map."),
    info(
        ContainerId::Class,
        "Class",
        Arity::Singleton,
        "The class object of a type rather than an instance of it.",
    ),
];

/// Resolve a container name to a [`ContainerId`].
///
/// ## Returns
/// - `Some(ContainerId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<ContainerId> {
    CONTAINERS.iter().find(|c| c.canonical == name).map(|c| c.id)
}

/// Return the canonical spelling for a container (e.g. `"Array"`).
pub fn as_str(id: ContainerId) -> &'static str {
    info_for(id).canonical
}

/// Return the arity class of a container.
pub fn arity(id: ContainerId) -> Arity {
    info_for(id).arity
}

/// Return the full metadata entry for a container.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ContainerId) -> &'static ContainerInfo {
    CONTAINERS
        .iter()
        .find(|c| c.id == id)
        .expect("container info missing")
}

const fn info(id: ContainerId, canonical: &'static str, arity: Arity, description: &'static str) -> ContainerInfo {
    ContainerInfo {
        id,
        canonical,
        arity,
        description,
        stability: Stability::Stable,
    }
}
