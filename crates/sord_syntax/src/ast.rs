//! Structured type nodes produced by the converter.
//!
//! A [`TypeNode`] is a plain value: nodes are built fresh for every annotation, never shared or mutated, and compared
//! structurally. The smart constructors ([`TypeNode::union`], [`TypeNode::nilable`]) are the only way the converter
//! builds unions and nilables, and they keep the tree normalized:
//!
//! - a union never holds another union as a direct member, never holds duplicates and never has a single member;
//! - a nilable never wraps another nilable, and `untyped` already admits `nil` so it is never wrapped.
//!
//! `Display` renders a compact, dialect-neutral description (`Array<String>`, `?Integer`, `String | Symbol`) used by
//! diagnostics, the CLI and error placeholders.

use std::fmt;

use sord_core::lang::containers::{self, ContainerId};
use sord_core::strings;

/// A converted annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    /// Unknown or unspecified.
    Untyped,
    /// `true | false`.
    Boolean,
    /// The enclosing declaration's type.
    SelfType,
    /// A constant path or type name, emitted verbatim.
    Raw(String),
    /// `T` or `nil`.
    Nilable(Box<TypeNode>),
    /// Two or more alternatives, in first-seen order.
    Union(Vec<TypeNode>),
    /// A parameterized container.
    Generic(GenericBase, Vec<TypeNode>),
    /// Fixed-size heterogeneous sequence.
    Tuple(Vec<TypeNode>),
    /// Placeholder for text no rule could parse. Holds the offending text.
    Error(String),
}

/// The container half of a [`TypeNode::Generic`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericBase {
    /// One of the registry containers (`Array`, `Hash`, `Class`, ...).
    Builtin(ContainerId),
    /// A user-defined generic or a structural interface, e.g. `Wrapper` in `Wrapper<String>`.
    Named(Box<TypeNode>),
}

impl TypeNode {
    pub fn raw(name: impl Into<String>) -> Self {
        TypeNode::Raw(name.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        TypeNode::Error(text.into())
    }

    /// Wrap `inner` as “or nil”, keeping at most one nilable layer.
    pub fn nilable(inner: TypeNode) -> Self {
        match inner {
            TypeNode::Untyped => TypeNode::Untyped,
            TypeNode::Nilable(_) => inner,
            other => TypeNode::Nilable(Box::new(other)),
        }
    }

    /// Build a union, flattening nested unions and dropping structural duplicates.
    ///
    /// Zero members collapse to `untyped`, one member collapses to itself.
    pub fn union(members: impl IntoIterator<Item = TypeNode>) -> Self {
        let mut flat: Vec<TypeNode> = Vec::new();
        for member in members {
            match member {
                TypeNode::Union(inner) => {
                    for m in inner {
                        push_unique(&mut flat, m);
                    }
                }
                other => push_unique(&mut flat, other),
            }
        }
        match flat.len() {
            0 => TypeNode::Untyped,
            1 => flat.pop().unwrap_or(TypeNode::Untyped),
            _ => TypeNode::Union(flat),
        }
    }

    pub fn container(id: ContainerId, args: Vec<TypeNode>) -> Self {
        TypeNode::Generic(GenericBase::Builtin(id), args)
    }

    pub fn array(element: TypeNode) -> Self {
        Self::container(ContainerId::Array, vec![element])
    }

    pub fn hash(key: TypeNode, value: TypeNode) -> Self {
        Self::container(ContainerId::Hash, vec![key, value])
    }

    pub fn class_of(instance: TypeNode) -> Self {
        Self::container(ContainerId::Class, vec![instance])
    }

    /// A user-defined generic application such as `Wrapper<String>`.
    pub fn generic(base: TypeNode, args: Vec<TypeNode>) -> Self {
        TypeNode::Generic(GenericBase::Named(Box::new(base)), args)
    }

    pub fn tuple(elements: Vec<TypeNode>) -> Self {
        TypeNode::Tuple(elements)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TypeNode::Error(_))
    }

    /// Whether this node or any node below it is an error placeholder.
    pub fn contains_error(&self) -> bool {
        match self {
            TypeNode::Error(_) => true,
            TypeNode::Nilable(inner) => inner.contains_error(),
            TypeNode::Union(members) | TypeNode::Tuple(members) => members.iter().any(TypeNode::contains_error),
            TypeNode::Generic(base, args) => {
                let base_err = match base {
                    GenericBase::Builtin(_) => false,
                    GenericBase::Named(node) => node.contains_error(),
                };
                base_err || args.iter().any(TypeNode::contains_error)
            }
            TypeNode::Untyped | TypeNode::Boolean | TypeNode::SelfType | TypeNode::Raw(_) => false,
        }
    }

    /// The identifier an emitter should print for an error placeholder, e.g. `SORD_ERROR_foobar`.
    pub fn fallback_ident(&self) -> Option<String> {
        match self {
            TypeNode::Error(text) => Some(strings::error_constant(text)),
            _ => None,
        }
    }
}

fn push_unique(members: &mut Vec<TypeNode>, node: TypeNode) {
    if !members.contains(&node) {
        members.push(node);
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeNode]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Untyped => write!(f, "untyped"),
            TypeNode::Boolean => write!(f, "bool"),
            TypeNode::SelfType => write!(f, "self"),
            TypeNode::Raw(name) => write!(f, "{name}"),
            TypeNode::Nilable(inner) => match inner.as_ref() {
                TypeNode::Union(_) => write!(f, "?({inner})"),
                _ => write!(f, "?{inner}"),
            },
            TypeNode::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            TypeNode::Generic(base, args) => {
                match base {
                    GenericBase::Builtin(id) => write!(f, "{}", containers::as_str(*id))?,
                    GenericBase::Named(node) => write!(f, "{node}")?,
                }
                write!(f, "<")?;
                write_list(f, args)?;
                write!(f, ">")
            }
            TypeNode::Tuple(elements) => {
                write!(f, "[")?;
                write_list(f, elements)?;
                write!(f, "]")
            }
            TypeNode::Error(text) => write!(f, "{}", strings::error_constant(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> TypeNode {
        TypeNode::raw(name)
    }

    #[test]
    fn test_union_collapses_single_member() {
        assert_eq!(TypeNode::union([raw("String")]), raw("String"));
        assert_eq!(TypeNode::union([raw("String"), raw("String")]), raw("String"));
        assert_eq!(TypeNode::union(Vec::new()), TypeNode::Untyped);
    }

    #[test]
    fn test_union_flattens_nested_unions() {
        let inner = TypeNode::union([raw("A"), raw("B")]);
        let outer = TypeNode::union([inner, raw("C"), raw("A")]);
        assert_eq!(outer, TypeNode::Union(vec![raw("A"), raw("B"), raw("C")]));
    }

    #[test]
    fn test_nilable_wraps_once() {
        let once = TypeNode::nilable(raw("String"));
        let twice = TypeNode::nilable(once.clone());
        assert_eq!(once, twice);
        assert_eq!(TypeNode::nilable(TypeNode::Untyped), TypeNode::Untyped);
    }

    #[test]
    fn test_fallback_ident_only_for_errors() {
        assert_eq!(TypeNode::error("foo&bar").fallback_ident().as_deref(), Some("SORD_ERROR_foobar"));
        assert_eq!(raw("Foo").fallback_ident(), None);
    }

    #[test]
    fn test_contains_error_looks_through_containers() {
        let node = TypeNode::hash(raw("Symbol"), TypeNode::array(TypeNode::error("?")));
        assert!(node.contains_error());
        assert!(!TypeNode::hash(raw("Symbol"), raw("String")).contains_error());
        assert!(TypeNode::generic(TypeNode::error("x"), vec![]).contains_error());
    }

    #[test]
    fn test_describe_renderings() {
        insta::assert_snapshot!(TypeNode::array(raw("String")), @"Array<String>");
        insta::assert_snapshot!(
            TypeNode::hash(TypeNode::union([raw("String"), raw("Symbol")]), TypeNode::Untyped),
            @"Hash<String | Symbol, untyped>"
        );
        insta::assert_snapshot!(
            TypeNode::nilable(TypeNode::union([raw("String"), TypeNode::Boolean])),
            @"?(String | bool)"
        );
        insta::assert_snapshot!(
            TypeNode::tuple(vec![raw("String"), TypeNode::tuple(vec![TypeNode::SelfType])]),
            @"[String, [self]]"
        );
        insta::assert_snapshot!(
            TypeNode::generic(raw("Wrapper"), vec![TypeNode::class_of(raw("Foo"))]),
            @"Wrapper<Class<Foo>>"
        );
        insta::assert_snapshot!(TypeNode::error("Hash{String"), @"SORD_ERROR_HashString");
    }
}
