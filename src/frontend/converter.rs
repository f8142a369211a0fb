//! Conversion of YARD type annotations into [`TypeNode`] trees.
//!
//! Every annotation ends up as a value: text that no rule understands becomes a [`TypeNode::Error`] placeholder (or
//! `untyped`, see [`ConverterConfig::replace_errors_with_untyped`]) and a warning. Nothing here returns `Result`.
//!
//! ## Rule order
//! 1. absent → `untyped`
//! 2. list of alternatives → union, `nil` entries turn into a nilable wrapper
//! 3. boolean spellings → `bool`
//! 4. `self` inside a scope → `self`
//! 5. `nil` → `NilClass` (RBI) / `nil` (RBS)
//! 6. identifiers → resolved through the [`Resolver`]
//! 7. duck types → structural interface (RBS) or `untyped`
//! 8. generics, 9. ordered lists, 10. shorthand hashes, 11. shorthand arrays, 12. literals
//!
//! Rules 6 to 12 follow the shape recognized by [`sord_syntax::shape::classify`].
//!
//! Brackets nested deeper than [`MAX_NESTING`] levels are not looked into; the remaining text takes the error path.

use sord_core::lang::containers::{self, Arity};
use sord_core::lang::{duck, literals};
use sord_core::strings;
use sord_syntax::TypeNode;
use sord_syntax::shape::{self, Shape};
use sord_syntax::split::split_type_parameters;

use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::registry::EntityRef;
use super::resolver::Resolver;

/// How many bracket levels a single annotation may nest.
pub const MAX_NESTING: usize = 128;

/// Which signature flavor the converted types are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Sorbet RBI.
    #[default]
    Rbi,
    /// RBS.
    Rbs,
}

/// Converter settings.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Emit `untyped` instead of an error placeholder for text that is not a type.
    pub replace_errors_with_untyped: bool,
    /// Emit `untyped` instead of the name as written when a constant cannot be resolved.
    pub replace_unresolved_with_untyped: bool,
    pub dialect: Dialect,
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replace_errors_with_untyped(mut self, replace: bool) -> Self {
        self.replace_errors_with_untyped = replace;
        self
    }

    pub fn with_replace_unresolved_with_untyped(mut self, replace: bool) -> Self {
        self.replace_unresolved_with_untyped = replace;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

/// The annotation attached to one parameter, return value, attribute or constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// No type was given.
    Absent,
    /// A single tag, e.g. `Array<String>`.
    One(String),
    /// Several tags on the same declaration, each one an alternative.
    Many(Vec<String>),
}

impl From<&str> for Annotation {
    fn from(text: &str) -> Self {
        Annotation::One(text.to_string())
    }
}

impl From<String> for Annotation {
    fn from(text: String) -> Self {
        Annotation::One(text)
    }
}

impl From<Vec<String>> for Annotation {
    fn from(texts: Vec<String>) -> Self {
        Annotation::Many(texts)
    }
}

impl From<&[&str]> for Annotation {
    fn from(texts: &[&str]) -> Self {
        Annotation::Many(texts.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Annotation {
    fn from(texts: [&str; N]) -> Self {
        Annotation::Many(texts.iter().map(|t| t.to_string()).collect())
    }
}

impl<T: Into<Annotation>> From<Option<T>> for Annotation {
    fn from(value: Option<T>) -> Self {
        value.map_or(Annotation::Absent, Into::into)
    }
}

/// Converts annotations, resolving bare names against a [`Resolver`] and reporting through a [`DiagnosticSink`].
pub struct TypeConverter<'a> {
    resolver: &'a Resolver<'a>,
    config: ConverterConfig,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> TypeConverter<'a> {
    pub fn new(resolver: &'a Resolver<'a>, config: ConverterConfig, sink: &'a dyn DiagnosticSink) -> Self {
        Self { resolver, config, sink }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert one annotation. `scope` is the documented entity the annotation belongs to; without it no name
    /// resolution happens and `self` is not recognized.
    #[tracing::instrument(skip_all, fields(scope = ?scope.map(|s| s.path())))]
    pub fn convert(&self, annotation: &Annotation, scope: Option<EntityRef<'_>>) -> TypeNode {
        match annotation {
            Annotation::Absent => TypeNode::Untyped,
            Annotation::One(text) => self.convert_text(text, scope, 0),
            Annotation::Many(texts) => self.convert_list(texts, scope),
        }
    }

    /// Shorthand for converting a single tag.
    pub fn convert_str(&self, text: &str, scope: Option<EntityRef<'_>>) -> TypeNode {
        self.convert(&Annotation::from(text), scope)
    }

    fn convert_list(&self, texts: &[String], scope: Option<EntityRef<'_>>) -> TypeNode {
        if is_boolean_pair(texts) {
            return TypeNode::Boolean;
        }

        let has_nil = texts.iter().any(|t| literals::is_nil(t.trim()));
        let members = texts
            .iter()
            .filter(|t| !literals::is_nil(t.trim()))
            .map(|t| self.convert_text(t, scope, 0));
        let union = TypeNode::union(members);
        if has_nil { TypeNode::nilable(union) } else { union }
    }

    fn convert_text(&self, text: &str, scope: Option<EntityRef<'_>>, depth: usize) -> TypeNode {
        let text = text.trim();

        if depth > MAX_NESTING {
            return self.error(text, format!("type nested more than {MAX_NESTING} levels deep"), scope);
        }

        if literals::is_boolean(text) {
            return TypeNode::Boolean;
        }
        if literals::is_self(text) && scope.is_some() {
            return TypeNode::SelfType;
        }
        if literals::is_nil(text) {
            return match self.config.dialect {
                Dialect::Rbi => TypeNode::raw(literals::NIL_CLASS),
                Dialect::Rbs => TypeNode::raw(literals::NIL),
            };
        }

        match shape::classify(text) {
            Shape::Identifier(name) => self.convert_identifier(name, scope),
            Shape::DuckType(methods) => self.convert_duck_type(text, &methods, scope),
            Shape::Generic { name, params } => self.convert_generic(text, name, params, scope, depth),
            Shape::OrderedList(params) => TypeNode::tuple(self.convert_params(params, scope, depth)),
            Shape::ShorthandHash(params) => {
                let params = self.convert_params(params, scope, depth);
                self.hash_of(text, params, scope)
            }
            Shape::ShorthandArray(params) => {
                let params = self.convert_params(params, scope, depth);
                TypeNode::array(TypeNode::union(params))
            }
            Shape::Literal(kind) => TypeNode::raw(kind.class_name()),
            Shape::Unrecognized => self.error(text, format!("{text:?} does not appear to be a type"), scope),
        }
    }

    /// Split a parameter list and convert each group. A group holding several items becomes a union.
    fn convert_params(&self, params: &str, scope: Option<EntityRef<'_>>, depth: usize) -> Vec<TypeNode> {
        split_type_parameters(params)
            .into_iter()
            .map(|group| TypeNode::union(group.iter().map(|item| self.convert_text(item, scope, depth + 1))))
            .collect()
    }

    fn convert_identifier(&self, name: &str, scope: Option<EntityRef<'_>>) -> TypeNode {
        if let Some(id) = containers::from_str(name) {
            match containers::arity(id) {
                Arity::Single => return TypeNode::container(id, vec![TypeNode::Untyped]),
                Arity::KeyValue => return TypeNode::hash(TypeNode::Untyped, TypeNode::Untyped),
                Arity::Singleton => {}
            }
        }

        self.warn_if_not_constant(name, scope);

        let Some(scope) = scope else {
            return TypeNode::raw(name);
        };
        if self.resolver.resolvable(name, scope) {
            return TypeNode::raw(name);
        }

        if let Some(path) = self.resolver.path_for(name) {
            if path != name {
                self.emit(Diagnostic::infer(format!("{name} was resolved to {path}")), Some(scope));
            }
            return TypeNode::raw(path);
        }

        if self.config.replace_unresolved_with_untyped {
            self.warn(
                format!("{name} wasn't able to be resolved to a constant in this project, replaced with untyped"),
                Some(scope),
            );
            TypeNode::Untyped
        } else {
            self.warn(
                format!("{name} wasn't able to be resolved to a constant in this project"),
                Some(scope),
            );
            TypeNode::raw(name)
        }
    }

    fn convert_duck_type(&self, text: &str, methods: &[&str], scope: Option<EntityRef<'_>>) -> TypeNode {
        let interface = match (self.config.dialect, methods) {
            (Dialect::Rbs, [method]) => duck::from_str(method),
            _ => None,
        };

        match interface {
            Some(info) => {
                let name = TypeNode::raw(info.interface);
                let node = if info.params == 0 {
                    name
                } else {
                    TypeNode::generic(name, vec![TypeNode::Untyped; info.params])
                };
                let message =
                    format!("{text} looks like a duck type with an equivalent interface, replacing with {node}");
                self.emit(Diagnostic::duck(message), scope);
                node
            }
            None => {
                self.emit(
                    Diagnostic::duck(format!("{text} looks like a duck type, replacing with untyped")),
                    scope,
                );
                TypeNode::Untyped
            }
        }
    }

    fn convert_generic(
        &self,
        text: &str,
        name: &str,
        params: &str,
        scope: Option<EntityRef<'_>>,
        depth: usize,
    ) -> TypeNode {
        let Some(id) = containers::from_str(name) else {
            return match self.generic_base(name, scope) {
                Some(base) => TypeNode::generic(base, self.convert_params(params, scope, depth)),
                None => self.error(name, format!("unsupported generic type {name:?} in {text:?}"), scope),
            };
        };

        let mut params = self.convert_params(params, scope, depth);
        match containers::arity(id) {
            Arity::Single if params.len() > 1 => TypeNode::container(id, vec![TypeNode::union(params)]),
            Arity::Single => TypeNode::container(id, params),
            Arity::Singleton if params.len() == 1 => TypeNode::class_of(params.remove(0)),
            Arity::Singleton => TypeNode::union(params.into_iter().map(TypeNode::class_of)),
            Arity::KeyValue => self.hash_of(text, params, scope),
        }
    }

    /// The container of a user-defined generic: the name as a plain constant, never resolved against a scope.
    /// `scope` only labels the diagnostic.
    fn generic_base(&self, name: &str, scope: Option<EntityRef<'_>>) -> Option<TypeNode> {
        if literals::is_boolean(name) || literals::is_nil(name) || literals::is_self(name) {
            return None;
        }
        self.warn_if_not_constant(name, scope);
        Some(TypeNode::raw(name))
    }

    fn warn_if_not_constant(&self, name: &str, scope: Option<EntityRef<'_>>) {
        if strings::looks_like_non_constant(name) {
            self.warn(format!("{name} is probably not a type, but using anyway"), scope);
        }
    }

    fn hash_of(&self, text: &str, mut params: Vec<TypeNode>, scope: Option<EntityRef<'_>>) -> TypeNode {
        if params.len() == 2 {
            let value = params.remove(1);
            let key = params.remove(0);
            return TypeNode::hash(key, value);
        }
        let described: String = params.iter().map(ToString::to_string).collect();
        self.error(
            &described,
            format!("Invalid hash, must have exactly two types: {text:?}."),
            scope,
        )
    }

    fn error(&self, text: &str, message: String, scope: Option<EntityRef<'_>>) -> TypeNode {
        self.warn(message, scope);
        if self.config.replace_errors_with_untyped {
            TypeNode::Untyped
        } else {
            TypeNode::error(text)
        }
    }

    fn warn(&self, message: String, scope: Option<EntityRef<'_>>) {
        self.emit(Diagnostic::warn(message), scope);
    }

    fn emit(&self, diagnostic: Diagnostic, scope: Option<EntityRef<'_>>) {
        self.sink.emit(diagnostic.with_item(scope.map(|s| s.path())));
    }
}

/// `[true, false]` in either order.
fn is_boolean_pair(texts: &[String]) -> bool {
    match texts {
        [a, b] => {
            let (a, b) = (a.trim(), b.trim());
            (a == "true" && b == "false") || (a == "false" && b == "true")
        }
        _ => false,
    }
}
