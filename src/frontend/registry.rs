//! The documentation corpus: every declared module, class, method and constant, as a tree rooted at the top-level
//! namespace.
//!
//! Entities live in an arena and refer to each other by [`EntityId`]. Callers hold [`EntityRef`] handles, which pair
//! an id with the registry it belongs to and answer the scope questions the resolver needs (enclosing namespace, full
//! path, child lookup, root check).
//!
//! A registry can be built programmatically with [`Registry::define_path`] or loaded from a plain-text declaration
//! list (see [`Registry::parse_declarations`]).

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Index of an entity within its [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Root,
    Module,
    Class,
    Method,
    Constant,
}

impl EntityKind {
    /// Whether entities of this kind can contain other declarations.
    pub fn is_namespace(self) -> bool {
        matches!(self, EntityKind::Root | EntityKind::Module | EntityKind::Class)
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "module" => Some(EntityKind::Module),
            "class" => Some(EntityKind::Class),
            "method" | "def" => Some(EntityKind::Method),
            "constant" | "const" => Some(EntityKind::Constant),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Root => write!(f, "root"),
            EntityKind::Module => write!(f, "module"),
            EntityKind::Class => write!(f, "class"),
            EntityKind::Method => write!(f, "method"),
            EntityKind::Constant => write!(f, "constant"),
        }
    }
}

#[derive(Debug, Clone)]
struct Entity {
    name: String,
    kind: EntityKind,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

/// Errors raised while loading a declaration list.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Arena of declared entities.
#[derive(Debug, Clone)]
pub struct Registry {
    entities: Vec<Entity>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    const ROOT: EntityId = EntityId(0);

    /// An empty registry holding only the root namespace.
    pub fn new() -> Self {
        Self {
            entities: vec![Entity {
                name: String::new(),
                kind: EntityKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> EntityRef<'_> {
        self.get(Self::ROOT)
    }

    pub fn get(&self, id: EntityId) -> EntityRef<'_> {
        EntityRef { registry: self, id }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.len() == 1
    }

    /// Declare `name` as a direct child of `parent`.
    ///
    /// Declaring the same name twice reuses the existing entity. Namespaces merge: reopening a module as a class turns
    /// it into a class, which is how implicitly created intermediate modules get their real kind.
    pub fn define(&mut self, parent: EntityId, name: &str, kind: EntityKind) -> EntityId {
        let existing = self.entities[parent.0].children.iter().copied().find(|&child| {
            let entity = &self.entities[child.0];
            entity.name == name && (entity.kind == kind || (entity.kind.is_namespace() && kind.is_namespace()))
        });
        if let Some(id) = existing {
            if kind == EntityKind::Class {
                self.entities[id.0].kind = EntityKind::Class;
            }
            return id;
        }

        let id = EntityId(self.entities.len());
        self.entities.push(Entity {
            name: name.to_string(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entities[parent.0].children.push(id);
        id
    }

    /// Declare an entity by its full path, creating missing enclosing namespaces as modules.
    ///
    /// Methods are written `Owner::Path#name`; a leading `::` is ignored.
    pub fn define_path(&mut self, path: &str, kind: EntityKind) -> EntityId {
        let path = path.strip_prefix("::").unwrap_or(path);
        let (namespace_path, method) = match (kind, path.rsplit_once('#')) {
            (EntityKind::Method, Some((owner, name))) => (owner, Some(name)),
            _ => (path, None),
        };

        let mut components: Vec<&str> = namespace_path.split("::").filter(|c| !c.is_empty()).collect();
        let last = match method {
            Some(name) => name,
            None => components.pop().unwrap_or_default(),
        };

        let mut parent = Self::ROOT;
        for component in components {
            parent = self.define(parent, component, EntityKind::Module);
        }
        self.define(parent, last, kind)
    }

    /// Look an entity up by full path (`""` is the root).
    pub fn at(&self, path: &str) -> Option<EntityRef<'_>> {
        let path = path.strip_prefix("::").unwrap_or(path);
        let (namespace_path, method) = match path.rsplit_once('#') {
            Some((owner, name)) => (owner, Some(name)),
            None => (path, None),
        };

        let mut current = self.root();
        for component in namespace_path.split("::").filter(|c| !c.is_empty()) {
            current = current.child(
                component,
                &[EntityKind::Module, EntityKind::Class, EntityKind::Constant],
            )?;
        }
        match method {
            Some(name) => current.child(name, &[EntityKind::Method]),
            None => Some(current),
        }
    }

    /// Every module and class, in declaration order.
    pub fn namespaces(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.all().filter(|e| matches!(e.kind(), EntityKind::Module | EntityKind::Class))
    }

    /// Every entity except the root, in declaration order.
    pub fn all(&self) -> impl Iterator<Item = EntityRef<'_>> {
        (1..self.entities.len()).map(move |i| self.get(EntityId(i)))
    }

    /// Parse a declaration list.
    ///
    /// One declaration per line, `<kind> <path>`, where kind is `module`, `class`, `method` or `constant`:
    ///
    /// ```text
    /// # comments and blank lines are ignored
    /// module A
    /// class A::B
    /// method A::B#run
    /// constant A::VERSION
    /// ```
    pub fn parse_declarations(source: &str) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (index, raw_line) in source.lines().enumerate() {
            // `#` also separates method names, so it only starts a comment at the beginning of a line.
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut words = line.split_whitespace();
            let (Some(keyword), Some(path), None) = (words.next(), words.next(), words.next()) else {
                return Err(RegistryError::Parse {
                    line: index + 1,
                    message: format!("expected `<kind> <path>`, found {line:?}"),
                });
            };
            let Some(kind) = EntityKind::from_keyword(keyword) else {
                return Err(RegistryError::Parse {
                    line: index + 1,
                    message: format!("unknown declaration kind {keyword:?}"),
                });
            };
            if path.trim_start_matches("::").is_empty() {
                return Err(RegistryError::Parse {
                    line: index + 1,
                    message: "empty path".to_string(),
                });
            }
            registry.define_path(path, kind);
        }
        Ok(registry)
    }

    /// Read and parse a declaration list file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let source = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_declarations(&source)
    }
}

/// A handle on one entity, used as the lexical scope for resolution.
#[derive(Clone, Copy)]
pub struct EntityRef<'r> {
    registry: &'r Registry,
    id: EntityId,
}

impl<'r> EntityRef<'r> {
    fn entity(&self) -> &'r Entity {
        &self.registry.entities[self.id.0]
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &'r str {
        &self.entity().name
    }

    pub fn kind(&self) -> EntityKind {
        self.entity().kind
    }

    pub fn is_root(&self) -> bool {
        self.kind() == EntityKind::Root
    }

    pub fn parent(&self) -> Option<EntityRef<'r>> {
        self.entity().parent.map(|id| self.registry.get(id))
    }

    /// Full path: `""` for the root, `A::B` for namespaces and constants, `A::B#run` for methods.
    pub fn path(&self) -> String {
        let Some(parent) = self.parent() else {
            return String::new();
        };
        if parent.is_root() {
            return self.name().to_string();
        }
        let separator = if self.kind() == EntityKind::Method { "#" } else { "::" };
        format!("{}{}{}", parent.path(), separator, self.name())
    }

    /// This entity if it is a namespace, otherwise the nearest enclosing one.
    pub fn namespace(&self) -> EntityRef<'r> {
        let mut current = *self;
        while !current.kind().is_namespace() {
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// The direct child called `name` whose kind is one of `kinds`.
    pub fn child(&self, name: &str, kinds: &[EntityKind]) -> Option<EntityRef<'r>> {
        self.entity()
            .children
            .iter()
            .map(|&id| self.registry.get(id))
            .find(|child| child.name() == name && kinds.contains(&child.kind()))
    }
}

impl PartialEq for EntityRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry) && self.id == other.id
    }
}

impl Eq for EntityRef<'_> {}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind(), self.path())
    }
}
