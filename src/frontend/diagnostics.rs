//! Diagnostics raised while converting annotations and building the resolver index.
//!
//! The converter and resolver never print anything. Every event goes through a [`DiagnosticSink`] that the caller
//! hands in, so the CLI can log and count them, a signature emitter can turn them into comments, and tests can
//! collect and assert on them.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

/// What kind of event a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// Needs the user's attention, but processing continues.
    Warn,
    /// Plain information.
    Info,
    /// A duck type was replaced by something else.
    Duck,
    /// Something was filled in or guessed, and is likely correct.
    Infer,
    /// Information is missing but not critical.
    Omit,
    /// A process completed.
    Done,
    /// The current process must stop.
    Error,
}

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 7] = [
        DiagnosticKind::Warn,
        DiagnosticKind::Info,
        DiagnosticKind::Duck,
        DiagnosticKind::Infer,
        DiagnosticKind::Omit,
        DiagnosticKind::Done,
        DiagnosticKind::Error,
    ];

    /// Fixed-width header, e.g. `[WARN ]`.
    pub fn header(self) -> &'static str {
        match self {
            DiagnosticKind::Warn => "[WARN ]",
            DiagnosticKind::Info => "[INFO ]",
            DiagnosticKind::Duck => "[DUCK ]",
            DiagnosticKind::Infer => "[INFER]",
            DiagnosticKind::Omit => "[OMIT ]",
            DiagnosticKind::Done => "[DONE ]",
            DiagnosticKind::Error => "[ERROR]",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.to_string() == name)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Warn => write!(f, "warn"),
            DiagnosticKind::Info => write!(f, "info"),
            DiagnosticKind::Duck => write!(f, "duck"),
            DiagnosticKind::Infer => write!(f, "infer"),
            DiagnosticKind::Omit => write!(f, "omit"),
            DiagnosticKind::Done => write!(f, "done"),
            DiagnosticKind::Error => write!(f, "error"),
        }
    }
}

/// One diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Path of the documented entity the event is about, if any (e.g. `Foo::Bar#baz`).
    pub item: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            item: None,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warn, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, message)
    }

    pub fn duck(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Duck, message)
    }

    pub fn infer(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Infer, message)
    }

    pub fn with_item(mut self, item: Option<String>) -> Self {
        self.item = item;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{} ({}) {}", self.kind.header(), item, self.message),
            None => write!(f, "{} {}", self.kind.header(), self.message),
        }
    }
}

/// Receiver for diagnostics.
///
/// Takes `&self` so a single sink can be shared by the resolver and the converter for a whole run.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Records diagnostics in order of emission.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything emitted so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`.
///
/// `warn` and `error` keep their level; every other kind is informational.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let kind = diagnostic.kind.to_string();
        let item = diagnostic.item.as_deref().unwrap_or("");
        match diagnostic.kind {
            DiagnosticKind::Warn => tracing::warn!(kind, item, "{}", diagnostic.message),
            DiagnosticKind::Error => tracing::error!(kind, item, "{}", diagnostic.message),
            _ => tracing::info!(kind, item, "{}", diagnostic.message),
        }
    }
}

/// Lets only the enabled kinds through to an inner sink.
pub struct FilteredSink<'a> {
    inner: &'a dyn DiagnosticSink,
    enabled: HashSet<DiagnosticKind>,
}

impl<'a> FilteredSink<'a> {
    pub fn new(inner: &'a dyn DiagnosticSink, enabled: impl IntoIterator<Item = DiagnosticKind>) -> Self {
        Self {
            inner,
            enabled: enabled.into_iter().collect(),
        }
    }
}

impl DiagnosticSink for FilteredSink<'_> {
    fn emit(&self, diagnostic: Diagnostic) {
        if self.enabled.contains(&diagnostic.kind) {
            self.inner.emit(diagnostic);
        }
    }
}

/// Sends every diagnostic to each of several sinks.
pub struct FanoutSink<'a> {
    sinks: Vec<&'a dyn DiagnosticSink>,
}

impl<'a> FanoutSink<'a> {
    pub fn new(sinks: Vec<&'a dyn DiagnosticSink>) -> Self {
        Self { sinks }
    }
}

impl DiagnosticSink for FanoutSink<'_> {
    fn emit(&self, diagnostic: Diagnostic) {
        for sink in &self.sinks {
            sink.emit(diagnostic.clone());
        }
    }
}
