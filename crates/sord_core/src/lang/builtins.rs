//! Host builtin class vocabulary.
//!
//! A fixed, version-tagged table of the classes a stock Ruby process defines at top level (the set
//! `Object.constants.select { |c| Object.const_get(c).is_a?(Class) }` would return). The resolver treats these as
//! always-resolvable unless a lexical match in the documented project shadows them.
//!
//! ## Notes
//! - Entries carry the version they appeared in and the version they were removed in, so a table lookup for an
//!   old or new host stays accurate: `SortedSet` is gone from 3.0, `Fixnum`/`Bignum` from 3.2, `Ractor` exists
//!   since 3.0 and `Data` since 3.2.
//! - Only classes are listed; modules such as `Kernel` or `Comparable` are not.
//! - Top-level aliases of nested classes count too: `Mutex` and `ConditionVariable` are `Thread::Mutex` and
//!   `Thread::ConditionVariable`.
//!
//! ## Examples
//! ```rust
//! use sord_core::RubyVersion;
//! use sord_core::lang::builtins;
//!
//! let v3 = RubyVersion::new(3, 3);
//! assert!(builtins::is_builtin_class("String", v3));
//! assert!(!builtins::is_builtin_class("SortedSet", v3));
//! assert!(builtins::is_builtin_class("SortedSet", RubyVersion::new(2, 7)));
//! ```

use super::registry::{RubyVersion, Stability};

/// Metadata for a builtin class.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinClassInfo {
    pub name: &'static str,
    /// First version defining the class; `None` means “always there”.
    pub since: Option<RubyVersion>,
    /// First version no longer defining the class.
    pub removed_in: Option<RubyVersion>,
    pub stability: Stability,
}

impl BuiltinClassInfo {
    /// Whether the class is defined on the given host version.
    pub fn available_in(&self, version: RubyVersion) -> bool {
        self.since.is_none_or(|since| version >= since) && self.removed_in.is_none_or(|removed| version < removed)
    }
}

/// Registry of builtin classes.
pub const BUILTIN_CLASSES: &[BuiltinClassInfo] = &[
    class("ArgumentError"),
    class("Array"),
    class("BasicObject"),
    deprecated("Bignum", RubyVersion::new(3, 2)),
    class("Binding"),
    class("Class"),
    class("ClosedQueueError"),
    class("Complex"),
    class("ConditionVariable"),
    since("Data", RubyVersion::new(3, 2)),
    class("Dir"),
    class("EOFError"),
    class("Encoding"),
    class("EncodingError"),
    class("Enumerator"),
    class("Exception"),
    class("FalseClass"),
    class("Fiber"),
    class("FiberError"),
    class("File"),
    deprecated("Fixnum", RubyVersion::new(3, 2)),
    class("Float"),
    class("FloatDomainError"),
    class("FrozenError"),
    class("Hash"),
    class("IO"),
    class("IOError"),
    class("IndexError"),
    class("Integer"),
    class("Interrupt"),
    class("KeyError"),
    class("LoadError"),
    class("LocalJumpError"),
    class("MatchData"),
    class("Method"),
    class("Module"),
    class("Monitor"),
    class("Mutex"),
    class("NameError"),
    class("NilClass"),
    since("NoMatchingPatternError", RubyVersion::new(3, 0)),
    since("NoMatchingPatternKeyError", RubyVersion::new(3, 1)),
    class("NoMemoryError"),
    class("NoMethodError"),
    class("NotImplementedError"),
    class("Numeric"),
    class("Object"),
    class("Proc"),
    class("Queue"),
    since("Ractor", RubyVersion::new(3, 0)),
    class("Random"),
    class("Range"),
    class("RangeError"),
    class("Rational"),
    since("Refinement", RubyVersion::new(3, 1)),
    class("Regexp"),
    class("RegexpError"),
    class("RubyVM"),
    class("RuntimeError"),
    class("ScriptError"),
    class("SecurityError"),
    class("Set"),
    class("SignalException"),
    class("SizedQueue"),
    deprecated("SortedSet", RubyVersion::new(3, 0)),
    class("StandardError"),
    class("StopIteration"),
    class("String"),
    class("Struct"),
    class("Symbol"),
    class("SyntaxError"),
    class("SystemCallError"),
    class("SystemExit"),
    class("SystemStackError"),
    class("Thread"),
    class("ThreadError"),
    class("ThreadGroup"),
    class("Time"),
    class("TracePoint"),
    class("TrueClass"),
    class("TypeError"),
    class("UnboundMethod"),
    class("UncaughtThrowError"),
    class("ZeroDivisionError"),
];

/// Iterate the names of every builtin class defined on `version`.
pub fn builtin_classes(version: RubyVersion) -> impl Iterator<Item = &'static str> {
    BUILTIN_CLASSES
        .iter()
        .filter(move |c| c.available_in(version))
        .map(|c| c.name)
}

/// Whether `name` is a builtin class on `version`.
///
/// ## Notes
/// - Matching is on the simple name only; `::String` or `Kernel::String` do not match.
pub fn is_builtin_class(name: &str, version: RubyVersion) -> bool {
    BUILTIN_CLASSES
        .iter()
        .any(|c| c.name == name && c.available_in(version))
}

const fn class(name: &'static str) -> BuiltinClassInfo {
    BuiltinClassInfo {
        name,
        since: None,
        removed_in: None,
        stability: Stability::Stable,
    }
}

const fn since(name: &'static str, version: RubyVersion) -> BuiltinClassInfo {
    BuiltinClassInfo {
        since: Some(version),
        ..class(name)
    }
}

const fn deprecated(name: &'static str, removed_in: RubyVersion) -> BuiltinClassInfo {
    BuiltinClassInfo {
        removed_in: Some(removed_in),
        stability: Stability::Deprecated,
        ..class(name)
    }
}
