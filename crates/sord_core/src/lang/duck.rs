//! Duck-type interface vocabulary.
//!
//! RBS ships structural interfaces for the handful of single-method protocols YARD users write most often
//! (`#to_s`, `#read`, `#each`, ...). When targeting RBS, a duck-type annotation consisting of exactly one of these
//! methods is replaced by the interface instead of `untyped`.
//!
//! ## Notes
//! - Lookup is on the full atom including the leading `#`.
//! - `params` is the number of type parameters the interface takes; the converter fills them with `untyped`.
//!
//! ## Examples
//! ```rust
//! use sord_core::lang::duck;
//!
//! let info = duck::from_str("#to_s").unwrap();
//! assert_eq!(info.interface, "_ToS");
//! assert_eq!(duck::from_str("#each").map(|i| i.params), Some(1));
//! assert!(duck::from_str("#quack").is_none());
//! ```

/// One duck-type to interface mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuckInterfaceInfo {
    pub method: &'static str,
    pub interface: &'static str,
    pub params: usize,
}

/// Registry of duck-type atoms with a matching RBS interface.
pub const DUCK_INTERFACES: &[DuckInterfaceInfo] = &[
    info("#to_s", "_ToS", 0),
    info("#to_i", "_ToI", 0),
    info("#to_r", "_ToR", 0),
    info("#to_str", "_ToStr", 0),
    info("#to_proc", "_ToProc", 0),
    info("#to_path", "_ToPath", 0),
    info("#read", "_Reader", 0),
    info("#readpartial", "_ReaderPartial", 0),
    info("#write", "_Writer", 0),
    info("#rewind", "_Rewindable", 0),
    info("#to_io", "_ToIO", 0),
    info("#exception", "_Exception", 0),
    info("#to_hash", "_ToHash", 2),
    info("#each", "_Each", 1),
];

/// Look up the interface for a single duck-type atom such as `#to_s`.
pub fn from_str(method: &str) -> Option<&'static DuckInterfaceInfo> {
    DUCK_INTERFACES.iter().find(|d| d.method == method)
}

const fn info(method: &'static str, interface: &'static str, params: usize) -> DuckInterfaceInfo {
    DuckInterfaceInfo {
        method,
        interface,
        params,
    }
}
