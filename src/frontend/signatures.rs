//! Harvesting declared names from dependency signature files.
//!
//! Gems ship type signatures in two formats: RBS (`sig/**/*.rbs`, and everything an RBS collection installs) and
//! Sorbet RBI (`rbi/**/*.rbi`). The resolver only needs to know which modules, classes and constants those files
//! declare and where they are nested, so both formats are read with a small line-oriented scanner that tracks
//! `... end` nesting instead of a full parser.
//!
//! ## What is recorded
//!
//! | Format | Recorded | Traversed only | Skipped |
//! |--------|----------|----------------|---------|
//! | RBS | `module`, `class` (also `class X = Y` aliases), `NAME: Type` constants | | `interface` bodies, `type` aliases, members |
//! | RBI | `module`, `class`, `NAME = ...` constants | `class << self` | `def`/`do` bodies |

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureFormat {
    Rbs,
    Rbi,
}

impl SignatureFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SignatureFormat::Rbs => "rbs",
            SignatureFormat::Rbi => "rbi",
        }
    }

    /// Directory inside a gem that holds signatures in this format.
    pub fn gem_subdir(self) -> &'static str {
        match self {
            SignatureFormat::Rbs => "sig",
            SignatureFormat::Rbi => "rbi",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("rbs") => Some(SignatureFormat::Rbs),
            Some("rbi") => Some(SignatureFormat::Rbi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigKind {
    Module,
    Class,
    Constant,
    Interface,
}

/// One declaration found in a signature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigDecl {
    /// Name as written, possibly qualified (`A::B`, `::C`).
    pub name: String,
    pub kind: SigKind,
    pub children: Vec<SigDecl>,
}

impl SigDecl {
    fn new(name: &str, kind: SigKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            children: Vec::new(),
        }
    }
}

/// Structural problem in a signature file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },
    #[error("{0} is not an .rbs or .rbi file")]
    UnknownFormat(PathBuf),
}

/// A simple name and the full path it was declared at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedName {
    pub name: String,
    pub path: String,
}

/// Read and scan one signature file, picking the format from its extension.
pub fn load_file(path: &Path) -> Result<Vec<SigDecl>, SignatureError> {
    let format = SignatureFormat::from_path(path).ok_or_else(|| SignatureError::UnknownFormat(path.to_path_buf()))?;
    let source = fs::read_to_string(path).map_err(|source| SignatureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&source, format).map_err(|source| SignatureError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_source(source: &str, format: SignatureFormat) -> Result<Vec<SigDecl>, SyntaxError> {
    match format {
        SignatureFormat::Rbs => scan_rbs(source),
        SignatureFormat::Rbi => scan_rbi(source),
    }
}

/// Recursively find every file with the format's extension under `dir`, sorted. Hidden directories are skipped.
pub fn discover(dir: &Path, format: SignatureFormat) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let entry_path = entry.path();
            let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if entry_path.is_dir() {
                if !name.starts_with('.') {
                    files.extend(discover(&entry_path, format));
                }
            } else if SignatureFormat::from_path(&entry_path) == Some(format) {
                files.push(entry_path);
            }
        }
    }
    files.sort();
    files
}

/// Flatten a declaration tree into `(simple name, full path)` pairs.
pub fn harvest(decls: &[SigDecl]) -> Vec<HarvestedName> {
    let mut names = Vec::new();
    harvest_into(decls, &[], &mut names);
    names
}

fn harvest_into(decls: &[SigDecl], prefix: &[String], out: &mut Vec<HarvestedName>) {
    for decl in decls {
        if decl.kind == SigKind::Interface {
            continue;
        }

        let mut path: Vec<String> = if decl.name.starts_with("::") { Vec::new() } else { prefix.to_vec() };
        path.extend(
            decl.name
                .split("::")
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        );
        let Some(simple) = path.last() else {
            continue;
        };

        out.push(HarvestedName {
            name: simple.clone(),
            path: path.join("::"),
        });
        harvest_into(&decl.children, &path, out);
    }
}

// ============================================================================
// Nesting tracker
// ============================================================================

enum Frame {
    /// A recorded declaration collecting its members.
    Decl(SigDecl),
    /// Members belong to the enclosing frame (`class << self`).
    Transparent(Vec<SigDecl>),
    /// Members are discarded (method bodies, blocks).
    Opaque,
}

#[derive(Default)]
struct TreeBuilder {
    top_level: Vec<SigDecl>,
    stack: Vec<(Frame, usize, String)>,
}

impl TreeBuilder {
    fn add(&mut self, decl: SigDecl) {
        match self.stack.last_mut() {
            Some((Frame::Decl(parent), ..)) => parent.children.push(decl),
            Some((Frame::Transparent(members), ..)) => members.push(decl),
            Some((Frame::Opaque, ..)) => {}
            None => self.top_level.push(decl),
        }
    }

    fn open(&mut self, frame: Frame, line: usize, text: &str) {
        self.stack.push((frame, line, text.to_string()));
    }

    fn close(&mut self, line: usize) -> Result<(), SyntaxError> {
        let Some((frame, ..)) = self.stack.pop() else {
            return Err(SyntaxError {
                line,
                message: "unexpected `end`".to_string(),
            });
        };
        match frame {
            Frame::Decl(decl) => self.add(decl),
            Frame::Transparent(members) => {
                for member in members {
                    self.add(member);
                }
            }
            Frame::Opaque => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<SigDecl>, SyntaxError> {
        if let Some((_, line, text)) = self.stack.into_iter().last() {
            return Err(SyntaxError {
                line,
                message: format!("`{text}` is never closed"),
            });
        }
        Ok(self.top_level)
    }
}

/// Byte length of the leading `(::)?Name(::Name)*` in `text`, or 0.
fn constant_path_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = if text.starts_with("::") { 2 } else { 0 };
    let mut end = 0;
    loop {
        let word = bytes[pos..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        if word == 0 || bytes[pos].is_ascii_digit() {
            return end;
        }
        pos += word;
        end = pos;
        if bytes[pos..].starts_with(b"::") {
            pos += 2;
        } else {
            return end;
        }
    }
}

/// Split `text` into a leading constant path and the trimmed remainder.
fn split_constant(text: &str) -> Option<(&str, &str)> {
    let len = constant_path_len(text);
    (len > 0).then(|| (&text[..len], text[len..].trim_start()))
}

fn starts_uppercase(name: &str) -> bool {
    name.trim_start_matches("::")
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Whether the last word of `text` is `end` (one-line `class Foo; end`).
fn closes_on_same_line(text: &str) -> bool {
    text.split(|c: char| c.is_whitespace() || c == ';').rfind(|w| !w.is_empty()) == Some("end")
}

fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return "";
    }
    match trimmed.find(" #") {
        Some(i) => trimmed[..i].trim_end(),
        None => trimmed,
    }
}

fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim_start()),
        None => (line, ""),
    }
}

fn missing_name(line: usize, keyword: &str) -> SyntaxError {
    SyntaxError {
        line,
        message: format!("expected a constant name after `{keyword}`"),
    }
}

// ============================================================================
// RBS
// ============================================================================

fn scan_rbs(source: &str) -> Result<Vec<SigDecl>, SyntaxError> {
    let mut builder = TreeBuilder::default();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        match keyword {
            "module" | "class" => {
                let kind = if keyword == "module" { SigKind::Module } else { SigKind::Class };
                let (name, after) = split_constant(rest).ok_or_else(|| missing_name(line_no, keyword))?;
                let decl = SigDecl::new(name, kind);
                if after.starts_with('=') || closes_on_same_line(after) {
                    builder.add(decl);
                } else {
                    builder.open(Frame::Decl(decl), line_no, line);
                }
            }
            "interface" => {
                let name = rest.split(['[', ' ']).next().unwrap_or_default();
                if closes_on_same_line(rest) {
                    continue;
                }
                builder.open(Frame::Decl(SigDecl::new(name, SigKind::Interface)), line_no, line);
            }
            "end" => builder.close(line_no)?,
            _ => {
                if let Some((name, after)) = split_constant(line) {
                    if starts_uppercase(name) && after.starts_with(':') && !after.starts_with("::") {
                        builder.add(SigDecl::new(name, SigKind::Constant));
                    }
                }
            }
        }
    }

    builder.finish()
}

// ============================================================================
// RBI
// ============================================================================

const RBI_BLOCK_KEYWORDS: &[&str] = &["if", "unless", "case", "while", "until", "begin"];

fn opens_do_block(line: &str) -> bool {
    if line.ends_with(" do") || line == "do" {
        return true;
    }
    // `each do |x|`
    match line.rfind(" do |") {
        Some(i) => line[i..].ends_with('|'),
        None => false,
    }
}

fn scan_rbi(source: &str) -> Result<Vec<SigDecl>, SyntaxError> {
    let mut builder = TreeBuilder::default();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        match keyword {
            "class" if rest.starts_with("<<") => {
                if !closes_on_same_line(rest) {
                    builder.open(Frame::Transparent(Vec::new()), line_no, line);
                }
            }
            "module" | "class" => {
                let kind = if keyword == "module" { SigKind::Module } else { SigKind::Class };
                let (name, after) = split_constant(rest).ok_or_else(|| missing_name(line_no, keyword))?;
                let decl = SigDecl::new(name, kind);
                if closes_on_same_line(after) {
                    builder.add(decl);
                } else {
                    builder.open(Frame::Decl(decl), line_no, line);
                }
            }
            "def" => {
                if !closes_on_same_line(rest) {
                    builder.open(Frame::Opaque, line_no, line);
                }
            }
            "end" | "end;" => builder.close(line_no)?,
            _ if line.starts_with("end.") => builder.close(line_no)?,
            k if RBI_BLOCK_KEYWORDS.contains(&k) => {
                if !closes_on_same_line(rest) {
                    builder.open(Frame::Opaque, line_no, line);
                }
            }
            _ => {
                if let Some((name, after)) = split_constant(line) {
                    let assigns = after.starts_with('=') && !after.starts_with("==") && !after.starts_with("=~");
                    if starts_uppercase(name) && assigns {
                        builder.add(SigDecl::new(name, SigKind::Constant));
                    }
                }
                if opens_do_block(line) {
                    builder.open(Frame::Opaque, line_no, line);
                }
            }
        }
    }

    builder.finish()
}
