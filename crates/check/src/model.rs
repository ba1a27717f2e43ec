use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::CheckError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which side of the FFI boundary a source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Defines and exports the C-callable symbols.
    Native,
    /// Declares imports and expects the native side to provide them.
    Consumer,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Consumer => write!(f, "consumer"),
        }
    }
}

/// One source blob plus the name it is reported under (usually its path).
#[derive(Debug, Clone)]
pub struct SourceText {
    pub name: String,
    pub text: String,
}

impl SourceText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a source file for `side`. A missing or unreadable file is the
    /// only way extraction input can fail.
    pub fn read(path: &Path, side: Side) -> Result<Self, CheckError> {
        let text = std::fs::read_to_string(path).map_err(|e| CheckError::InputUnavailable {
            side,
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

// ---------------------------------------------------------------------------
// Symbol sets
// ---------------------------------------------------------------------------

/// First declaration site of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub source: String,
    /// 1-based line number; 0 when the symbol was not read from a source.
    pub line: usize,
}

/// Unique symbol names in first-seen order.
///
/// Insertion is idempotent: a name already present keeps its first
/// declaration site. Equality ignores order and sites.
#[derive(Debug, Clone, Default)]
pub struct SymbolSet {
    decls: Vec<Declaration>,
    index: HashMap<String, usize>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration. Returns `false` if the name was already present.
    pub fn insert(&mut self, decl: Declaration) -> bool {
        if self.index.contains_key(&decl.name) {
            return false;
        }
        self.index.insert(decl.name.clone(), self.decls.len());
        self.decls.push(decl);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.decls[i])
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Declarations in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.decls.iter().map(|d| d.name.as_str())
    }

    pub fn is_subset(&self, other: &SymbolSet) -> bool {
        self.names().all(|n| other.contains(n))
    }
}

impl PartialEq for SymbolSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for SymbolSet {}

impl<S: Into<String>> FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        for name in iter {
            set.insert(Declaration {
                name: name.into(),
                source: String::new(),
                line: 0,
            });
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Findings + Output
// ---------------------------------------------------------------------------

/// A symbol present on one side and absent from the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub symbol: String,
    pub source: String,
    pub line: usize,
}

impl From<&Declaration> for Finding {
    fn from(decl: &Declaration) -> Self {
        Self {
            symbol: decl.name.clone(),
            source: decl.source.clone(),
            line: decl.line,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub native_label: String,
    pub consumer_label: String,
    pub native_symbols: usize,
    pub consumer_symbols: usize,
    /// Consumer-declared symbols missing from the native side.
    pub findings: Vec<Finding>,
    /// Native exports no consumer declares. Empty unless the check is enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unused_exports: Vec<Finding>,
    pub engine_version: String,
}

impl CheckResult {
    pub fn is_consistent(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, line: usize) -> Declaration {
        Declaration {
            name: name.into(),
            source: "lib.rs".into(),
            line,
        }
    }

    #[test]
    fn insert_is_idempotent_and_keeps_first_site() {
        let mut set = SymbolSet::new();
        assert!(set.insert(decl("qux", 3)));
        assert!(!set.insert(decl("qux", 9)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("qux").unwrap().line, 3);
    }

    #[test]
    fn equality_ignores_order() {
        let a: SymbolSet = ["foo", "bar"].into_iter().collect();
        let b: SymbolSet = ["bar", "foo"].into_iter().collect();
        let c: SymbolSet = ["foo"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c.is_subset(&a));
        assert!(!a.is_subset(&c));
    }

    #[test]
    fn names_preserve_first_seen_order() {
        let set: SymbolSet = ["b", "a", "b", "c"].into_iter().collect();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn read_missing_file_is_input_unavailable() {
        let err = SourceText::read(Path::new("/nonexistent/ffisync/lib.rs"), Side::Consumer).unwrap_err();
        match err {
            CheckError::InputUnavailable { side, .. } => assert_eq!(side, Side::Consumer),
            other => panic!("unexpected error: {other}"),
        }
    }
}
