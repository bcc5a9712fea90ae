//! Data model for a documentation run — independent of how symbols are found.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Kind of object a package attribute is bound to once the package is loaded.
///
/// Classes come in two flavours: ones whose metaclass is plain `type` and
/// ones built through `abc.ABCMeta`. Both document as classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    Type,
    AbcMeta,
    Function,
    /// Constants, modules, instances, builtins, custom metaclasses.
    Other,
}

impl RuntimeKind {
    /// Map a runtime kind onto the symbol kind it documents as, if any.
    pub fn classify(self) -> Option<SymbolKind> {
        match self {
            RuntimeKind::Type | RuntimeKind::AbcMeta => Some(SymbolKind::Class),
            RuntimeKind::Function => Some(SymbolKind::Function),
            RuntimeKind::Other => None,
        }
    }
}

/// Structural kind of an exported symbol that gets its own stub file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Class,
    Function,
}

/// One exported symbol of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub package: String,
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    /// Dotted path used in titles and autodoc directives.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

/// Public surface of one package, each list sorted by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Exports {
    pub classes: Vec<String>,
    pub functions: Vec<String>,
}

impl Exports {
    /// Build exports from raw `(name, kind)` bindings.
    ///
    /// Later bindings of the same name win. Private names and unclassifiable
    /// kinds are dropped.
    pub fn from_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (String, RuntimeKind)>,
    {
        let resolved: BTreeMap<String, RuntimeKind> = bindings.into_iter().collect();

        let mut exports = Exports::default();
        for (name, kind) in resolved {
            if is_private(&name) {
                continue;
            }
            match kind.classify() {
                Some(SymbolKind::Class) => exports.classes.push(name),
                Some(SymbolKind::Function) => exports.functions.push(name),
                None => {}
            }
        }
        exports
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty()
    }

    /// All symbols of `package`, classes first.
    pub fn symbols(&self, package: &str) -> Vec<Symbol> {
        let classes = self.classes.iter().map(|name| Symbol {
            package: package.to_string(),
            name: name.clone(),
            kind: SymbolKind::Class,
        });
        let functions = self.functions.iter().map(|name| Symbol {
            package: package.to_string(),
            name: name.clone(),
            kind: SymbolKind::Function,
        });
        classes.chain(functions).collect()
    }
}

/// Names starting with an underscore never get documented.
pub fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// A detected package, ready to be emitted.
#[derive(Debug, Clone)]
pub struct PackageNode {
    /// Fully-qualified dotted name
    pub name: String,
    pub path: PathBuf,
    pub exports: Exports,
    /// Direct child packages only, in traversal order
    pub children: Vec<String>,
}

/// A file written by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFile {
    SymbolStub { path: PathBuf, symbol: Symbol },
    PackageIndex { path: PathBuf, package: String },
}

impl DocumentFile {
    pub fn path(&self) -> &PathBuf {
        match self {
            DocumentFile::SymbolStub { path, .. } | DocumentFile::PackageIndex { path, .. } => path,
        }
    }
}

/// Symbols documented for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCounts {
    pub package: String,
    pub classes: usize,
    pub functions: usize,
}

impl PackageCounts {
    pub fn new(package: &str, exports: &Exports) -> Self {
        Self {
            package: package.to_string(),
            classes: exports.classes.len(),
            functions: exports.functions.len(),
        }
    }
}

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct Report {
    /// Fully-qualified names of every documented package, parents first
    pub packages: Vec<String>,
    /// Symbol counts per package, in write order
    pub counts: Vec<PackageCounts>,
    /// Every file written, in write order
    pub documents: Vec<DocumentFile>,
}

impl Report {
    /// Classes and functions documented across all packages.
    pub fn totals(&self) -> (usize, usize) {
        self.counts
            .iter()
            .fold((0, 0), |(c, f), counts| (c + counts.classes, f + counts.functions))
    }
}
