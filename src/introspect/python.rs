//! Static evaluation of a package namespace from its Python sources.
//!
//! Reads `__init__.py` top to bottom and records what each top-level
//! statement binds, following `from ... import` into sibling modules inside
//! the documented root. Nothing is executed.
//!
//! What binds what:
//! - `def f(` / `async def f(` / `f = lambda` → function
//! - `class C(...)` → class; `metaclass=ABCMeta` or an `ABC` base → abstract
//!   class; any other explicit metaclass, or a base built by one →
//!   unclassifiable
//! - `import a.b` / `import a as b` → module
//! - `from .m import x` → whatever `x` is in `m` (or a module if `m.x` is one)
//! - `from .m import *` → every name in `m.__all__`, else every public name
//! - `__all__ = m.__all__ + [...]` → lists are concatenated; a term that
//!   cannot be resolved drops `__all__` so star imports take public names
//! - `X = Y` with `Y` already bound → same kind as `Y`
//! - any other assignment → unclassifiable

use super::Introspector;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Exports, RuntimeKind};
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Source file of a regular package.
const INIT_FILE: &str = "__init__.py";

/// Suffixes of compiled or Cython modules that can be imported but not read.
const OPAQUE_SUFFIXES: &[&str] = &[".so", ".pyd", ".pyx"];

// -- Regex patterns -----------------------------------------------------------

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)\s*(?:\((.*?)\))?\s*:").unwrap());

static RE_METACLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"metaclass\s*=\s*([\w.]+)").unwrap());

static RE_FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^from\s+(\.*)\s*([\w.]*)\s+import\s+(.+)$").unwrap());

static RE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import\s+(.+)$").unwrap());

static RE_ALL_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__all__\s*(?::[^=]*)?(\+?=)\s*(.*)$").unwrap());

static RE_ALL_EXTEND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__all__\.(?:extend|append)\s*\((.*)\)$").unwrap());

static RE_ALL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w.]*)\.__all__$").unwrap());

static RE_STRING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([A-Za-z_]\w*)["']"#).unwrap());

static RE_DEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^del\s+(.+)$").unwrap());

static RE_LAMBDA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*(?::[^=]*)?=\s*lambda\b").unwrap());

static RE_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s*(?::[^=]*)?=(.*)$").unwrap()
});

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());

// -- Logical lines ------------------------------------------------------------

/// One statement with continuations joined and comments removed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    pub indent: usize,
    pub text: String,
}

/// Split Python source into logical lines.
///
/// Newlines inside brackets, after a backslash, or inside triple-quoted
/// strings do not end a statement; they are replaced by spaces. `;` splits
/// statements that share a line.
pub(crate) fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let chars: Vec<char> = source.chars().collect();
    let mut lines = Vec::new();
    let mut text = String::new();
    let mut indent = 0usize;
    let mut started = false;
    let mut carried = false;
    let mut depth = 0usize;
    let mut string: Option<(char, bool)> = None;

    let mut finish = |text: &mut String, indent: usize| {
        let trimmed = text.trim_end();
        if !trimmed.is_empty() {
            lines.push(LogicalLine {
                indent,
                text: trimmed.to_string(),
            });
        }
        text.clear();
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if let Some((quote, triple)) = string {
            if c == '\\' && i + 1 < chars.len() {
                text.push(c);
                text.push(if chars[i + 1] == '\n' { ' ' } else { chars[i + 1] });
                i += 2;
                continue;
            }
            if c == quote {
                if !triple {
                    string = None;
                } else if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                    text.push_str(&format!("{quote}{quote}{quote}"));
                    string = None;
                    i += 3;
                    continue;
                }
                text.push(c);
                i += 1;
                continue;
            }
            if c == '\n' {
                if triple {
                    text.push(' ');
                    i += 1;
                    continue;
                }
                // Unterminated single-quoted string: the newline still ends it.
                string = None;
            } else {
                text.push(c);
                i += 1;
                continue;
            }
        }

        if !started {
            match c {
                ' ' | '\t' => {
                    if !carried {
                        indent += 1;
                    }
                    i += 1;
                    continue;
                }
                '\n' => {
                    indent = 0;
                    carried = false;
                    i += 1;
                    continue;
                }
                _ => started = true,
            }
        }

        match c {
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            '"' | '\'' => {
                let triple = chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c);
                if triple {
                    text.push_str(&format!("{c}{c}{c}"));
                    i += 3;
                } else {
                    text.push(c);
                    i += 1;
                }
                string = Some((c, triple));
                continue;
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '\\' if chars.get(i + 1) == Some(&'\n') => {
                text.push(' ');
                i += 2;
                continue;
            }
            ';' if depth == 0 => {
                finish(&mut text, indent);
                started = false;
                carried = true;
                i += 1;
                continue;
            }
            '\n' => {
                if depth > 0 {
                    text.push(' ');
                } else {
                    finish(&mut text, indent);
                    indent = 0;
                    started = false;
                    carried = false;
                }
                i += 1;
                continue;
            }
            _ => {}
        }
        text.push(c);
        i += 1;
    }
    finish(&mut text, indent);
    lines
}

// -- Namespaces ---------------------------------------------------------------

/// Names bound at the top level of one module.
#[derive(Debug, Default, Clone)]
struct Namespace {
    bindings: BTreeMap<String, RuntimeKind>,
    /// Contents of `__all__`, when the module defines it
    all: Option<Vec<String>>,
    /// Names bound to internal modules, with the module's dotted name
    modules: HashMap<String, String>,
    /// Classes whose metaclass is neither `type` nor `ABCMeta`
    metaclassed: HashSet<String>,
    /// Compiled or external module whose names cannot be read
    opaque: bool,
}

impl Namespace {
    fn opaque() -> Self {
        Self {
            opaque: true,
            ..Default::default()
        }
    }

    fn bind(&mut self, name: &str, kind: RuntimeKind) {
        self.unbind(name);
        self.bindings.insert(name.to_string(), kind);
    }

    fn bind_module(&mut self, name: &str, module: &str) {
        self.bind(name, RuntimeKind::Other);
        self.modules.insert(name.to_string(), module.to_string());
    }

    /// Bind `name` to `member` of `source`, keeping what is known about it.
    fn bind_from(&mut self, name: &str, kind: RuntimeKind, source: &Namespace, member: &str) {
        self.bind(name, kind);
        if source.metaclassed.contains(member) {
            self.metaclassed.insert(name.to_string());
        }
        if let Some(module) = source.modules.get(member) {
            self.modules.insert(name.to_string(), module.clone());
        }
    }

    /// `name = existing`
    fn alias(&mut self, name: &str, existing: &str) {
        let kind = self.bindings.get(existing).copied().unwrap_or(RuntimeKind::Other);
        let metaclassed = self.metaclassed.contains(existing);
        let module = self.modules.get(existing).cloned();
        self.bind(name, kind);
        if metaclassed {
            self.metaclassed.insert(name.to_string());
        }
        if let Some(module) = module {
            self.modules.insert(name.to_string(), module);
        }
    }

    fn unbind(&mut self, name: &str) {
        self.bindings.remove(name);
        self.modules.remove(name);
        self.metaclassed.remove(name);
    }

    /// Dotted module name behind a reference such as `core` or `pkg.core`.
    fn module_ref(&self, reference: &str) -> Option<String> {
        let (head, rest) = match reference.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (reference, None),
        };
        let base = self.modules.get(head)?;
        Some(match rest {
            Some(rest) => format!("{}.{}", base, rest),
            None => base.clone(),
        })
    }

    fn get(&self, name: &str) -> Option<RuntimeKind> {
        if self.opaque {
            return Some(RuntimeKind::Other);
        }
        self.bindings.get(name).copied()
    }

    /// Names a star import of this module binds.
    fn star_names(&self) -> Vec<String> {
        match &self.all {
            Some(all) => all.clone(),
            None => self
                .bindings
                .keys()
                .filter(|name| !name.starts_with('_'))
                .cloned()
                .collect(),
        }
    }
}

/// Where a dotted module name lives on disk.
#[derive(Debug)]
enum Location {
    /// Directory of a regular or namespace package
    Package(PathBuf),
    /// A single `.py` file
    Module(PathBuf),
    /// Compiled extension or Cython source
    Opaque,
    /// Outside the documented root
    External,
    Missing,
}

/// What `from <module> import <name>` finds.
#[derive(Debug)]
enum Member {
    Attribute(RuntimeKind),
    /// Submodule found on disk, by dotted name
    Submodule(String),
}

/// One `name [as alias]` item of an import statement.
#[derive(Debug, PartialEq, Eq)]
struct ImportItem {
    name: String,
    alias: Option<String>,
}

impl ImportItem {
    fn bound_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

fn parse_import_list(text: &str) -> Vec<ImportItem> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);
    text.split(',')
        .filter_map(|item| {
            let mut words = item.split_whitespace();
            let name = words.next()?.to_string();
            let alias = match (words.next(), words.next()) {
                (Some("as"), Some(alias)) => Some(alias.to_string()),
                _ => None,
            };
            Some(ImportItem { name, alias })
        })
        .collect()
}

/// Resolve `from <dots><target> import` relative to `package`.
fn resolve_relative(package: &str, dots: usize, target: &str) -> Option<String> {
    if dots == 0 {
        return Some(target.to_string());
    }
    let parts: Vec<&str> = package.split('.').collect();
    if dots - 1 >= parts.len() {
        return None;
    }
    let base = parts[..parts.len() - (dots - 1)].join(".");
    if target.is_empty() {
        Some(base)
    } else {
        Some(format!("{}.{}", base, target))
    }
}

/// Kind of a class with the given base list, looking bases up in `ns`.
///
/// The metaclass is inherited: a subclass of a class built by a custom
/// metaclass is unclassifiable too.
fn classify_class(bases: Option<&str>, ns: &Namespace) -> RuntimeKind {
    let Some(bases) = bases else {
        return RuntimeKind::Type;
    };
    let explicit = RE_METACLASS.captures(bases).map(|caps| caps[1].to_string());
    if let Some(meta) = explicit.as_deref() {
        if !matches!(meta, "ABCMeta" | "abc.ABCMeta" | "type") {
            return RuntimeKind::Other;
        }
    }

    let parents: Vec<&str> = bases
        .split(',')
        .map(str::trim)
        .filter(|base| !base.is_empty() && !base.contains('='))
        .map(|base| base.split('[').next().unwrap_or(base).trim())
        .collect();
    if parents.iter().any(|base| ns.metaclassed.contains(*base)) {
        return RuntimeKind::Other;
    }

    let abstract_meta = matches!(explicit.as_deref(), Some("ABCMeta" | "abc.ABCMeta"));
    let abstract_base = parents.iter().any(|base| {
        *base == "ABC" || *base == "abc.ABC" || ns.bindings.get(*base) == Some(&RuntimeKind::AbcMeta)
    });
    if abstract_meta || abstract_base {
        RuntimeKind::AbcMeta
    } else {
        RuntimeKind::Type
    }
}

fn import_error(module: &str, reason: impl Into<String>) -> Error {
    Error::Import {
        package: module.to_string(),
        reason: reason.into(),
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| Error::ReadSource {
            path: path.to_path_buf(),
            source,
        })
}

// -- Introspector -------------------------------------------------------------

/// Introspects packages by reading their Python sources.
pub struct SourceIntrospector {
    root_name: String,
    root_dir: PathBuf,
    cache: HashMap<String, Rc<Namespace>>,
    /// Modules being evaluated, with what they have bound so far
    loading: HashMap<String, Rc<Namespace>>,
}

impl SourceIntrospector {
    pub fn new(config: &Config) -> Self {
        Self {
            root_name: config.package_name.clone(),
            root_dir: config.package_dir.clone(),
            cache: HashMap::new(),
            loading: HashMap::new(),
        }
    }

    fn is_internal(&self, module: &str) -> bool {
        module == self.root_name || module.starts_with(&format!("{}.", self.root_name))
    }

    fn module_path(&self, module: &str) -> Option<PathBuf> {
        if module == self.root_name {
            return Some(self.root_dir.clone());
        }
        let rest = module.strip_prefix(&format!("{}.", self.root_name))?;
        let mut path = self.root_dir.clone();
        path.extend(rest.split('.'));
        Some(path)
    }

    fn locate(&self, module: &str) -> Location {
        let Some(path) = self.module_path(module) else {
            return Location::External;
        };
        if path.join(INIT_FILE).is_file() {
            return Location::Package(path);
        }
        let Some(stem) = path.file_name().map(|s| s.to_string_lossy().to_string()) else {
            return Location::Missing;
        };
        let file = path.with_file_name(format!("{}.py", stem));
        if file.is_file() {
            return Location::Module(file);
        }
        if path.is_dir() {
            return Location::Package(path);
        }
        if let Some(parent) = path.parent() {
            if has_opaque_module(parent, &stem) {
                return Location::Opaque;
            }
        }
        Location::Missing
    }

    fn namespace(&mut self, module: &str) -> Result<Rc<Namespace>> {
        let location = self.locate(module);
        self.namespace_at(module, location)
    }

    fn namespace_at(&mut self, module: &str, location: Location) -> Result<Rc<Namespace>> {
        if let Some(ns) = self.cache.get(module) {
            return Ok(Rc::clone(ns));
        }
        if let Some(partial) = self.loading.get(module) {
            debug!(module, "circular import, using partially initialised namespace");
            return Ok(Rc::clone(partial));
        }
        self.loading.insert(module.to_string(), Rc::new(Namespace::default()));
        let loaded = self.load(module, location);
        self.loading.remove(module);
        let ns = Rc::new(loaded?);
        self.cache.insert(module.to_string(), Rc::clone(&ns));
        Ok(ns)
    }

    fn load(&mut self, module: &str, location: Location) -> Result<Namespace> {
        match location {
            Location::Package(dir) => {
                let init = dir.join(INIT_FILE);
                // A directory without __init__.py imports as an empty namespace package
                if !init.is_file() {
                    return Ok(Namespace::default());
                }
                let source = read_source(&init)?;
                self.evaluate(module, module, &source)
            }
            Location::Module(file) => {
                let source = read_source(&file)?;
                let package = module.rsplit_once('.').map_or("", |(p, _)| p).to_string();
                self.evaluate(module, &package, &source)
            }
            Location::Opaque | Location::External => Ok(Namespace::opaque()),
            Location::Missing => Err(import_error(module, "no such module")),
        }
    }

    /// Expose what `module` has bound so far to imports that cycle back to it.
    fn publish(&mut self, module: &str, ns: &Namespace) {
        if let Some(slot) = self.loading.get_mut(module) {
            *slot = Rc::new(ns.clone());
        }
    }

    /// Bind every top-level statement of `source` into a fresh namespace.
    fn evaluate(&mut self, module: &str, package: &str, source: &str) -> Result<Namespace> {
        let mut ns = Namespace::default();

        for line in logical_lines(source) {
            if line.indent > 0 {
                continue;
            }
            let text = line.text.as_str();

            if let Some(caps) = RE_DEF.captures(text) {
                ns.bind(&caps[1], RuntimeKind::Function);
            } else if let Some(caps) = RE_CLASS.captures(text) {
                let kind = classify_class(caps.get(2).map(|m| m.as_str()), &ns);
                ns.bind(&caps[1], kind);
                if kind == RuntimeKind::Other {
                    ns.metaclassed.insert(caps[1].to_string());
                }
            } else if let Some(caps) = RE_FROM_IMPORT.captures(text) {
                let dots = caps[1].len();
                let target = resolve_relative(package, dots, &caps[2]).ok_or_else(|| {
                    import_error(module, "attempted relative import beyond top-level package")
                })?;
                self.publish(module, &ns);
                self.import_from(&mut ns, module, &target, &caps[3])?;
            } else if let Some(caps) = RE_IMPORT.captures(text) {
                for item in parse_import_list(&caps[1]) {
                    // `import a.b` binds `a`; `import a.b as c` binds `c` to `a.b`
                    let (bound, target) = match &item.alias {
                        Some(alias) => (alias.as_str(), item.name.as_str()),
                        None => {
                            let head = item.name.split('.').next().unwrap_or(&item.name);
                            (head, head)
                        }
                    };
                    if self.is_internal(target) {
                        ns.bind_module(bound, target);
                    } else {
                        ns.bind(bound, RuntimeKind::Other);
                    }
                }
            } else if let Some(caps) = RE_ALL_ASSIGN.captures(text) {
                self.publish(module, &ns);
                match self.all_names(&ns, &caps[2])? {
                    Some(names) if &caps[1] == "+=" => {
                        ns.all.get_or_insert_with(Vec::new).extend(names)
                    }
                    Some(names) => ns.all = Some(names),
                    None => drop_all(&mut ns, module, &caps[2]),
                }
            } else if let Some(caps) = RE_ALL_EXTEND.captures(text) {
                self.publish(module, &ns);
                match self.all_names(&ns, &caps[1])? {
                    Some(names) => ns.all.get_or_insert_with(Vec::new).extend(names),
                    None => drop_all(&mut ns, module, &caps[1]),
                }
            } else if let Some(caps) = RE_DEL.captures(text) {
                for name in caps[1].split(',').map(str::trim) {
                    ns.unbind(name);
                }
            } else if let Some(caps) = RE_LAMBDA.captures(text) {
                ns.bind(&caps[1], RuntimeKind::Function);
            } else if let Some(caps) = RE_ASSIGN.captures(text) {
                let value = caps[2].trim();
                // `==` is a comparison, not an assignment
                if value.starts_with('=') {
                    continue;
                }
                let targets: Vec<&str> = caps[1].split(',').map(str::trim).collect();
                if targets.len() == 1 && RE_IDENT.is_match(value) {
                    ns.alias(targets[0], value);
                } else {
                    for target in targets {
                        ns.bind(target, RuntimeKind::Other);
                    }
                }
            }
        }

        Ok(ns)
    }

    /// Apply `from <target> import <names>` to `ns`.
    fn import_from(
        &mut self,
        ns: &mut Namespace,
        module: &str,
        target: &str,
        names: &str,
    ) -> Result<()> {
        let items = parse_import_list(names);

        if !self.is_internal(target) {
            for item in &items {
                if item.name == "*" {
                    debug!(module, from = target, "star import from external module ignored");
                } else {
                    ns.bind(item.bound_name(), RuntimeKind::Other);
                }
            }
            return Ok(());
        }

        let source = self.namespace(target).map_err(|e| match e {
            Error::Import { reason, .. } => {
                import_error(module, format!("no module named '{}' ({})", target, reason))
            }
            other => other,
        })?;

        for item in &items {
            if item.name == "*" {
                if source.opaque {
                    warn!(module, from = target, "cannot expand star import from compiled module");
                }
                for name in source.star_names() {
                    match self.member(&source, target, &name) {
                        Some(Member::Attribute(kind)) => ns.bind_from(&name, kind, &source, &name),
                        Some(Member::Submodule(sub)) => ns.bind_module(&name, &sub),
                        None => {}
                    }
                }
                continue;
            }
            match self.member(&source, target, &item.name) {
                Some(Member::Attribute(kind)) => {
                    ns.bind_from(item.bound_name(), kind, &source, &item.name)
                }
                Some(Member::Submodule(sub)) => ns.bind_module(item.bound_name(), &sub),
                None => warn!(module, from = target, name = %item.name, "imported name not found"),
            }
        }
        Ok(())
    }

    /// `module.name`: an attribute of the module, else a submodule.
    fn member(&self, ns: &Namespace, module: &str, name: &str) -> Option<Member> {
        if let Some(kind) = ns.get(name) {
            return Some(Member::Attribute(kind));
        }
        let submodule = format!("{}.{}", module, name);
        match self.locate(&submodule) {
            Location::Missing => None,
            _ => Some(Member::Submodule(submodule)),
        }
    }

    /// Names listed by an `__all__` expression, or `None` when a term of it
    /// cannot be resolved.
    fn all_names(&mut self, ns: &Namespace, expr: &str) -> Result<Option<Vec<String>>> {
        let mut names = Vec::new();
        for term in split_terms(expr) {
            if term.starts_with(['[', '(', '"', '\'']) {
                names.extend(string_names(term));
                continue;
            }
            let listed = if term == "__all__" {
                ns.all.clone()
            } else if let Some(caps) = RE_ALL_REF.captures(term) {
                match ns.module_ref(&caps[1]) {
                    Some(target) if self.is_internal(&target) => {
                        self.namespace(&target)?.all.clone()
                    }
                    _ => None,
                }
            } else {
                None
            };
            match listed {
                Some(listed) => names.extend(listed),
                None => return Ok(None),
            }
        }
        Ok(Some(names))
    }
}

impl Introspector for SourceIntrospector {
    fn introspect(&mut self, package: &str, dir: &Path) -> Result<Exports> {
        // Importing `a.b.c` initialises `a` and then `a.b` first
        let parts: Vec<&str> = package.split('.').collect();
        for end in 1..parts.len() {
            let ancestor = parts[..end].join(".");
            if self.is_internal(&ancestor) {
                self.namespace(&ancestor)?;
            }
        }
        let ns = self.namespace_at(package, Location::Package(dir.to_path_buf()))?;
        for (name, kind) in &ns.bindings {
            debug!(package, name = %name, kind = ?kind, "bound name");
        }
        Ok(Exports::from_bindings(
            ns.bindings.iter().map(|(name, kind)| (name.clone(), *kind)),
        ))
    }
}

fn string_names(text: &str) -> Vec<String> {
    RE_STRING_NAME
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Split an expression on top-level `+`.
fn split_terms(expr: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in expr.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => {
                terms.push(expr[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push(expr[start..].trim());
    terms.retain(|term| !term.is_empty());
    terms
}

/// Forget `__all__` after an expression that cannot be followed statically.
fn drop_all(ns: &mut Namespace, module: &str, expr: &str) {
    warn!(
        module,
        value = %expr.trim(),
        "cannot resolve __all__, star imports fall back to public names"
    );
    ns.all = None;
}

/// Whether `dir` holds a compiled or Cython module named `stem`.
fn has_opaque_module(dir: &Path, stem: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    let prefix = format!("{}.", stem);
    entries.flatten().any(|entry| {
        let name = entry.file_name().to_string_lossy().to_string();
        name.starts_with(&prefix) && OPAQUE_SUFFIXES.iter().any(|s| name.ends_with(s))
    })
}
