//! reStructuredText templates for symbol stubs and package indexes.
//!
//! Pure string building: no filesystem access happens here, so the exact
//! bytes of every generated document can be checked in isolation.

use crate::config::AutodocOptions;
use crate::model::{Exports, Symbol, SymbolKind};

/// Indentation of cross-reference list items in an index.
const INDENT: &str = "    ";

/// File extension of every generated document.
pub const EXTENSION: &str = "rst";

/// Render the stub document for one class or function.
pub fn render_symbol_stub(symbol: &Symbol, options: &AutodocOptions) -> String {
    let qualified = symbol.qualified_name();
    let (directive, flags) = match symbol.kind {
        SymbolKind::Class => ("autoclass", &options.class_options),
        SymbolKind::Function => ("autofunction", &options.function_options),
    };

    let mut out = String::new();
    push_title(&mut out, &qualified, '=');
    out.push('\n');
    out.push_str(&format!(".. {}:: {}\n", directive, qualified));
    for flag in flags {
        out.push_str(&format!("{}:{}:\n", INDENT, flag));
    }
    out
}

/// Render the index document of a package.
///
/// `children` are the direct subpackages only; deeper packages are reached
/// through the children's own indexes.
pub fn render_package_index(package: &str, exports: &Exports, children: &[String]) -> String {
    let mut out = String::new();
    push_title(&mut out, package, '=');
    out.push('\n');
    out.push_str(&format!(".. automodule:: {}\n", package));
    out.push('\n');

    let symbol_link = |name: &String| {
        (
            format!("{}.{}", package, name),
            format!("{}/{}", package, name),
        )
    };
    let classes: Vec<_> = exports.classes.iter().map(symbol_link).collect();
    let functions: Vec<_> = exports.functions.iter().map(symbol_link).collect();
    let subpackages: Vec<_> = children.iter().map(|c| (c.clone(), c.clone())).collect();

    push_section(&mut out, "Classes", &classes);
    push_section(&mut out, "Functions", &functions);
    push_section(&mut out, "Subpackages", &subpackages);
    out
}

/// Title line plus an underline of the same character length.
fn push_title(out: &mut String, title: &str, underline: char) {
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat(underline).take(title.chars().count()));
    out.push('\n');
}

/// Section header followed by `:doc:` links as `(text, target)` pairs.
fn push_section(out: &mut String, title: &str, links: &[(String, String)]) {
    push_title(out, title, '-');
    out.push('\n');
    for (text, target) in links {
        out.push_str(&render_doc_link(text, target));
        out.push('\n');
    }
    if !links.is_empty() {
        out.push('\n');
    }
}

/// A single cross-reference list item.
fn render_doc_link(text: &str, target: &str) -> String {
    format!("{}- :doc:`{} <{}>`", INDENT, text, target)
}
