//! pkgdoc — generate Sphinx autodoc stubs for a Python package tree.
//!
//! For every package under a root (a directory holding `__init__.py`) the
//! generator writes:
//!
//! - `<output>/<package>.rst` — index with the package's classes, functions
//!   and direct subpackages as `:doc:` links
//! - `<output>/<package>/<Symbol>.rst` — one `autoclass` / `autofunction`
//!   stub per public symbol
//!
//! Directories without the marker file are skipped together with their
//! subtree. Any other problem aborts the run.

pub mod config;
pub mod detect;
pub mod driver;
pub mod emit;
pub mod error;
pub mod introspect;
pub mod model;
pub mod render;
pub mod walk;

pub use config::{AutodocOptions, Config, FileConfig};
pub use driver::Generator;
pub use error::{Error, Result};
pub use model::{
    DocumentFile, Exports, PackageCounts, Report, RuntimeKind, Symbol, SymbolKind,
};

use std::path::Path;

/// Document the package described by `config`.
///
/// Symbols come from `manifest` when given, otherwise from the sources.
pub fn generate(config: &Config, manifest: Option<&Path>) -> Result<Report> {
    let introspector = introspect::create_introspector(config, manifest)?;
    Generator::new(config, introspector).run()
}
