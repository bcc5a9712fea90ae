//! Document emitter — write the stubs and the index of one package.
//!
//! Layout under the output root:
//!
//! - `<package>.rst` — package index
//! - `<package>/<Symbol>.rst` — one stub per class or function

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{DocumentFile, PackageNode};
use crate::render;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Emitter<'a> {
    config: &'a Config,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Directory holding the stubs of `package`.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.config.output_root.join(package)
    }

    /// Path of the index of `package`.
    pub fn index_path(&self, package: &str) -> PathBuf {
        self.config
            .output_root
            .join(format!("{}.{}", package, render::EXTENSION))
    }

    /// Write every document of `node`, overwriting previous output.
    pub fn emit(&self, node: &PackageNode) -> Result<Vec<DocumentFile>> {
        let stub_dir = self.package_dir(&node.name);
        if !stub_dir.is_dir() {
            fs::create_dir_all(&stub_dir).map_err(|source| Error::CreateDir {
                path: stub_dir.clone(),
                source,
            })?;
        }

        let mut written = Vec::new();
        for symbol in node.exports.symbols(&node.name) {
            let path = stub_dir.join(format!("{}.{}", symbol.name, render::EXTENSION));
            write(&path, &render::render_symbol_stub(&symbol, &self.config.autodoc))?;
            debug!(path = %path.display(), "wrote symbol stub");
            written.push(DocumentFile::SymbolStub { path, symbol });
        }

        let index = self.index_path(&node.name);
        write(
            &index,
            &render::render_package_index(&node.name, &node.exports, &node.children),
        )?;
        info!(
            package = %node.name,
            classes = node.exports.classes.len(),
            functions = node.exports.functions.len(),
            subpackages = node.children.len(),
            "wrote package index"
        );
        written.push(DocumentFile::PackageIndex {
            path: index,
            package: node.name.clone(),
        });
        Ok(written)
    }
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
