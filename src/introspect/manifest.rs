//! Export manifests — namespaces recorded ahead of time instead of read from source.
//!
//! ```json
//! {
//!   "packages": {
//!     "pkg": [
//!       {"name": "Bar", "kind": "type"},
//!       {"name": "Shape", "kind": "abc-meta"},
//!       {"name": "foo", "kind": "function"},
//!       {"name": "VERSION", "kind": "int"}
//!     ]
//!   }
//! }
//! ```

use super::Introspector;
use crate::error::{Error, Result};
use crate::model::{Exports, RuntimeKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    packages: HashMap<String, Vec<ManifestEntry>>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    kind: String,
}

/// Map a manifest kind string to a runtime kind.
///
/// Anything but `type`, `abc-meta` and `function` is unclassifiable.
pub fn parse_kind(kind: &str) -> RuntimeKind {
    match kind {
        "type" => RuntimeKind::Type,
        "abc-meta" | "ABCMeta" => RuntimeKind::AbcMeta,
        "function" => RuntimeKind::Function,
        _ => RuntimeKind::Other,
    }
}

/// Introspects packages by looking them up in an export manifest.
#[derive(Debug)]
pub struct ManifestIntrospector {
    path: PathBuf,
    packages: HashMap<String, Vec<(String, RuntimeKind)>>,
}

impl ManifestIntrospector {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let file: ManifestFile = serde_json::from_str(text).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let packages = file
            .packages
            .into_iter()
            .map(|(package, entries)| {
                let bindings = entries
                    .into_iter()
                    .map(|entry| (entry.name, parse_kind(&entry.kind)))
                    .collect();
                (package, bindings)
            })
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            packages,
        })
    }
}

impl Introspector for ManifestIntrospector {
    fn introspect(&mut self, package: &str, _dir: &Path) -> Result<Exports> {
        let bindings = self.packages.get(package).ok_or_else(|| Error::Import {
            package: package.to_string(),
            reason: format!("not listed in manifest {}", self.path.display()),
        })?;
        Ok(Exports::from_bindings(bindings.iter().cloned()))
    }
}
