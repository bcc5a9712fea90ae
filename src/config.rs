//! Run configuration: where to read, where to write, and how stubs look.
//!
//! A `Config` is built once by the caller and passed by reference to the
//! driver and emitter. An optional `pkgdoc.toml` supplies defaults that
//! command-line flags override.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File whose presence makes a directory an importable package.
pub const DEFAULT_MARKER: &str = "__init__.py";

/// Output root used when neither the CLI nor the config file names one.
pub const DEFAULT_OUTPUT: &str = "apidoc";

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG: &str = "pkgdoc.toml";

/// Options written under each autodoc directive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AutodocOptions {
    pub class_options: Vec<String>,
    pub function_options: Vec<String>,
}

impl Default for AutodocOptions {
    fn default() -> Self {
        Self {
            class_options: vec![
                "members".to_string(),
                "undoc-members".to_string(),
                "inherited-members".to_string(),
            ],
            function_options: Vec::new(),
        }
    }
}

/// Contents of a `pkgdoc.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub marker: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub autodoc: AutodocOptions,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dotted name of the root package
    pub package_name: String,
    /// Directory of the root package
    pub package_dir: PathBuf,
    pub output_root: PathBuf,
    pub marker: String,
    pub exclude: Vec<glob::Pattern>,
    pub autodoc: AutodocOptions,
}

impl Config {
    /// Configuration with defaults for the package at `package_dir`.
    ///
    /// Without an explicit `name`, the package is named after its directory.
    pub fn new(package_dir: impl Into<PathBuf>, name: Option<String>) -> Result<Self> {
        let package_dir = package_dir.into();
        let package_name = match name {
            Some(name) => name,
            None => derive_package_name(&package_dir)?,
        };
        Ok(Self {
            package_name,
            package_dir,
            output_root: PathBuf::from(DEFAULT_OUTPUT),
            marker: DEFAULT_MARKER.to_string(),
            exclude: Vec::new(),
            autodoc: AutodocOptions::default(),
        })
    }

    /// Layer values from a config file on top of the defaults.
    pub fn apply_file(&mut self, file: FileConfig) -> Result<()> {
        if let Some(output) = file.output {
            self.output_root = output;
        }
        if let Some(marker) = file.marker {
            self.marker = marker;
        }
        for pattern in &file.exclude {
            self.add_exclude(pattern)?;
        }
        self.autodoc = file.autodoc;
        Ok(())
    }

    pub fn add_exclude(&mut self, pattern: &str) -> Result<()> {
        let compiled = glob::Pattern::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.exclude.push(compiled);
        Ok(())
    }

    /// Whether a fully-qualified package name matches an exclude pattern.
    pub fn is_excluded(&self, package: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(package))
    }
}

fn derive_package_name(dir: &Path) -> Result<String> {
    if let Some(name) = dir.file_name() {
        return Ok(name.to_string_lossy().to_string());
    }
    // "." or "..": use the resolved directory name
    let resolved = dir.canonicalize().map_err(|e| Error::Config {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| Error::Config {
            path: dir.to_path_buf(),
            reason: "cannot derive a package name; pass --name".to_string(),
        })
}
