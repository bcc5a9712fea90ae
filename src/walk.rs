//! Tree walking — enumerate the packages nested under a root package.
//!
//! Subdirectories are visited in name order so every run sees the same
//! traversal. A directory without the marker file hides its whole subtree.

use crate::config::Config;
use crate::detect;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immediate subdirectories of `dir` as `(name, path)`, sorted by name.
pub fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().to_string(), path));
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Whether `dir` contributes a package named `name` to this run.
pub fn accepts(config: &Config, name: &str, dir: &Path) -> Result<bool> {
    if !detect::is_package(dir, &config.marker)? {
        debug!(package = name, path = %dir.display(), "not a package, skipping subtree");
        return Ok(false);
    }
    if config.is_excluded(name) {
        debug!(package = name, "excluded by pattern, skipping subtree");
        return Ok(false);
    }
    Ok(true)
}

/// List every package the generator would document, parents before children.
///
/// Nothing is introspected or written.
pub fn discover(config: &Config) -> Result<Vec<String>> {
    discover_package(config, &config.package_name, &config.package_dir)
}

fn discover_package(config: &Config, name: &str, dir: &Path) -> Result<Vec<String>> {
    if !accepts(config, name, dir)? {
        return Ok(Vec::new());
    }
    let mut names = vec![name.to_string()];
    for (child, path) in subdirectories(dir)? {
        names.extend(discover_package(config, &format!("{}.{}", name, child), &path)?);
    }
    Ok(names)
}
