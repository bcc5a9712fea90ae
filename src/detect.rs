//! Package detection — a directory is a package iff it holds the marker file.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Return true when `marker` is a direct child of `dir`.
///
/// Only the directory listing is consulted, so a marker that is itself a
/// directory or a dangling link still counts. Listing failures are fatal.
pub fn is_package(dir: &Path, marker: &str) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_name() == marker {
            return Ok(true);
        }
    }
    Ok(false)
}
