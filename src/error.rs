//! Error type shared by every stage of the generator.
//!
//! There is no recoverable category: every variant aborts the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a documentation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read source {}: {source}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A detected package (or a module it imports from) cannot be loaded.
    #[error("cannot import '{package}': {reason}")]
    Import { package: String, reason: String },

    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("invalid export manifest {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
