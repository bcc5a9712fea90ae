//! Symbol introspection — find the public classes and functions of a package.
//!
//! Implementations differ in where the namespace comes from; classification
//! always goes through [`Exports::from_bindings`].

pub mod manifest;
pub mod python;

use crate::config::Config;
use crate::error::Result;
use crate::model::Exports;
use std::path::Path;

/// Produces the classified exports of a detected package.
pub trait Introspector {
    /// Exports of the package `package` whose directory is `dir`.
    ///
    /// A package that cannot be loaded is an error, never an empty result.
    fn introspect(&mut self, package: &str, dir: &Path) -> Result<Exports>;
}

pub use manifest::ManifestIntrospector;
pub use python::SourceIntrospector;

/// Pick the introspector for a run: the export manifest when one is given,
/// otherwise the package sources.
pub fn create_introspector(config: &Config, manifest: Option<&Path>) -> Result<Box<dyn Introspector>> {
    match manifest {
        Some(path) => Ok(Box::new(ManifestIntrospector::load(path)?)),
        None => Ok(Box::new(SourceIntrospector::new(config))),
    }
}
