//! Driver — walk, introspect and emit a whole package tree.
//!
//! Names are collected parents first; documents are written children first,
//! so a package's index is emitted once its direct children are known.

use crate::config::Config;
use crate::emit::Emitter;
use crate::error::Result;
use crate::introspect::Introspector;
use crate::model::{PackageCounts, PackageNode, Report};
use crate::walk;
use std::path::Path;
use tracing::debug;

pub struct Generator<'a> {
    config: &'a Config,
    introspector: Box<dyn Introspector>,
    emitter: Emitter<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config, introspector: Box<dyn Introspector>) -> Self {
        Self {
            config,
            introspector,
            emitter: Emitter::new(config),
        }
    }

    /// Document the root package and everything nested under it.
    pub fn run(&mut self) -> Result<Report> {
        let mut report = Report::default();
        let config = self.config;
        report.packages =
            self.document_package(&config.package_name, &config.package_dir, &mut report)?;
        Ok(report)
    }

    /// Returns `name` followed by every package documented beneath it, or
    /// nothing when `dir` is not a package.
    fn document_package(&mut self, name: &str, dir: &Path, report: &mut Report) -> Result<Vec<String>> {
        if !walk::accepts(self.config, name, dir)? {
            return Ok(Vec::new());
        }

        let mut children = Vec::new();
        let mut descendants = Vec::new();
        for (child, path) in walk::subdirectories(dir)? {
            let child_name = format!("{}.{}", name, child);
            let names = self.document_package(&child_name, &path, report)?;
            if !names.is_empty() {
                children.push(child_name);
            }
            descendants.extend(names);
        }

        let exports = self.introspector.introspect(name, dir)?;
        debug!(
            package = name,
            classes = ?exports.classes,
            functions = ?exports.functions,
            "introspected package"
        );

        let node = PackageNode {
            name: name.to_string(),
            path: dir.to_path_buf(),
            exports,
            children,
        };
        report.documents.extend(self.emitter.emit(&node)?);
        report.counts.push(PackageCounts::new(name, &node.exports));

        let mut names = Vec::with_capacity(descendants.len() + 1);
        names.push(node.name);
        names.extend(descendants);
        Ok(names)
    }
}
