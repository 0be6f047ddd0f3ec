//! Package import graph consumed by the checker.
//!
//! Graphs are produced by a language frontend (see `pkgfence-go`) and are
//! read-only inputs to the rule engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier frontends give the package in the project root.
///
/// Only [`PackageGraph::entry_point`] makes a package the entry point; a
/// package that merely has this id gets no special treatment.
pub const ENTRY_POINT: &str = "main";

/// A package with its in-project imports and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Root-relative, `/` separated identifier (e.g. `pkg/orders/db`).
    pub id: String,
    /// Identifiers of the in-project packages imported by this package.
    pub imports: BTreeSet<String>,
    /// Opaque size metric.
    pub size: u64,
}

impl Package {
    /// Creates a package without imports and with size 0.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            imports: BTreeSet::new(),
            size: 0,
        }
    }

    /// Adds an imported package.
    #[must_use]
    pub fn with_import(mut self, imported: impl Into<String>) -> Self {
        self.imports.insert(imported.into());
        self
    }

    /// Sets the size metric.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Import edges leaving this package, excluding self-imports.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports
            .iter()
            .filter(move |imported| **imported != self.id)
            .map(move |imported| (self.id.as_str(), imported.as_str()))
    }
}

/// All packages of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageGraph {
    /// Packages sorted by identifier.
    pub packages: Vec<Package>,
    /// Identifier of the entry-point package, if the project has one.
    pub entry_point: Option<String>,
}

impl PackageGraph {
    /// Creates a graph, sorting packages by identifier.
    #[must_use]
    pub fn new(mut packages: Vec<Package>, entry_point: Option<String>) -> Self {
        packages.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            packages,
            entry_point,
        }
    }

    /// Looks up a package by identifier.
    #[must_use]
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// True if `id` is the entry point.
    #[must_use]
    pub fn is_entry_point(&self, id: &str) -> bool {
        self.entry_point.as_deref() == Some(id)
    }
}
