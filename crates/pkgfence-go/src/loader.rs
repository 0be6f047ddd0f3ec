//! Builds a [`PackageGraph`] from a Go module on disk.
//!
//! Every directory holding non-test `.go` files is one package, identified by
//! its root-relative path. The package in the module root is the entry point
//! and is called `main`; a top-level `main/` directory next to it is refused.
//! Only imports inside the module become graph edges.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use ignore::{DirEntry, WalkBuilder};
use pkgfence_core::{Package, PackageGraph, ENTRY_POINT};
use tracing::{debug, info, warn};

use crate::error::GraphError;
use crate::extractor::LanguageExtractor;
use crate::golang::GoExtractor;
use crate::module::{ModuleRoot, GO_MOD};

/// Directory names the Go tool never treats as packages.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Walks a module and assembles its package graph.
pub struct GraphLoader {
    root: ModuleRoot,
    excludes: Vec<Pattern>,
    respect_gitignore: bool,
    extractor: Box<dyn LanguageExtractor>,
}

impl GraphLoader {
    /// Creates a loader for `root` using the Go extractor.
    #[must_use]
    pub fn new(root: ModuleRoot) -> Self {
        Self {
            root,
            excludes: Vec::new(),
            respect_gitignore: true,
            extractor: Box::new(GoExtractor::new()),
        }
    }

    /// Skips files whose root-relative path matches one of `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Exclude`] for the first glob that doesn't compile.
    pub fn exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, GraphError> {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let compiled = Pattern::new(pattern).map_err(|source| GraphError::Exclude {
                pattern: pattern.to_string(),
                source,
            })?;
            self.excludes.push(compiled);
        }
        Ok(self)
    }

    /// Whether `.gitignore` files are honoured (default: true).
    #[must_use]
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    /// Walks the module and builds the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk fails or a file can't be read or parsed.
    pub fn load(&self) -> Result<PackageGraph, GraphError> {
        let files = self.discover_files()?;
        info!(
            "analyzing {} {} file(s) under {}",
            files.len(),
            self.extractor.language_id(),
            self.root.dir.display()
        );

        let mut packages: BTreeMap<String, Package> = BTreeMap::new();
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        let mut has_root_package = false;
        let mut main_dir: Option<PathBuf> = None;

        for path in files {
            let source = std::fs::read_to_string(&path).map_err(|e| GraphError::Io {
                path: path.clone(),
                source: e,
            })?;
            let mut analysis =
                self.extractor
                    .analyze(&source)
                    .map_err(|source| GraphError::Parse {
                        path: path.clone(),
                        source,
                    })?;
            analysis.file_path = self.relative(&path).to_path_buf();

            if analysis.has_errors {
                warn!(
                    "{} has syntax errors, its imports and size may be incomplete",
                    analysis.file_path.display()
                );
            }

            let id = package_id(&analysis.file_path);
            if id == ENTRY_POINT {
                match analysis.file_path.parent() {
                    Some(dir) if !dir.as_os_str().is_empty() => {
                        main_dir = Some(self.root.dir.join(dir));
                    }
                    _ => has_root_package = true,
                }
            }
            if let Some(clause) = &analysis.package {
                let declared = names.entry(id.clone()).or_insert_with(|| clause.name.clone());
                if *declared != clause.name {
                    warn!(
                        "{}:{} declares package `{}`, other files in {id} declare `{declared}`",
                        analysis.file_path.display(),
                        clause.line,
                        clause.name
                    );
                }
            }

            let package = packages
                .entry(id.clone())
                .or_insert_with(|| Package::new(id));
            package.size += analysis.size;
            package.imports.extend(
                analysis
                    .imports
                    .iter()
                    .filter_map(|import| resolve_import(&self.root.module_path, &import.path)),
            );
        }

        if let (true, Some(dir)) = (has_root_package, main_dir) {
            return Err(GraphError::EntryPointClash { dir });
        }

        let entry_point = has_root_package.then(|| ENTRY_POINT.to_string());
        debug!("found {} package(s)", packages.len());

        Ok(PackageGraph::new(packages.into_values().collect(), entry_point))
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root.dir).unwrap_or(path)
    }

    fn discover_files(&self) -> Result<Vec<PathBuf>, GraphError> {
        let mut builder = WalkBuilder::new(&self.root.dir);
        builder
            .hidden(false)
            .parents(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if is_ignored_name(&name) || !self.extractor.accepts(&name) {
                continue;
            }

            let rel = slash_path(self.relative(entry.path()));
            if self
                .excludes
                .iter()
                .any(|pattern| pattern.matches_with(&rel, GLOB_OPTIONS))
            {
                debug!("excluded {rel}");
                continue;
            }

            files.push(entry.into_path());
        }

        files.sort();
        Ok(files)
    }
}

/// Loads the package graph of `root`, skipping files matching `excludes`.
///
/// # Errors
///
/// See [`GraphLoader::exclude`] and [`GraphLoader::load`].
pub fn load_graph<S: AsRef<str>>(
    root: &ModuleRoot,
    excludes: &[S],
) -> Result<PackageGraph, GraphError> {
    GraphLoader::new(root.clone()).exclude(excludes)?.load()
}

/// Files and directories starting with `.` or `_` are invisible to the Go tool.
fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Ignored, vendor and testdata directories, and nested modules.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_some_and(|t| t.is_dir()) {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    is_ignored_name(&name)
        || SKIPPED_DIRS.contains(&&*name)
        || entry.path().join(GO_MOD).is_file()
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Package identifier of a root-relative source file.
fn package_id(file: &Path) -> String {
    match file.parent().map(slash_path) {
        Some(dir) if !dir.is_empty() => dir,
        _ => ENTRY_POINT.to_string(),
    }
}

/// Maps an import path to a package identifier, or `None` outside the module.
fn resolve_import(module_path: &str, import: &str) -> Option<String> {
    if import == module_path {
        return Some(ENTRY_POINT.to_string());
    }
    import
        .strip_prefix(module_path)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}
