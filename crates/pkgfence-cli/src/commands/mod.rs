//! Subcommand implementations and the pieces they share.

pub mod check;
pub mod explain;
pub mod init;
pub mod output;

use anyhow::{Context, Result};
use pkgfence_core::{Config, ConfigError, ConfigOverrides, PackageGraph, RuleSet};
use pkgfence_go::{find_root, GraphError, GraphLoader};
use std::path::Path;
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing to report.
    Clean,
    /// Findings (or a denied edge) were reported.
    Findings,
    /// Configuration or usage error.
    ConfigFailure,
    /// The module root or the package graph couldn't be built.
    GraphFailure,
}

impl Status {
    /// Classifies a command error. A bad exclude glob is a usage error.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<GraphError>() {
            None | Some(GraphError::Exclude { .. }) => Self::ConfigFailure,
            Some(_) => Self::GraphFailure,
        }
    }

    /// Process exit code.
    pub fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Findings => 1,
            Self::ConfigFailure => 2,
            Self::GraphFailure => 3,
        }
    }

    /// Process exit status.
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Prints a command error to stderr, with diagnostics for bad patterns.
pub fn report_error(err: &anyhow::Error) {
    if let Some(ConfigError::Rule { context, source }) = err.downcast_ref::<ConfigError>() {
        eprintln!("Error: invalid configuration entry {context}");
        eprintln!("{:?}", miette::Report::new(source.clone()));
        return;
    }
    eprintln!("Error: {err:?}");
}

/// Loads the config for `project_dir`, layers `overrides` on it and compiles the rules.
pub fn load_rules(
    project_dir: &Path,
    explicit: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<(Config, RuleSet)> {
    let source = config_resolver::resolve(project_dir, explicit);
    let mut config = match &source {
        ConfigSource::Default => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    config.apply(overrides);
    let rules = RuleSet::from_config(&config)?;
    Ok((config, rules))
}

/// Finds the Go module for `path` and builds its package graph.
///
/// `exclude` globs are added to the configured ones.
pub fn load_graph(path: &Path, config: &Config, exclude: &[String]) -> Result<PackageGraph> {
    let start = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };
    let root = find_root(&start).context("Failed to locate the Go module")?;
    tracing::info!("module `{}` at {}", root.module_path, root.dir.display());

    let excludes: Vec<&str> = config
        .analyzer
        .exclude
        .iter()
        .chain(exclude)
        .map(String::as_str)
        .collect();
    let loader = GraphLoader::new(root)
        .exclude(&excludes)
        .context("Invalid exclude pattern")?
        .respect_gitignore(config.analyzer.respect_gitignore);

    loader.load().context("Failed to build the package graph")
}
