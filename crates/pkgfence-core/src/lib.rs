//! # pkgfence-core
//!
//! Dependency rule engine for package architecture checks.
//!
//! This crate is language agnostic. It provides:
//!
//! - [`Pattern`], [`PatternSet`] and [`PatternGroupMap`] for the package path glob language
//! - [`RoleClassifier`] for God / Tool / DB roles
//! - [`DependencyRuleEngine`] for deciding single import edges
//! - [`SizeChecker`] for the per-package size budget
//! - [`check_graph`] for running everything over a [`PackageGraph`]
//!
//! ## Example
//!
//! ```ignore
//! use pkgfence_core::{check_graph, Config, RuleSet};
//!
//! let config = Config::from_file("pkgfence.toml".as_ref())?;
//! let rules = RuleSet::from_config(&config)?;
//! let result = check_graph(&graph, &rules);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod engine;
mod graph;
mod pattern;
mod pattern_map;
mod pattern_set;
mod roles;
mod rules;
mod size;
mod types;

pub use checker::check_graph;
pub use config::{AnalyzerConfig, Config, ConfigError, ConfigOverrides};
pub use engine::{AllowReason, DependencyRuleEngine, Verdict};
pub use graph::{Package, PackageGraph, ENTRY_POINT};
pub use pattern::{Pattern, PatternError};
pub use pattern_map::{PatternGroup, PatternGroupMap, EMPTY_MAP};
pub use pattern_set::{PatternSet, EMPTY_SET};
pub use roles::{Role, RoleClassifier};
pub use rules::RuleSet;
pub use size::{SizeChecker, DEFAULT_SIZE};
pub use types::{
    CheckResult, DenyReason, DependencyViolation, Finding, SizeExceeded, DEPENDENCY_CODE,
    SIZE_CODE,
};
