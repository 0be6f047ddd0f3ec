//! Findings produced by a check run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule code for forbidden dependencies.
pub const DEPENDENCY_CODE: &str = "PF001";

/// Rule code for oversized packages.
pub const SIZE_CODE: &str = "PF002";

/// Why an import edge was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenyReason {
    /// The importer is a DB package and may only use tools.
    DbRestricted,
    /// No role or allow rule covers the edge.
    NoMatchingRule,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DbRestricted => write!(f, "db packages may only depend on tool packages"),
            Self::NoMatchingRule => write!(f, "no rule allows this dependency"),
        }
    }
}

/// A forbidden import edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyViolation {
    /// The importing package.
    pub importer: String,
    /// The imported package.
    pub imported: String,
    /// Why the edge was rejected.
    pub reason: DenyReason,
}

impl fmt::Display for DependencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "package `{}` isn't allowed to import package `{}` ({})",
            self.importer, self.imported, self.reason
        )
    }
}

/// A package whose size is above the configured ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeExceeded {
    /// The oversized package.
    pub package: String,
    /// Configured maximum.
    pub ceiling: u64,
    /// Measured size.
    pub actual: u64,
}

impl fmt::Display for SizeExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the maximum size for package `{}` is {} but its real size is {}",
            self.package, self.ceiling, self.actual
        )
    }
}

/// A single finding of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Finding {
    /// Forbidden import edge.
    Dependency(DependencyViolation),
    /// Oversized package.
    Size(SizeExceeded),
}

impl Finding {
    /// Rule code of this finding.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dependency(_) => DEPENDENCY_CODE,
            Self::Size(_) => SIZE_CODE,
        }
    }

    /// The package the finding is reported for.
    #[must_use]
    pub fn package(&self) -> &str {
        match self {
            Self::Dependency(v) => &v.importer,
            Self::Size(s) => &s.package,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dependency(v) => write!(f, "[{}] {v}", self.code()),
            Self::Size(s) => write!(f, "[{}] {s}", self.code()),
        }
    }
}

impl From<DependencyViolation> for Finding {
    fn from(v: DependencyViolation) -> Self {
        Self::Dependency(v)
    }
}

impl From<SizeExceeded> for Finding {
    fn from(s: SizeExceeded) -> Self {
        Self::Size(s)
    }
}

/// Result of checking a package graph.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckResult {
    /// All findings, grouped by package.
    pub findings: Vec<Finding>,
    /// Number of packages checked.
    pub packages_checked: usize,
    /// Number of import edges evaluated.
    pub edges_checked: usize,
}

impl CheckResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the run found any problem.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Counts (dependency violations, size errors).
    #[must_use]
    pub fn count_by_kind(&self) -> (usize, usize) {
        let deps = self
            .findings
            .iter()
            .filter(|f| matches!(f, Finding::Dependency(_)))
            .count();
        (deps, self.findings.len() - deps)
    }

    /// Iterates over the dependency violations.
    pub fn dependency_violations(&self) -> impl Iterator<Item = &DependencyViolation> {
        self.findings.iter().filter_map(|f| match f {
            Finding::Dependency(v) => Some(v),
            Finding::Size(_) => None,
        })
    }

    /// Iterates over the size errors.
    pub fn size_errors(&self) -> impl Iterator<Item = &SizeExceeded> {
        self.findings.iter().filter_map(|f| match f {
            Finding::Size(s) => Some(s),
            Finding::Dependency(_) => None,
        })
    }
}
