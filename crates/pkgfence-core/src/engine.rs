//! Dependency rule engine.
//!
//! Decides for every import edge `(importer, imported)` whether it is allowed.
//! Rules are evaluated in a fixed order:
//!
//! 1. a God importer, or the graph's entry point, may import anything
//! 2. a Tool package may be imported by anything
//! 3. a DB importer may only import tools (unless an allow rule says otherwise)
//! 4. an allow rule whose left side matches the importer and right side the imported package
//! 5. everything else is a violation

use serde::Serialize;
use std::fmt;

use crate::graph::Package;
use crate::pattern_map::PatternGroupMap;
use crate::roles::RoleClassifier;
use crate::types::{DenyReason, DependencyViolation};

/// Which rule allowed an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllowReason {
    /// The importer is a God package.
    GodImporter,
    /// The imported package is a Tool package.
    ToolImported,
    /// An explicit allow rule covers the edge.
    AllowRule,
}

impl fmt::Display for AllowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GodImporter => write!(f, "the importer is a god package"),
            Self::ToolImported => write!(f, "the imported package is a tool package"),
            Self::AllowRule => write!(f, "an allow rule covers this dependency"),
        }
    }
}

/// Outcome of deciding a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "kebab-case")]
pub enum Verdict {
    /// The edge is permitted.
    Allowed(AllowReason),
    /// The edge is forbidden.
    Denied(DenyReason),
}

impl Verdict {
    /// True for [`Verdict::Allowed`].
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed(reason) => write!(f, "allowed: {reason}"),
            Self::Denied(reason) => write!(f, "violation: {reason}"),
        }
    }
}

/// Evaluates import edges against role sets and allow rules.
#[derive(Debug, Clone, Copy)]
pub struct DependencyRuleEngine<'a> {
    roles: &'a RoleClassifier,
    allow: &'a PatternGroupMap,
    entry_point: Option<&'a str>,
}

impl<'a> DependencyRuleEngine<'a> {
    /// Creates an engine over borrowed rule data.
    #[must_use]
    pub fn new(roles: &'a RoleClassifier, allow: &'a PatternGroupMap) -> Self {
        Self {
            roles,
            allow,
            entry_point: None,
        }
    }

    /// Treats `entry_point` as God regardless of the God set.
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: Option<&'a str>) -> Self {
        self.entry_point = entry_point;
        self
    }

    /// Decides a single edge.
    #[must_use]
    pub fn decide(&self, importer: &str, imported: &str) -> Verdict {
        if self.entry_point == Some(importer) || self.roles.is_god(importer) {
            return Verdict::Allowed(AllowReason::GodImporter);
        }
        if self.roles.is_tool(imported) {
            return Verdict::Allowed(AllowReason::ToolImported);
        }

        // Default deny for DB importers; the allow map below may still widen it.
        let deny = if self.roles.is_db(importer) {
            DenyReason::DbRestricted
        } else {
            DenyReason::NoMatchingRule
        };

        if self
            .allow
            .matching_set(importer)
            .is_some_and(|set| set.matches(imported))
        {
            return Verdict::Allowed(AllowReason::AllowRule);
        }

        Verdict::Denied(deny)
    }

    /// Checks every outgoing edge of `pkg`, one violation per forbidden edge.
    #[must_use]
    pub fn check_package(&self, pkg: &Package) -> Vec<DependencyViolation> {
        pkg.edges()
            .filter_map(|(importer, imported)| match self.decide(importer, imported) {
                Verdict::Allowed(reason) => {
                    tracing::trace!(importer, imported, %reason, "dependency allowed");
                    None
                }
                Verdict::Denied(reason) => Some(DependencyViolation {
                    importer: importer.to_string(),
                    imported: imported.to_string(),
                    reason,
                }),
            })
            .collect()
    }
}
