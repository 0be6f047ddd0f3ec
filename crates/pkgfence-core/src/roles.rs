//! Role classification of packages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pattern_set::PatternSet;

/// Architectural role of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May import anything.
    God,
    /// Leaf utility that anything may import.
    Tool,
    /// Shared domain/data package that may only import tools.
    Db,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::God => write!(f, "god"),
            Self::Tool => write!(f, "tool"),
            Self::Db => write!(f, "db"),
        }
    }
}

/// Classifies packages into roles from the configured pattern sets.
///
/// Roles are not cached; every query matches against the sets again.
#[derive(Debug, Clone, Default)]
pub struct RoleClassifier {
    god: PatternSet,
    tool: PatternSet,
    db: PatternSet,
}

impl RoleClassifier {
    /// Creates a classifier from the three role sets.
    #[must_use]
    pub fn new(god: PatternSet, tool: PatternSet, db: PatternSet) -> Self {
        Self { god, tool, db }
    }

    /// True for packages matching the God set.
    ///
    /// The entry point is God too, but that is a property of the graph, see
    /// [`DependencyRuleEngine::with_entry_point`](crate::DependencyRuleEngine::with_entry_point).
    #[must_use]
    pub fn is_god(&self, pkg: &str) -> bool {
        self.god.matches(pkg)
    }

    /// True for packages matching the Tool set.
    #[must_use]
    pub fn is_tool(&self, pkg: &str) -> bool {
        self.tool.matches(pkg)
    }

    /// True for packages matching the DB set.
    #[must_use]
    pub fn is_db(&self, pkg: &str) -> bool {
        self.db.matches(pkg)
    }

    /// All roles held by `pkg`, in [`Role`] order.
    #[must_use]
    pub fn roles_of(&self, pkg: &str) -> Vec<Role> {
        let mut roles = Vec::new();
        if self.is_god(pkg) {
            roles.push(Role::God);
        }
        if self.is_tool(pkg) {
            roles.push(Role::Tool);
        }
        if self.is_db(pkg) {
            roles.push(Role::Db);
        }
        roles
    }

    /// The configured God set.
    #[must_use]
    pub fn god(&self) -> &PatternSet {
        &self.god
    }

    /// The configured Tool set.
    #[must_use]
    pub fn tool(&self) -> &PatternSet {
        &self.tool
    }

    /// The configured DB set.
    #[must_use]
    pub fn db(&self) -> &PatternSet {
        &self.db
    }
}
