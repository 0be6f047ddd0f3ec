//! Compiled, immutable rule set built once from [`Config`].

use tracing::info;

use crate::config::{Config, ConfigError};
use crate::engine::DependencyRuleEngine;
use crate::graph::PackageGraph;
use crate::pattern::PatternError;
use crate::pattern_map::PatternGroupMap;
use crate::pattern_set::PatternSet;
use crate::roles::RoleClassifier;
use crate::size::SizeChecker;

/// Everything the checker needs to evaluate a package graph.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    roles: RoleClassifier,
    allow: PatternGroupMap,
    size: SizeChecker,
}

impl RuleSet {
    /// Creates a rule set from already compiled parts.
    #[must_use]
    pub fn new(roles: RoleClassifier, allow: PatternGroupMap, size: SizeChecker) -> Self {
        Self { roles, allow, size }
    }

    /// Compiles all patterns of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rule`] for the first pattern or allow entry that
    /// fails to compile.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let god = compile_set("god", &config.god)?;
        let tool = compile_set("tool", &config.tool)?;
        let db = compile_set("db", &config.db)?;

        let mut allow = PatternGroupMap::new();
        for (i, entry) in config.allow.iter().enumerate() {
            allow.add(entry).map_err(|source| rule_error("allow", i, source))?;
        }

        Ok(Self::new(
            RoleClassifier::new(god, tool, db),
            allow,
            SizeChecker::new(config.size),
        ))
    }

    /// Role classifier.
    #[must_use]
    pub fn roles(&self) -> &RoleClassifier {
        &self.roles
    }

    /// Allow rules.
    #[must_use]
    pub fn allow(&self) -> &PatternGroupMap {
        &self.allow
    }

    /// Size checker.
    #[must_use]
    pub fn size(&self) -> &SizeChecker {
        &self.size
    }

    /// Dependency engine borrowing this rule set, without an entry point.
    #[must_use]
    pub fn engine(&self) -> DependencyRuleEngine<'_> {
        DependencyRuleEngine::new(&self.roles, &self.allow)
    }

    /// Dependency engine treating the entry point of `graph` as God.
    #[must_use]
    pub fn engine_for<'a>(&'a self, graph: &'a PackageGraph) -> DependencyRuleEngine<'a> {
        self.engine().with_entry_point(graph.entry_point.as_deref())
    }

    /// Logs the effective configuration.
    pub fn log_summary(&self) {
        info!("configuration god: {}", self.roles.god());
        info!("configuration tool: {}", self.roles.tool());
        info!("configuration db: {}", self.roles.db());
        info!("configuration allow: {}", self.allow);
        info!("configuration size: {}", self.size.ceiling());
    }
}

fn compile_set(key: &str, sources: &[String]) -> Result<PatternSet, ConfigError> {
    let mut set = PatternSet::new();
    for (i, source) in sources.iter().enumerate() {
        set.add(source).map_err(|e| rule_error(key, i, e))?;
    }
    Ok(set)
}

fn rule_error(key: &str, index: usize, source: PatternError) -> ConfigError {
    ConfigError::Rule {
        context: format!("{key}[{index}]"),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_empty_sets() {
        let rules = RuleSet::from_config(&Config::default()).unwrap();
        assert_eq!(rules.roles().god().render(), "...");
        assert_eq!(rules.roles().tool().render(), "...");
        assert_eq!(rules.allow().render(), ".....");
        assert_eq!(rules.size().ceiling(), 4096);
    }

    #[test]
    fn engine_for_uses_the_graph_entry_point() {
        let rules = RuleSet::from_config(&Config::default()).unwrap();
        let rooted = PackageGraph::new(vec![], Some("main".into()));
        let rootless = PackageGraph::new(vec![], None);
        assert!(rules.engine_for(&rooted).decide("main", "pkg/a").is_allowed());
        assert!(!rules.engine_for(&rootless).decide("main", "pkg/a").is_allowed());
    }

    #[test]
    fn compiles_everything() {
        let config = Config::parse(
            r#"
god = ["cmd/*"]
tool = ["pkg/mysupertool", "pkg/x/**", "pkg/x/**"]
db = ["pkg/db", "pkg/entities"]
allow = ["a b", "c d"]
size = 3072
"#,
        )
        .unwrap();
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.roles().tool().render(), "`pkg/mysupertool`, `pkg/x/**`");
        assert_eq!(rules.roles().db().render(), "`pkg/db`, `pkg/entities`");
        assert_eq!(rules.allow().render(), "`a`: `b` ; `c`: `d`");
        assert_eq!(rules.size().ceiling(), 3072);
    }

    #[test]
    fn invalid_pattern_reports_context() {
        let config = Config {
            tool: vec!["pkg/x/**".into(), "pkg/**/y".into()],
            ..Config::default()
        };
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Rule {
                source: PatternError::InvalidPattern { .. },
                ..
            }
        ));
        assert!(err.to_string().starts_with("tool[1]: "));
    }

    #[test]
    fn malformed_allow_entry_reports_context() {
        let config = Config {
            allow: vec!["pkg/a pkg/b".into(), "pkg/a".into()],
            ..Config::default()
        };
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Rule {
                source: PatternError::MalformedGroup { found: 1, .. },
                ..
            }
        ));
        assert!(err.to_string().starts_with("allow[1]: "));
    }
}
