//! Configuration types for pkgfence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pattern::PatternError;
use crate::size::DEFAULT_SIZE;

/// Top-level configuration as written in `pkgfence.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// God packages, which may import anything.
    #[serde(default)]
    pub god: Vec<String>,

    /// Tool packages, which anything may import.
    #[serde(default)]
    pub tool: Vec<String>,

    /// DB packages, which may only import tools.
    #[serde(default)]
    pub db: Vec<String>,

    /// Allowed dependencies as `"importer-pattern importee-pattern"` pairs.
    #[serde(default)]
    pub allow: Vec<String>,

    /// Maximum size of a package.
    #[serde(default = "default_size")]
    pub size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            god: Vec::new(),
            tool: Vec::new(),
            db: Vec::new(),
            allow: Vec::new(),
            size: DEFAULT_SIZE,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Layers command line / environment values on top of the file values.
    ///
    /// Patterns are appended (duplicates are dropped later when compiling),
    /// a size replaces the file value.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        self.god.extend(overrides.god);
        self.tool.extend(overrides.tool);
        self.db.extend(overrides.db);
        self.allow.extend(overrides.allow);
        if let Some(size) = overrides.size {
            self.size = size;
        }
    }
}

/// Values given on the command line or in the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Extra God patterns.
    pub god: Vec<String>,
    /// Extra Tool patterns.
    pub tool: Vec<String>,
    /// Extra DB patterns.
    pub db: Vec<String>,
    /// Extra allow entries.
    pub allow: Vec<String>,
    /// Size ceiling replacing the configured one.
    pub size: Option<u64>,
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Directory where project root discovery starts (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns of source files to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string(), "**/testdata/**".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_size() -> u64 {
    DEFAULT_SIZE
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A pattern or allow entry is invalid.
    #[error("{context}: {source}")]
    Rule {
        /// Where the entry was found (e.g. `allow[2]`).
        context: String,
        /// The underlying pattern error.
        source: PatternError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.god.is_empty());
        assert_eq!(config.size, 4096);
        assert_eq!(config, Config::parse("").unwrap());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
god = ["cmd/*"]
tool = ["pkg/x/**"]
db = ["pkg/*/db"]
allow = ["pkg/a pkg/b", "pkg/api/** pkg/service/*"]
size = 3072

[analyzer]
root = "./dir/bla"
exclude = ["**/generated/**"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./dir/bla"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert_eq!(config.god, vec!["cmd/*"]);
        assert_eq!(config.allow.len(), 2);
        assert_eq!(config.size, 3072);
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let err = Config::parse("size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let misplaced = "[analyzer]\nexclude = []\ntool = [\"pkg/x/**\"]\n";
        assert!(matches!(
            Config::parse(misplaced),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::parse("tools = [\"pkg/x/**\"]"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::parse("tool = [\"pkg/x/**\"]\nsize = 2048").unwrap();
        config.apply(ConfigOverrides {
            tool: vec!["pkg/mysupertool".into()],
            god: vec!["pkg/service".into()],
            ..ConfigOverrides::default()
        });
        assert_eq!(config.tool, vec!["pkg/x/**", "pkg/mysupertool"]);
        assert_eq!(config.god, vec!["pkg/service"]);
        assert_eq!(config.size, 2048);

        config.apply(ConfigOverrides {
            size: Some(100),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.size, 100);
    }
}
