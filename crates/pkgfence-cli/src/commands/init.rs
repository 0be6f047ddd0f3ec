//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "pkgfence.toml";

const DEFAULT_CONFIG: &str = r#"# pkgfence configuration
#
# Packages are named by their directory relative to the module root
# (e.g. `pkg/orders/db`). The package in the module root is `main`.
#
# Patterns: `*` matches within one path segment, a trailing `**` matches
# everything below.

# God packages may import anything. The root package is always a god package.
god = [
    # "cmd/*",
]

# Tool packages may be imported by anything.
tool = [
    # "pkg/x/**",
]

# DB packages may only import tool packages.
db = [
    # "pkg/*/db",
]

# Extra allowed dependencies: "<importer pattern> <imported pattern>"
allow = [
    # "pkg/api pkg/service/*",
]

# Maximum package size (top-level declarations, specs and statements)
size = 4096

# Top-level keys must stay above this table.
[analyzer]
# Directory where the search for go.mod starts (default: current directory)
# root = "."

# Glob patterns of files to skip
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Respect .gitignore files
respect_gitignore = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to describe your package roles");
    println!("  2. Run: pkgfence check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgfence_core::{Config, RuleSet};

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert!(RuleSet::from_config(&config).is_ok());
    }

    #[test]
    fn edited_template_values_are_read() {
        let edited = DEFAULT_CONFIG
            .replace("# \"pkg/x/**\",", "\"pkg/x/**\",")
            .replace("size = 4096", "size = 10");
        assert_ne!(edited, DEFAULT_CONFIG);

        let config = Config::parse(&edited).unwrap();
        assert_eq!(config.tool, vec!["pkg/x/**"]);
        assert_eq!(config.size, 10);
        assert_eq!(config.analyzer, Config::default().analyzer);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "size = 1\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "size = 1\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
