//! Go module root discovery.

use std::path::{Path, PathBuf};

use crate::error::GraphError;

/// Name of the file marking a module root.
pub const GO_MOD: &str = "go.mod";

/// A Go module on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRoot {
    /// Absolute directory containing `go.mod`.
    pub dir: PathBuf,
    /// Module path declared by the `module` directive.
    pub module_path: String,
}

/// Walks upward from `start` to the first directory containing `go.mod`.
///
/// # Errors
///
/// Returns [`GraphError::RootNotFound`] when no ancestor has a `go.mod`,
/// [`GraphError::Io`] when it can't be read and [`GraphError::Module`] when it
/// has no `module` directive.
pub fn find_root(start: &Path) -> Result<ModuleRoot, GraphError> {
    let start = start.canonicalize().map_err(|e| GraphError::Io {
        path: start.to_path_buf(),
        source: e,
    })?;

    let dir = start
        .ancestors()
        .find(|dir| dir.join(GO_MOD).is_file())
        .ok_or_else(|| GraphError::RootNotFound {
            start: start.clone(),
        })?;

    let go_mod = dir.join(GO_MOD);
    let content = std::fs::read_to_string(&go_mod).map_err(|e| GraphError::Io {
        path: go_mod.clone(),
        source: e,
    })?;
    let module_path = parse_module_path(&content).ok_or_else(|| GraphError::Module {
        path: go_mod,
        message: "missing `module` directive".to_string(),
    })?;

    tracing::debug!("module `{module_path}` rooted at {}", dir.display());

    Ok(ModuleRoot {
        dir: dir.to_path_buf(),
        module_path,
    })
}

/// Extracts the module path from `go.mod` content.
fn parse_module_path(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_module_directive() {
        let content = "// header\nmodule example.com/app // trailing\n\ngo 1.22\n";
        assert_eq!(parse_module_path(content), Some("example.com/app".into()));
    }

    #[test]
    fn parses_quoted_module() {
        assert_eq!(
            parse_module_path("module \"example.com/app\"\n"),
            Some("example.com/app".into())
        );
    }

    #[test]
    fn ignores_lookalike_lines() {
        assert_eq!(parse_module_path("modules x\ngo 1.22\n"), None);
        assert_eq!(parse_module_path("module\n"), None);
    }

    #[test]
    fn finds_root_from_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(GO_MOD), "module example.com/app\n").unwrap();
        let nested = tmp.path().join("pkg/orders/db");
        fs::create_dir_all(&nested).unwrap();

        let root = find_root(&nested).unwrap();
        assert_eq!(root.dir, tmp.path().canonicalize().unwrap());
        assert_eq!(root.module_path, "example.com/app");
    }

    #[test]
    fn missing_go_mod_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = find_root(tmp.path()).unwrap_err();
        assert!(matches!(err, GraphError::RootNotFound { .. }));
    }

    #[test]
    fn go_mod_without_module_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(GO_MOD), "go 1.22\n").unwrap();
        let err = find_root(tmp.path()).unwrap_err();
        assert!(matches!(err, GraphError::Module { .. }));
    }
}
