//! Runs the `pkgfence` binary against throwaway Go modules.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "go.mod", "module example.com/app\n\ngo 1.22\n");
    write(
        root,
        "main.go",
        "package main\n\nimport \"example.com/app/pkg/api\"\n\nfunc main() { api.Run() }\n",
    );
    write(
        root,
        "pkg/api/api.go",
        "package api\n\nimport (\n\t\"example.com/app/pkg/orders/db\"\n\t\"example.com/app/pkg/x/log\"\n)\n\nfunc Run() {\n\tlog.Info(db.Name)\n}\n",
    );
    write(root, "pkg/orders/db/db.go", "package db\n\nconst Name = \"orders\"\n");
    write(
        root,
        "pkg/x/log/log.go",
        "package log\n\nfunc Info(string) {}\n",
    );
    tmp
}

fn pkgfence(dir: &Path, args: &[&str]) -> Output {
    let global = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_pkgfence"))
        .args(args)
        .current_dir(dir)
        .env("PKGFENCE_CONFIG_DIR", global.path())
        .env_remove("PKGFENCE_GOD")
        .env_remove("PKGFENCE_TOOL")
        .env_remove("PKGFENCE_DB")
        .env_remove("PKGFENCE_ALLOW")
        .env_remove("PKGFENCE_SIZE")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn reports_violations_with_exit_code_1() {
    let tmp = project();
    write(tmp.path(), "pkgfence.toml", "tool = [\"pkg/x/**\"]\n");

    let output = pkgfence(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "pkg/api: [PF001] package `pkg/api` isn't allowed to import package `pkg/orders/db` (no rule allows this dependency)\n"
    );
}

#[test]
fn clean_project_exits_with_0() {
    let tmp = project();
    write(
        tmp.path(),
        "pkgfence.toml",
        "tool = [\"pkg/x/**\"]\nallow = [\"pkg/api pkg/*/db\"]\n",
    );

    let output = pkgfence(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Found 0 dependency violation(s)"));
}

#[test]
fn flags_layer_on_top_of_config() {
    let tmp = project();
    write(tmp.path(), "pkgfence.toml", "tool = [\"pkg/x/**\"]\n");

    let output = pkgfence(
        tmp.path(),
        &["check", "--allow", "pkg/api pkg/orders/db", "--size", "1"],
    );
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(!out.contains("PF001"), "{out}");
    assert!(out.contains("PF002"), "{out}");
}

#[test]
fn json_output_is_machine_readable() {
    let tmp = project();
    let output = pkgfence(tmp.path(), &["check", "--format", "json", "--tool", "pkg/x/**"]);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["packages_checked"], 4);
    assert_eq!(json["findings"][0]["kind"], "dependency");
    assert_eq!(json["findings"][0]["importer"], "pkg/api");
}

#[test]
fn bad_pattern_exits_with_2() {
    let tmp = project();
    write(tmp.path(), "pkgfence.toml", "tool = [\"pkg/**/x\"]\n");

    let output = pkgfence(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("tool[0]"));
}

#[test]
fn bad_exclude_glob_exits_with_2() {
    let tmp = project();
    let output = pkgfence(tmp.path(), &["check", "--exclude", "pkg/[x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("pkg/[x"));
}

#[test]
fn misplaced_config_key_exits_with_2() {
    let tmp = project();
    write(
        tmp.path(),
        "pkgfence.toml",
        "[analyzer]\nexclude = []\ntool = [\"pkg/x/**\"]\n",
    );
    let output = pkgfence(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn main_directory_next_to_root_package_exits_with_3() {
    let tmp = project();
    write(tmp.path(), "main/main.go", "package main\n\nfunc main() {}\n");
    let output = pkgfence(tmp.path(), &["check", "--tool", "pkg/x/**"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn missing_module_exits_with_3() {
    let tmp = TempDir::new().unwrap();
    let output = pkgfence(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn explain_prints_the_deciding_rule() {
    let tmp = project();
    let output = pkgfence(
        tmp.path(),
        &["explain", "--db", "pkg/*/db", "pkg/orders/db", "pkg/users/db"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("violation: db packages may only depend on tool packages"));
}

#[test]
fn explain_knows_the_entry_point() {
    let tmp = project();
    let output = pkgfence(tmp.path(), &["explain", "main", "pkg/orders/db"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("importer `main`: entry point\n"));
}

#[test]
fn init_writes_a_template_once() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(pkgfence(tmp.path(), &["init"]).status.code(), Some(0));
    assert!(tmp.path().join("pkgfence.toml").is_file());
    assert_eq!(pkgfence(tmp.path(), &["init"]).status.code(), Some(2));
    assert_eq!(
        pkgfence(tmp.path(), &["init", "--force"]).status.code(),
        Some(0)
    );
}
