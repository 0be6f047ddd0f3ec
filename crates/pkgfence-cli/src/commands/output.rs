//! Shared output formatting for check results.

use anyhow::Result;
use pkgfence_core::{CheckResult, Finding};
use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Print check results in the specified format.
pub fn print(result: &CheckResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result, std::io::stdout().is_terminal())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
    }
    Ok(())
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

fn kind(finding: &Finding) -> &'static str {
    match finding {
        Finding::Dependency(_) => "dependency",
        Finding::Size(_) => "size",
    }
}

/// Findings grouped under their package, then a summary line.
fn render_text(result: &CheckResult, color: bool) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for finding in &result.findings {
        if current != Some(finding.package()) {
            if current.is_some() {
                out.push('\n');
            }
            current = Some(finding.package());
            let _ = writeln!(out, "{}", paint(finding.package(), BOLD, color));
        }
        let message = match finding {
            Finding::Dependency(v) => v.to_string(),
            Finding::Size(s) => s.to_string(),
        };
        let _ = writeln!(
            out,
            "  {} {}: {message}",
            finding.code(),
            paint(kind(finding), RED, color)
        );
    }

    if !result.findings.is_empty() {
        out.push('\n');
    }

    let (deps, sizes) = result.count_by_kind();
    let summary = format!(
        "Found {deps} dependency violation(s) and {sizes} size error(s) in {} package(s), {} import(s) checked",
        result.packages_checked, result.edges_checked
    );
    let summary_color = if result.has_findings() { RED } else { GREEN };
    let _ = writeln!(out, "{}", paint(&summary, summary_color, color));
    out
}

fn render_compact(result: &CheckResult) -> String {
    result
        .findings
        .iter()
        .map(|finding| format!("{}: {finding}\n", finding.package()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgfence_core::{DenyReason, DependencyViolation, SizeExceeded};

    fn sample() -> CheckResult {
        CheckResult {
            findings: vec![
                DependencyViolation {
                    importer: "pkg/api".into(),
                    imported: "pkg/orders/db".into(),
                    reason: DenyReason::NoMatchingRule,
                }
                .into(),
                SizeExceeded {
                    package: "pkg/api".into(),
                    ceiling: 100,
                    actual: 120,
                }
                .into(),
                DependencyViolation {
                    importer: "pkg/orders/db".into(),
                    imported: "pkg/users/db".into(),
                    reason: DenyReason::DbRestricted,
                }
                .into(),
            ],
            packages_checked: 4,
            edges_checked: 7,
        }
    }

    #[test]
    fn text_groups_by_package() {
        insta::assert_snapshot!(render_text(&sample(), false), @r"
        pkg/api
          PF001 dependency: package `pkg/api` isn't allowed to import package `pkg/orders/db` (no rule allows this dependency)
          PF002 size: the maximum size for package `pkg/api` is 100 but its real size is 120

        pkg/orders/db
          PF001 dependency: package `pkg/orders/db` isn't allowed to import package `pkg/users/db` (db packages may only depend on tool packages)

        Found 2 dependency violation(s) and 1 size error(s) in 4 package(s), 7 import(s) checked
        ");
    }

    #[test]
    fn text_clean_run_is_only_summary() {
        let result = CheckResult {
            packages_checked: 3,
            ..CheckResult::default()
        };
        insta::assert_snapshot!(
            render_text(&result, false),
            @"Found 0 dependency violation(s) and 0 size error(s) in 3 package(s), 0 import(s) checked"
        );
    }

    #[test]
    fn compact_is_one_line_per_finding() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        pkg/api: [PF001] package `pkg/api` isn't allowed to import package `pkg/orders/db` (no rule allows this dependency)
        pkg/api: [PF002] the maximum size for package `pkg/api` is 100 but its real size is 120
        pkg/orders/db: [PF001] package `pkg/orders/db` isn't allowed to import package `pkg/users/db` (db packages may only depend on tool packages)
        ");
    }

    #[test]
    fn colors_only_when_enabled() {
        assert!(render_text(&sample(), true).contains(RED));
        assert!(!render_text(&sample(), false).contains('\x1b'));
    }
}
