//! Explain command: shows how a single import edge is decided.

use anyhow::Result;
use pkgfence_core::{ConfigOverrides, Role, RuleSet, Verdict};
use pkgfence_go::GraphError;
use std::fmt::Write as _;
use std::path::Path;

use super::Status;

/// Runs the explain command.
pub fn run(
    importer: &str,
    imported: &str,
    path: &Path,
    overrides: ConfigOverrides,
    explicit: Option<&Path>,
) -> Result<Status> {
    let (config, rules) = super::load_rules(path, explicit, overrides)?;
    let graph = match super::load_graph(path, &config, &[]) {
        Ok(graph) => Some(graph),
        Err(err)
            if matches!(
                err.downcast_ref::<GraphError>(),
                Some(GraphError::RootNotFound { .. })
            ) =>
        {
            tracing::debug!("{err:#}, explaining without an entry point");
            None
        }
        Err(err) => return Err(err),
    };
    let entry_point = graph.as_ref().and_then(|g| g.entry_point.as_deref());
    let (text, verdict) = explain(&rules, entry_point, importer, imported);
    print!("{text}");

    Ok(if verdict.is_allowed() {
        Status::Clean
    } else {
        Status::Findings
    })
}

fn roles(rules: &RuleSet, entry_point: Option<&str>, pkg: &str) -> String {
    let mut names = Vec::new();
    if entry_point == Some(pkg) {
        names.push("entry point".to_string());
    }
    names.extend(rules.roles().roles_of(pkg).iter().map(Role::to_string));
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn explain(
    rules: &RuleSet,
    entry_point: Option<&str>,
    importer: &str,
    imported: &str,
) -> (String, Verdict) {
    let verdict = rules
        .engine()
        .with_entry_point(entry_point)
        .decide(importer, imported);
    let allowed = rules
        .allow()
        .matching_set(importer)
        .map_or_else(|| "none".to_string(), |set| set.render());

    let mut out = String::new();
    let _ = writeln!(out, "importer `{importer}`: {}", roles(rules, entry_point, importer));
    let _ = writeln!(out, "imported `{imported}`: {}", roles(rules, entry_point, imported));
    let _ = writeln!(out, "allow rules for importer: {allowed}");
    let _ = writeln!(out, "{verdict}");
    (out, verdict)
}
