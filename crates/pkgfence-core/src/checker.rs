//! Runs the dependency engine and the size checker over a package graph.

use tracing::{debug, info};

use crate::graph::PackageGraph;
use crate::rules::RuleSet;
use crate::types::{CheckResult, Finding};

/// Checks every package of `graph` and collects all findings.
///
/// Findings never stop the run; they are grouped by package in graph order.
/// The entry point's imports are not evaluated, its size is.
#[must_use]
pub fn check_graph(graph: &PackageGraph, rules: &RuleSet) -> CheckResult {
    let engine = rules.engine_for(graph);
    let mut result = CheckResult::new();

    if let Some(entry) = &graph.entry_point {
        info!("root package: {entry}");
    }

    for pkg in &graph.packages {
        debug!("size of package {}: {}", pkg.id, pkg.size);

        if !graph.is_entry_point(&pkg.id) {
            result.edges_checked += pkg.edges().count();
            result
                .findings
                .extend(engine.check_package(pkg).into_iter().map(Finding::from));
        }
        if let Some(exceeded) = rules.size().check(&pkg.id, pkg.size) {
            result.findings.push(exceeded.into());
        }
        result.packages_checked += 1;
    }

    info!(
        "check complete: {} finding(s) in {} package(s)",
        result.findings.len(),
        result.packages_checked
    );

    result
}
