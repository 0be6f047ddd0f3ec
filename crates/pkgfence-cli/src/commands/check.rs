//! Check command implementation.

use anyhow::Result;
use pkgfence_core::{check_graph, ConfigOverrides};
use std::path::Path;

use super::Status;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    overrides: ConfigOverrides,
    exclude: &[String],
    explicit: Option<&Path>,
) -> Result<Status> {
    let (config, rules) = super::load_rules(path, explicit, overrides)?;
    rules.log_summary();

    let graph = super::load_graph(path, &config, exclude)?;
    let result = check_graph(&graph, &rules);

    super::output::print(&result, format)?;

    Ok(if result.has_findings() {
        Status::Findings
    } else {
        Status::Clean
    })
}
