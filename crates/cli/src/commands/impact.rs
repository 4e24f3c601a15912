use std::fs;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use template_deps_core::{get_affected_by_changes, DependencyGraph};
use tracing::debug;

use crate::commands::graph::ensure_trailing_newline;
use crate::commands::{load_graph_from_template, render, OutputFormat};

/// Result of an impact query, as emitted in JSON/YAML mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub changed: Vec<String>,
    pub affected: Vec<String>,
}

impl ImpactReport {
    pub fn compute(graph: &DependencyGraph, changed: &[String]) -> Self {
        Self { changed: changed.to_vec(), affected: get_affected_by_changes(graph, changed) }
    }
}

/// Load a graph previously written with `graph --format json`.
pub fn load_graph_json(path: &str) -> Result<DependencyGraph> {
    let body =
        fs::read_to_string(path).with_context(|| format!("Failed to read graph JSON at {path}"))?;
    let graph: DependencyGraph = serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse graph JSON at {path}"))?;
    debug!(path, variables = graph.len(), "loaded saved graph");
    Ok(graph)
}

pub fn impact_text(report: &ImpactReport) -> String {
    let mut out =
        format!("Affected by {} ({}):\n", report.changed.join(", "), report.affected.len());
    if report.affected.is_empty() {
        out.push_str("  (none)\n");
    }
    for variable in &report.affected {
        out.push_str(&format!("  - {variable}\n"));
    }
    out
}

/// Print the variables that must be recomputed when `variables` change.
///
/// The graph comes from either a template (`template`) or a saved graph JSON
/// file (`graph_path`); exactly one must be given.
pub fn impact_command(
    template: Option<&str>,
    graph_path: Option<&str>,
    variables: &[String],
    config: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if variables.is_empty() {
        return Err(anyhow!("At least one --variable is required"));
    }
    let graph = match (template, graph_path) {
        (Some(template), None) => load_graph_from_template(template, config)?,
        (None, Some(path)) => load_graph_json(path)?,
        _ => return Err(anyhow!("Provide exactly one of --template or --graph")),
    };

    let report = ImpactReport::compute(&graph, variables);
    print!("{}", ensure_trailing_newline(render(&report, format, impact_text)?));
    Ok(())
}
