use anyhow::{Context, Result};
use template_deps_core::{create_dependency_tree_with, DependencyGraph};
use tracing::debug;

use crate::commands::{render, OutputFormat};
use crate::{load_config_or_default, read_template};

/// Parse a template file and build its dependency graph.
pub fn load_graph_from_template(template: &str, config: Option<&str>) -> Result<DependencyGraph> {
    let config = load_config_or_default(config)?;
    let source = read_template(template)?;
    debug!(template, bytes = source.len(), "read template");
    create_dependency_tree_with(&source, &config)
        .with_context(|| format!("Failed to parse template {template}"))
}

/// Human-readable listing: one line per depended-upon variable.
pub fn graph_text(graph: &DependencyGraph) -> String {
    let mut out = format!("Dependency graph ({} variables):\n", graph.len());
    if graph.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for (variable, dependents) in graph.iter() {
        let joined: Vec<&str> = dependents.iter().map(String::as_str).collect();
        out.push_str(&format!("  {} -> {}\n", variable, joined.join(", ")));
    }
    out
}

/// Print the dependency graph of a template.
pub fn graph_command(template: &str, config: Option<&str>, format: OutputFormat) -> Result<()> {
    let graph = load_graph_from_template(template, config)?;
    print!("{}", ensure_trailing_newline(render(&graph, format, graph_text)?));
    Ok(())
}

pub(crate) fn ensure_trailing_newline(mut out: String) -> String {
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
