use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use template_deps_core::analysis::{extract_assign, for_each_assign};
use template_deps_core::template::parse_template_with;

use crate::commands::graph::ensure_trailing_newline;
use crate::commands::{render, OutputFormat};
use crate::{load_config_or_default, read_template};

/// One assignment with the line it appears on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub line: usize,
    pub defined: String,
    pub depends_on: Vec<String>,
}

/// Every tracked assignment of a template source, in document order.
pub fn assignment_rows(source: &str, config: Option<&str>) -> Result<Vec<AssignmentRow>> {
    let config = load_config_or_default(config)?;
    let nodes = parse_template_with(source, &config).context("Failed to parse template")?;
    let mut rows = Vec::new();
    for_each_assign(&nodes, |assign| {
        let deps = extract_assign(assign);
        rows.push(AssignmentRow {
            line: assign.line,
            defined: deps.defined,
            depends_on: deps.depends_on,
        });
    });
    Ok(rows)
}

pub fn assignments_text(rows: &[AssignmentRow]) -> String {
    let mut out = format!("Assignments ({}):\n", rows.len());
    if rows.is_empty() {
        out.push_str("  (none)\n");
    }
    for row in rows {
        let deps = if row.depends_on.is_empty() {
            "(literals only)".to_string()
        } else {
            row.depends_on.join(", ")
        };
        out.push_str(&format!("  line {}: {} <- {}\n", row.line, row.defined, deps));
    }
    out
}

/// List each assignment with the identifiers it reads.
pub fn assigns_command(template: &str, config: Option<&str>, format: OutputFormat) -> Result<()> {
    let source = read_template(template)?;
    let rows = assignment_rows(&source, config)
        .with_context(|| format!("Failed to analyze template {template}"))?;
    print!("{}", ensure_trailing_newline(render(&rows, format, |rows| assignments_text(rows))?));
    Ok(())
}
