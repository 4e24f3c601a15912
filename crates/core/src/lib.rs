//! template-deps-core
//!
//! Dependency and change-impact analysis for Liquid business-rule templates.
//!
//! Given template text, this crate answers two questions:
//! - which variables are computed from which (`create_dependency_tree`)
//! - which variables become stale when one input changes (`get_affected_variables`)
//!
//! Templates are never rendered and filters are never executed; only the
//! structure of `assign` tags (including those nested in conditionals) is read.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod template;

pub use analysis::{
    build_graph, collect_assignments, extract_assign, get_affected_by_changes,
    get_affected_variables, AssignDependencies, DependencyGraph,
};
pub use config::AnalyzerConfig;
pub use error::{ConfigError, ParseError, ParseResult};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Parse `source` and build its dependency graph with the default configuration.
///
/// ```
/// let graph = template_deps_core::create_dependency_tree(
///     "{% assign x = y | plus: z %}{% assign a = y | times: 2 %}",
/// )
/// .unwrap();
/// let y: Vec<&str> = graph.dependents("y").unwrap().iter().map(String::as_str).collect();
/// assert_eq!(y, ["x", "a"]);
/// ```
pub fn create_dependency_tree(source: &str) -> ParseResult<DependencyGraph> {
    create_dependency_tree_with(source, &AnalyzerConfig::default())
}

/// Parse `source` under `config` and build its dependency graph.
pub fn create_dependency_tree_with(
    source: &str,
    config: &AnalyzerConfig,
) -> ParseResult<DependencyGraph> {
    let nodes = template::parse_template_with(source, config)?;
    Ok(build_graph(&nodes))
}
