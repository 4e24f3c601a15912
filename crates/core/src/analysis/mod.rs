//! Dependency extraction and change-impact analysis.
//!
//! - [`extract_assign`]: dependencies of a single assignment.
//! - [`build_graph`]: walks the tag tree and accumulates a [`DependencyGraph`].
//! - [`get_affected_variables`]: transitive closure from one changed variable.
//!
//! All three are pure functions of their inputs. Traversals use explicit
//! stacks, so deep nesting or long chains cannot exhaust the call stack.

mod assign;
mod graph;
mod impact;

pub use assign::{extract_assign, AssignDependencies};
pub use graph::{build_graph, collect_assignments, for_each_assign, DependencyGraph};
pub use impact::{get_affected_by_changes, get_affected_variables};
