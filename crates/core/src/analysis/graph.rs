use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::analysis::assign::{extract_assign, AssignDependencies};
use crate::model::{Assign, TagNode};

/// Maps each depended-upon variable to the variables computed from it.
///
/// Keys exist only for variables used at least once on a right-hand side.
/// Dependents are unique and kept in first-insertion order. Serializes as a
/// plain mapping of name to array of names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `dependency -> dependent`. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, dependency: &str, dependent: &str) -> bool {
        let inserted = self
            .edges
            .entry(dependency.to_string())
            .or_default()
            .insert(dependent.to_string());
        if inserted {
            trace!(dependency, dependent, "recorded dependency edge");
        }
        inserted
    }

    /// Link every dependency of one assignment to the variable it defines.
    pub fn link(&mut self, deps: &AssignDependencies) {
        for dependency in &deps.depends_on {
            self.add_edge(dependency, &deps.defined);
        }
    }

    /// Direct dependents of `variable`, in insertion order.
    pub fn dependents(&self, variable: &str) -> Option<&IndexSet<String>> {
        self.edges.get(variable)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.edges.contains_key(variable)
    }

    /// Depended-upon variables, in first-use order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }
}

/// Same key set, and the same dependents in the same order for every key.
impl PartialEq for DependencyGraph {
    fn eq(&self, other: &Self) -> bool {
        self.edges.len() == other.edges.len()
            && self.edges.iter().all(|(key, dependents)| {
                other.edges.get(key).is_some_and(|theirs| dependents.iter().eq(theirs.iter()))
            })
    }
}

impl Eq for DependencyGraph {}

/// Visit every assignment in document order, descending into conditional
/// branches and else bodies. Other nodes are not entered.
pub fn for_each_assign<'a>(nodes: &'a [TagNode], mut visit: impl FnMut(&'a Assign)) {
    let mut pending = vec![nodes.iter()];
    while let Some(siblings) = pending.last_mut() {
        let Some(node) = siblings.next() else {
            pending.pop();
            continue;
        };
        match node {
            TagNode::Assign(assign) => visit(assign),
            TagNode::Conditional(conditional) => {
                // Pushed in reverse so branches come off the stack in source order.
                if let Some(else_body) = &conditional.else_body {
                    pending.push(else_body.iter());
                }
                for branch in conditional.branches.iter().rev() {
                    pending.push(branch.body.iter());
                }
            }
            TagNode::Other(_) => {}
        }
    }
}

/// Dependency record of every assignment, in document order.
pub fn collect_assignments(nodes: &[TagNode]) -> Vec<AssignDependencies> {
    let mut assignments = Vec::new();
    for_each_assign(nodes, |assign| assignments.push(extract_assign(assign)));
    assignments
}

/// Build a fresh dependency graph from a parsed tag tree.
pub fn build_graph(nodes: &[TagNode]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    let mut assignments = 0usize;
    for_each_assign(nodes, |assign| {
        assignments += 1;
        graph.link(&extract_assign(assign));
    });
    debug!(
        assignments,
        variables = graph.len(),
        edges = graph.edge_count(),
        "built dependency graph"
    );
    graph
}
