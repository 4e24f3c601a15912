use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::debug;

use crate::analysis::graph::DependencyGraph;

/// Variables transitively computed from `variable`, in depth-first pre-order.
///
/// Direct dependents are expanded in insertion order and each variable is
/// expanded at most once, so cycles terminate. The start variable itself is
/// reported only when a cycle leads back to it. Unknown variables yield an
/// empty list.
pub fn get_affected_variables(graph: &DependencyGraph, variable: &str) -> Vec<String> {
    let mut affected = IndexSet::new();
    collect_affected(graph, variable, &mut affected);
    debug!(variable, affected = affected.len(), "computed affected variables");
    affected.into_iter().collect()
}

/// Union of [`get_affected_variables`] over several changed variables,
/// deduplicated in first-occurrence order.
pub fn get_affected_by_changes<S: AsRef<str>>(
    graph: &DependencyGraph,
    variables: &[S],
) -> Vec<String> {
    let mut affected = IndexSet::new();
    for variable in variables {
        collect_affected(graph, variable.as_ref(), &mut affected);
    }
    debug!(changed = variables.len(), affected = affected.len(), "computed change impact");
    affected.into_iter().collect()
}

fn collect_affected(graph: &DependencyGraph, start: &str, affected: &mut IndexSet<String>) {
    let Some(direct) = graph.dependents(start) else {
        return;
    };

    let mut expanded: HashSet<&str> = HashSet::from([start]);
    let mut stack = vec![(start, direct.iter())];

    while let Some((parent, dependents)) = stack.last_mut() {
        let parent = *parent;
        let Some(dependent) = dependents.next() else {
            stack.pop();
            continue;
        };
        if dependent == parent {
            continue;
        }
        affected.insert(dependent.clone());
        if expanded.insert(dependent.as_str()) {
            if let Some(next) = graph.dependents(dependent) {
                stack.push((dependent.as_str(), next.iter()));
            }
        }
    }
}
