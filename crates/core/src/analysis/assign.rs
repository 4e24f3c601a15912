use serde::{Deserialize, Serialize};

use crate::model::Assign;

/// Variable defined by one assignment and the identifiers it is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignDependencies {
    pub defined: String,
    /// Non-literal tokens in operand-then-filter-argument order. Repeats are kept.
    pub depends_on: Vec<String>,
}

/// Extract the dependencies of a single assignment.
///
/// The initial operand is checked even without filters, so a plain alias
/// (`assign x = y`) depends on `y`. Filter names are never dependencies.
pub fn extract_assign(assign: &Assign) -> AssignDependencies {
    let operand = std::iter::once(&assign.value.initial);
    let filter_args = assign.value.filters.iter().flat_map(|filter| filter.args.iter());

    let depends_on = operand
        .chain(filter_args)
        .filter_map(|token| token.identifier())
        .map(str::to_string)
        .collect();

    AssignDependencies { defined: assign.defined.clone(), depends_on }
}
