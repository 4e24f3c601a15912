use template_deps_core::{create_dependency_tree, get_affected_variables, version};

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn single_alias_produces_one_edge() {
    let graph = create_dependency_tree("{% assign a = b %}").expect("parse");
    assert_eq!(graph.len(), 1);
    let dependents: Vec<&str> = graph.dependents("b").unwrap().iter().map(String::as_str).collect();
    assert_eq!(dependents, ["a"]);
}

#[test]
fn text_without_assignments_yields_empty_graph() {
    for source in [
        "",
        "Plain text only",
        "{{ total | money }}",
        "{% if a %}{{ a }}{% else %}none{% endif %}",
        "{% for row in rows %}{{ row }}{% endfor %}",
    ] {
        let graph = create_dependency_tree(source).expect("parse");
        assert!(graph.is_empty(), "expected empty graph for {source:?}");
    }
}

#[test]
fn end_to_end_query() {
    let graph = create_dependency_tree(
        "{% assign x = a | plus: z %}\n{% assign y = a | times: 2 %}\n{% assign t = x | times: 3 %}",
    )
    .expect("parse");
    assert_eq!(get_affected_variables(&graph, "a"), vec!["x", "t", "y"]);
}

#[test]
fn bare_assign_text_is_plain_text() {
    let graph = create_dependency_tree("assign a = b").expect("parse");
    assert!(graph.is_empty());
}
