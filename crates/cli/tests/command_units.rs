use template_deps::commands::{
    assignment_rows, assignments_text, graph_text, impact_text, render, ImpactReport,
    OutputFormat,
};
use template_deps_core::create_dependency_tree;

const PRICING: &str = "{% assign subtotal = fee | times: seats %}\n\
{% if seats > 10 %}\n\
{% assign discount = subtotal | times: 0.1 %}\n\
{% else %}\n\
{% assign discount = 0 %}\n\
{% endif %}\n\
{% assign total = subtotal | minus: discount %}\n";

#[test]
fn graph_text_lists_each_variable() {
    let graph = create_dependency_tree(PRICING).unwrap();
    let text = graph_text(&graph);
    assert!(text.starts_with("Dependency graph (4 variables):"));
    assert!(text.contains("  subtotal -> discount, total\n"));
    assert!(text.contains("  fee -> subtotal\n"));
}

#[test]
fn graph_text_handles_empty_graph() {
    let graph = create_dependency_tree("no tags here").unwrap();
    assert_eq!(graph_text(&graph), "Dependency graph (0 variables):\n  (none)\n");
}

#[test]
fn impact_report_unions_changes() {
    let graph = create_dependency_tree(PRICING).unwrap();
    let report = ImpactReport::compute(&graph, &["seats".to_string(), "discount".to_string()]);
    assert_eq!(report.affected, vec!["subtotal", "discount", "total"]);

    let text = impact_text(&report);
    assert!(text.starts_with("Affected by seats, discount (3):"));
    assert!(text.contains("  - total\n"));
}

#[test]
fn impact_report_serializes_to_json() {
    let graph = create_dependency_tree(PRICING).unwrap();
    let report = ImpactReport::compute(&graph, &["fee".to_string()]);
    let json = render(&report, OutputFormat::Json, impact_text).unwrap();
    let parsed: ImpactReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn assignment_rows_carry_line_numbers() {
    let rows = assignment_rows(PRICING, None).unwrap();
    let summary: Vec<(usize, &str)> = rows.iter().map(|r| (r.line, r.defined.as_str())).collect();
    assert_eq!(summary, [(1, "subtotal"), (3, "discount"), (5, "discount"), (7, "total")]);
    assert!(rows[2].depends_on.is_empty());

    let text = assignments_text(&rows);
    assert!(text.contains("  line 5: discount <- (literals only)\n"));
    assert!(text.contains("  line 7: total <- subtotal, discount\n"));
}

#[test]
fn yaml_output_is_a_plain_mapping() {
    let graph = create_dependency_tree("{% assign a = b %}").unwrap();
    let yaml = render(&graph, OutputFormat::Yaml, graph_text).unwrap();
    assert_eq!(yaml, "b:\n- a\n");
}
