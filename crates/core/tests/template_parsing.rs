use template_deps_core::model::{TagNode, Token};
use template_deps_core::template::{is_literal, parse_template, parse_template_with};
use template_deps_core::{create_dependency_tree, AnalyzerConfig, DependencyGraph, ParseError};

#[test]
fn conditional_keeps_branches_and_else() {
    let nodes = parse_template(
        "{% if a > 1 %}{% assign x = a %}{% elsif b %}{% assign y = b %}{% else %}{% assign z = c %}{% endif %}",
    )
    .unwrap();
    assert_eq!(nodes.len(), 1);
    let TagNode::Conditional(conditional) = &nodes[0] else {
        panic!("expected a conditional, got {:?}", nodes[0]);
    };
    assert_eq!(conditional.tag, "if");
    assert_eq!(conditional.branches.len(), 2);
    assert_eq!(conditional.branches[0].condition, "a > 1");
    assert_eq!(conditional.branches[1].condition, "b");
    assert_eq!(conditional.else_body.as_ref().map(Vec::len), Some(1));
}

#[test]
fn loops_and_captures_are_opaque() {
    let nodes = parse_template(
        "{% for i in (1..3) %}{% assign a = b %}{% else %}none{% endfor %}{% capture c %}{{ d }}{% endcapture %}",
    )
    .unwrap();
    let names: Vec<&str> = nodes.iter().map(TagNode::kind_name).collect();
    assert_eq!(names, ["for", "capture"]);
}

#[test]
fn raw_and_comment_bodies_are_ignored() {
    let graph = create_dependency_tree(
        "{% raw %}{% assign a = b %}{% endraw %}{% comment %}{% assign c = d %}{% endcomment %}",
    )
    .unwrap();
    assert!(graph.is_empty());
}

#[test]
fn liquid_tag_lines_are_statements() {
    let graph = create_dependency_tree(
        "{% liquid\n  assign a = b\n  if a\n    assign c = a | plus: d\n  endif\n%}",
    )
    .unwrap();
    assert_eq!(graph.variables().collect::<Vec<_>>(), ["b", "a", "d"]);
}

#[test]
fn whitespace_control_is_accepted() {
    let graph = create_dependency_tree("{%- assign a = b -%}\n{%- if a -%}{%- assign c = a -%}{%- endif -%}")
        .unwrap();
    assert_eq!(graph.len(), 2);
}

#[test]
fn unknown_tags_are_skipped_by_default_and_rejected_in_strict_mode() {
    let source = "{% include 'header' %}{% pricing_widget seats %}{% assign a = b %}";
    let nodes = parse_template(source).unwrap();
    assert_eq!(nodes.len(), 3);

    let strict = AnalyzerConfig { strict_tags: true, ..AnalyzerConfig::default() };
    let err = parse_template_with(source, &strict).unwrap_err();
    assert_eq!(err, ParseError::UnknownTag { name: "pricing_widget".into(), line: 1 });
}

#[test]
fn literal_classifier_matches_token_classification() {
    assert!(is_literal("100.00"));
    assert!(is_literal("'INR'"));
    assert!(!is_literal("membership_fee_private_seats"));
    assert_eq!(Token::classify("nil"), Token::Literal("nil".into()));
    assert_eq!(Token::classify("rate"), Token::Identifier("rate".into()));
}

#[test]
fn malformed_templates_report_line_numbers() {
    let cases = [
        ("{% if a %}\n{% assign x = a %}", ParseError::UnclosedBlock { name: "if".into(), line: 1 }),
        ("\n\n{% endif %}", ParseError::UnexpectedTag { name: "endif".into(), line: 3 }),
        ("{% else %}", ParseError::UnexpectedTag { name: "else".into(), line: 1 }),
        (
            "{% if a %}{% else %}{% else %}{% endif %}",
            ParseError::UnexpectedTag { name: "else".into(), line: 1 },
        ),
        ("line one\n{% assign x = %}", ParseError::InvalidAssign {
            line: 2,
            reason: "missing value for `x`".into(),
        }),
        ("{% assign x = y", ParseError::UnclosedTag { line: 1 }),
    ];
    for (source, expected) in cases {
        let err = create_dependency_tree(source).unwrap_err();
        assert_eq!(err, expected, "for {source:?}");
        assert_eq!(err.line(), expected.line());
    }
}

#[test]
fn invalid_expression_names_the_expression() {
    let err = create_dependency_tree("{% assign x = a | times: 'b %}").unwrap_err();
    match err {
        ParseError::InvalidExpression { line, expression, .. } => {
            assert_eq!(line, 1);
            assert_eq!(expression, "a | times: 'b");
        }
        other => panic!("expected InvalidExpression, got {other:?}"),
    }
}

fn dependents<'g>(graph: &'g DependencyGraph, variable: &str) -> Vec<&'g str> {
    graph.dependents(variable).unwrap().iter().map(String::as_str).collect()
}

#[test]
fn operand_expressions_keep_their_leading_token() {
    let graph =
        create_dependency_tree("{% assign x = y + z %}{% assign a = y | times: 2 %}").unwrap();
    assert_eq!(graph.variables().collect::<Vec<_>>(), ["y"]);
    assert_eq!(dependents(&graph, "y"), ["x", "a"]);
}

#[test]
fn keyword_literals_match_in_any_case() {
    let graph = create_dependency_tree(
        "{% assign x = TRUE %}{% assign y = False | default: NIL %}{% assign z = w | default: Blank %}",
    )
    .unwrap();
    assert_eq!(graph.variables().collect::<Vec<_>>(), ["w"]);
    assert_eq!(dependents(&graph, "w"), ["z"]);
}

#[test]
fn short_decimal_forms_are_literals() {
    let graph =
        create_dependency_tree("{% assign x = y | times: .5 %}{% assign t = 1. | plus: y %}").unwrap();
    assert_eq!(graph.variables().collect::<Vec<_>>(), ["y"]);
    assert_eq!(dependents(&graph, "y"), ["x", "t"]);
}

#[test]
fn identifiers_may_start_with_a_digit() {
    let graph = create_dependency_tree("{% assign total = 2nd_fee | plus: base %}").unwrap();
    assert_eq!(graph.variables().collect::<Vec<_>>(), ["2nd_fee", "base"]);
    assert_eq!(dependents(&graph, "2nd_fee"), ["total"]);
}
