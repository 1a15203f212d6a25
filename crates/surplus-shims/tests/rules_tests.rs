//! Built-in rule scenarios, alone and combined.

use pretty_assertions::assert_eq;
use surplus_shims::{RuleId, ShimRegistry, ZERO_WIDTH_MARKER};
use surplus_types::ast::*;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn li() -> Node {
    Node::element("li", vec![])
}

fn marked(text: &str) -> Node {
    Node::html_text(format!("{ZERO_WIDTH_MARKER}{text}"))
}

/// Run `rules` over a `<ul>` holding `children` and return its new children.
fn shim_ul(rules: &[RuleId], children: Vec<Node>) -> Vec<Node> {
    let registry = ShimRegistry::with_rules(rules);
    let mut tree = CodeTopLevel::new(vec![Node::element("ul", children)]);
    registry.run(&mut tree);
    tree.segments[0].children().to_vec()
}

fn spaced_list() -> Vec<Node> {
    vec![
        Node::html_text("   "),
        li(),
        Node::html_text("   "),
        li(),
    ]
}

// ─────────────────────────────────────────────────────────────────────
// Whitespace
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_strip_whitespace_text() {
    let out = shim_ul(&[RuleId::StripWhitespaceText], spaced_list());
    assert_eq!(out, vec![li(), li()]);
}

#[test]
fn test_preserve_whitespace_text() {
    let out = shim_ul(&[RuleId::PreserveWhitespaceText], spaced_list());
    assert_eq!(out, vec![marked("   "), li(), marked("   "), li()]);
}

#[test]
fn test_preserve_overrides_strip_when_attached_later() {
    let out = shim_ul(
        &[RuleId::StripWhitespaceText, RuleId::PreserveWhitespaceText],
        spaced_list(),
    );
    assert_eq!(out, vec![marked("   "), li(), marked("   "), li()]);
}

#[test]
fn test_strip_wins_when_attached_later() {
    let out = shim_ul(
        &[RuleId::PreserveWhitespaceText, RuleId::StripWhitespaceText],
        spaced_list(),
    );
    assert_eq!(out, vec![li(), li()]);
}

#[test]
fn test_text_with_content_is_untouched() {
    let children = vec![Node::html_text(" hi "), li()];
    for rules in [
        &[RuleId::StripWhitespaceText][..],
        &[RuleId::PreserveWhitespaceText][..],
        &RuleId::ALL[..],
    ] {
        assert_eq!(shim_ul(rules, children.clone()), children);
    }
}

#[test]
fn test_empty_text_counts_as_whitespace() {
    let out = shim_ul(&[RuleId::StripWhitespaceText], vec![Node::html_text(""), li()]);
    assert_eq!(out, vec![li()]);
}

#[test]
fn test_code_text_whitespace_is_kept() {
    let registry = ShimRegistry::with_rules(&RuleId::ALL);
    let mut tree = CodeTopLevel::new(vec![Node::code_text("  "), Node::element("p", vec![])]);
    let expected = tree.clone();
    registry.run(&mut tree);
    assert_eq!(tree, expected);
}

// ─────────────────────────────────────────────────────────────────────
// Static properties
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_static_property_whitespace_survives_every_rule_set() {
    let property = Node::static_property("textContent", vec![Node::html_text("  ")]);
    let rule_sets: [&[RuleId]; 4] = [
        &[RuleId::StripWhitespaceText],
        &[RuleId::PreserveWhitespaceText],
        &[RuleId::PreserveWhitespaceText, RuleId::StripWhitespaceText],
        &RuleId::ALL,
    ];
    for rules in rule_sets {
        let out = shim_ul(rules, vec![property.clone()]);
        assert_eq!(out, vec![property.clone()], "rules: {rules:?}");
    }
}

#[test]
fn test_exemption_is_only_for_direct_children() {
    let property = Node::static_property(
        "title",
        vec![Node::element("b", vec![Node::html_text(" ")])],
    );
    let out = shim_ul(&[RuleId::StripWhitespaceText], vec![property]);
    assert_eq!(
        out,
        vec![Node::static_property(
            "title",
            vec![Node::element("b", vec![])]
        )]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Initial comments
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_mark_initial_comment() {
    let out = shim_ul(
        &[RuleId::MarkInitialComments],
        vec![Node::comment("x"), li()],
    );
    assert_eq!(
        out,
        vec![
            Node::html_text(ZERO_WIDTH_MARKER.to_string()),
            Node::comment("x"),
            li()
        ]
    );
}

#[test]
fn test_later_comments_are_not_marked() {
    let children = vec![li(), Node::comment("x"), Node::comment("y")];
    let out = shim_ul(&[RuleId::MarkInitialComments], children.clone());
    assert_eq!(out, children);
}

#[test]
fn test_comment_becomes_initial_after_whitespace_prune() {
    let out = shim_ul(
        &RuleId::ALL,
        vec![Node::html_text(""), Node::comment("x")],
    );
    // "" is marked rather than pruned, so the comment is not first
    assert_eq!(out, vec![marked(""), Node::comment("x")]);

    let out = shim_ul(
        &[RuleId::StripWhitespaceText, RuleId::MarkInitialComments],
        vec![Node::html_text("  "), Node::comment("x")],
    );
    assert_eq!(
        out,
        vec![
            Node::html_text(ZERO_WIDTH_MARKER.to_string()),
            Node::comment("x")
        ]
    );
}

#[test]
fn test_comment_marker_survives_whitespace_rules() {
    let registry = ShimRegistry::with_rules(&RuleId::ALL);
    let mut tree = CodeTopLevel::new(vec![Node::element(
        "table",
        vec![
            Node::comment("rows"),
            Node::element("tr", vec![Node::comment("cells"), Node::html_text(" ")]),
        ],
    )]);
    let stats = registry.run(&mut tree);

    let marker = || Node::html_text(ZERO_WIDTH_MARKER.to_string());
    assert_eq!(stats.inserted, 2);
    assert_eq!(stats.pruned, 0);
    assert_eq!(
        tree,
        CodeTopLevel::new(vec![Node::element(
            "table",
            vec![
                marker(),
                Node::comment("rows"),
                Node::element("tr", vec![marker(), Node::comment("cells"), marked(" ")]),
            ],
        )])
    );
}

// ─────────────────────────────────────────────────────────────────────
// Trees loaded from JSON
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_pass_over_json_tree() {
    let json = r#"{
        "segments": [
            { "kind": "CodeText", "text": "const list = " },
            { "kind": "HtmlElement", "tag": "ul",
              "span": { "start_line": 1, "start_col": 14, "end_line": 4, "end_col": 6 },
              "content": [
                { "kind": "HtmlText", "text": "\n  " },
                { "kind": "HtmlComment", "text": " items " },
                { "kind": "HtmlText", "text": "\n  " },
                { "kind": "HtmlInsert", "code": { "segments": [
                    { "kind": "CodeText", "text": "items" }
                ] } },
                { "kind": "HtmlText", "text": "\n" }
              ] }
        ]
    }"#;
    let mut tree: CodeTopLevel = serde_json::from_str(json).unwrap();
    let registry = ShimRegistry::with_rules(&[RuleId::StripWhitespaceText]);
    let stats = registry.run(&mut tree);

    assert_eq!(stats.pruned, 3);
    let ul = &tree.segments[1];
    assert!(ul.span().is_some());
    assert_eq!(
        ul.children(),
        &[
            Node::comment(" items "),
            Node::insert(vec![Node::code_text("items")])
        ]
    );
}
