//! Helpers for turning declaration nodes into components: export names,
//! doc descriptions and props.

use super::parser::{descendants, first_named_child, node_text};
use tree_sitter::Node;

/// Node kinds whose value is a function
pub fn is_function_value(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Statement a declaration hangs from: the export statement when exported,
/// otherwise the node itself
pub fn statement_anchor<'t>(node: Node<'t>) -> Node<'t> {
    match node.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => node,
    }
}

/// Names the statement is exported under
pub fn exported_names(anchor: &Node, name: &str) -> Vec<String> {
    if anchor.kind() != "export_statement" {
        return Vec::new();
    }
    let mut cursor = anchor.walk();
    let is_default = anchor.children(&mut cursor).any(|c| c.kind() == "default");
    if is_default {
        vec!["default".to_string()]
    } else {
        vec![name.to_string()]
    }
}

/// First line of a `/** ... */` comment directly above `anchor`
pub fn doc_description(anchor: &Node, source: &str) -> Option<String> {
    let comment = anchor.prev_named_sibling()?;
    if comment.kind() != "comment" {
        return None;
    }
    if comment.end_position().row + 1 < anchor.start_position().row {
        return None;
    }
    let text = node_text(&comment, source);
    let body = text.strip_prefix("/**")?.strip_suffix("*/")?;
    first_doc_line(body)
}

/// First non-empty line of a doc comment body, without leading `*`
pub fn first_doc_line(body: &str) -> Option<String> {
    body.lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Props read by a component: destructured keys of the first parameter, or
/// `param.X` accesses when it is a plain identifier
pub fn extract_props(function: &Node, source: &str) -> Vec<String> {
    let Some(param) = first_parameter(function) else {
        return Vec::new();
    };

    match param.kind() {
        "object_pattern" => object_pattern_keys(&param, source),
        "identifier" => {
            let name = node_text(&param, source);
            let mut props = Vec::new();
            if let Some(body) = function.child_by_field_name("body") {
                collect_member_accesses(&body, name, source, &mut props);
            }
            props
        }
        _ => Vec::new(),
    }
}

fn first_parameter<'t>(function: &Node<'t>) -> Option<Node<'t>> {
    // Arrow functions with a single bare parameter
    if let Some(param) = function.child_by_field_name("parameter") {
        return Some(param);
    }
    let params = function.child_by_field_name("parameters")?;
    let first = first_named_child(&params)?;
    Some(unwrap_parameter(first))
}

/// Strip TypeScript parameter wrappers and default values
fn unwrap_parameter(node: Node) -> Node {
    match node.kind() {
        "required_parameter" | "optional_parameter" => node
            .child_by_field_name("pattern")
            .map(unwrap_parameter)
            .unwrap_or(node),
        "assignment_pattern" => node
            .child_by_field_name("left")
            .map(unwrap_parameter)
            .unwrap_or(node),
        _ => node,
    }
}

fn object_pattern_keys(pattern: &Node, source: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut cursor = pattern.walk();
    for child in pattern.named_children(&mut cursor) {
        let key = match child.kind() {
            "shorthand_property_identifier_pattern" => Some(child),
            "pair_pattern" => child.child_by_field_name("key"),
            "object_assignment_pattern" => child.child_by_field_name("left"),
            _ => None,
        };
        if let Some(key) = key {
            push_unique(&mut keys, node_text(&key, source));
        }
    }
    keys
}

fn collect_member_accesses(body: &Node, object: &str, source: &str, props: &mut Vec<String>) {
    for node in descendants(body).filter(|n| n.kind() == "member_expression") {
        let base = node.child_by_field_name("object");
        let property = node.child_by_field_name("property");
        if let (Some(base), Some(property)) = (base, property) {
            if base.kind() == "identifier" && node_text(&base, source) == object {
                push_unique(props, node_text(&property, source));
            }
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
