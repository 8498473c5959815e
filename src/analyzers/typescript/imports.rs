//! Import extraction for TypeScript/JavaScript
//!
//! Covers ES imports, `export ... from` re-exports, `require()` and dynamic
//! `import()`. Sources are recorded as written.

use super::parser::{node_text, string_value};
use crate::core::{ImportInfo, ImportKind};
use tree_sitter::Node;

/// `import x from 'a'`, `import { y } from 'a'`, `import * as z from 'a'`, `import 'a'`
pub fn from_import_statement(node: &Node, source: &str) -> Option<ImportInfo> {
    let raw_source = string_value(&node.child_by_field_name("source")?, source)?;

    let mut default_name = None;
    let mut namespace = None;
    let mut named = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for part in child.named_children(&mut clause_cursor) {
            match part.kind() {
                "identifier" => default_name = Some(node_text(&part, source).to_string()),
                "namespace_import" => {
                    namespace = first_identifier(&part).map(|id| node_text(&id, source).to_string())
                }
                "named_imports" => named.extend(specifier_names(&part, source, "import_specifier")),
                _ => {}
            }
        }
    }

    let (kind, names) = match (default_name, namespace) {
        (_, Some(ns)) => (ImportKind::Namespace, vec![ns]),
        (Some(default), None) => {
            let mut names = vec![default];
            names.extend(named);
            (ImportKind::Default, names)
        }
        (None, None) => (ImportKind::Named, named),
    };

    Some(ImportInfo::new(raw_source, kind).with_names(names))
}

/// `export { a } from 'x'` and `export * from 'x'`
pub fn from_reexport(node: &Node, source: &str) -> Option<ImportInfo> {
    let raw_source = string_value(&node.child_by_field_name("source")?, source)?;

    let mut names = Vec::new();
    let mut star = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "export_clause" => names.extend(specifier_names(&child, source, "export_specifier")),
            "*" => star = true,
            "namespace_export" => star = true,
            _ => {}
        }
    }

    let kind = if star && names.is_empty() {
        ImportKind::Namespace
    } else {
        ImportKind::Named
    };

    let mut info = ImportInfo::new(raw_source, kind).with_names(names);
    info.reexport = true;
    Some(info)
}

/// `require('x')` or `import('x')`
pub fn from_call_expression(node: &Node, source: &str) -> Option<ImportInfo> {
    let function = node.child_by_field_name("function")?;
    let kind = match function.kind() {
        "import" => ImportKind::Dynamic,
        "identifier" if node_text(&function, source) == "require" => ImportKind::Default,
        _ => return None,
    };

    let arguments = node.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first = arguments.named_children(&mut cursor).next()?;
    let raw_source = string_value(&first, source)?;

    let names = match kind {
        ImportKind::Default => bound_name(node, source).into_iter().collect(),
        _ => Vec::new(),
    };

    Some(ImportInfo::new(raw_source, kind).with_names(names))
}

/// Local name bound by `const x = require(...)`
fn bound_name(call: &Node, source: &str) -> Option<String> {
    let declarator = call.parent().filter(|p| p.kind() == "variable_declarator")?;
    let name = declarator.child_by_field_name("name")?;
    (name.kind() == "identifier").then(|| node_text(&name, source).to_string())
}

fn first_identifier<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "identifier");
    found
}

/// Local names of `import_specifier`/`export_specifier` children
fn specifier_names(node: &Node, source: &str, specifier_kind: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == specifier_kind)
        .filter_map(|spec| {
            let name = spec
                .child_by_field_name("alias")
                .or_else(|| spec.child_by_field_name("name"))?;
            Some(node_text(&name, source).trim_matches(|c| c == '"' || c == '\'').to_string())
        })
        .collect()
}
