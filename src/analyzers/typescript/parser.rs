//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! Provides parsing using tree-sitter grammars for JS/JSX/TS/TSX.

use anyhow::{Context, Result};
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree, TreeCursor};

/// Tree-sitter grammar used for one parse attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsGrammar {
    /// Also covers JSX
    JavaScript,
    TypeScript,
    Tsx,
}

impl JsGrammar {
    fn language(self) -> TsLanguage {
        match self {
            JsGrammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            JsGrammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            JsGrammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Grammars to try for a TypeScript file, by extension
    pub fn typescript_candidates(extension: Option<&str>) -> &'static [JsGrammar] {
        match extension {
            Some("tsx") => &[JsGrammar::Tsx],
            Some("ts") | Some("mts") | Some("cts") => &[JsGrammar::TypeScript],
            _ => &[JsGrammar::Tsx, JsGrammar::TypeScript],
        }
    }
}

/// Parse JavaScript/TypeScript source code into a tree-sitter tree
pub fn parse_source(content: &str, grammar: JsGrammar) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.language())
        .context("Failed to set tree-sitter language")?;

    parser
        .parse(content, None)
        .context("Failed to parse source code")
}

/// First candidate grammar producing a tree without error nodes
pub fn parse_clean(content: &str, candidates: &[JsGrammar]) -> Option<(Tree, JsGrammar)> {
    candidates
        .iter()
        .find_map(|grammar| match parse_source(content, *grammar) {
            Ok(tree) if !has_parse_errors(&tree) => Some((tree, *grammar)),
            Ok(_) => None,
            Err(e) => {
                log::debug!("{:?} parser unavailable: {}", grammar, e);
                None
            }
        })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    &source[start..end]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the last line of a tree-sitter node (1-indexed, inclusive)
pub fn node_end_line(node: &Node) -> usize {
    node.end_position().row + 1
}

/// Value of a string literal without quotes; template strings with
/// substitutions have no static value
pub fn string_value(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => Some(
            node_text(node, source)
                .trim_matches(|c| c == '"' || c == '\'')
                .to_string(),
        ),
        "template_string" => {
            let mut cursor = node.walk();
            let has_substitution = node
                .named_children(&mut cursor)
                .any(|c| c.kind() == "template_substitution");
            (!has_substitution).then(|| node_text(node, source).trim_matches('`').to_string())
        }
        _ => None,
    }
}

/// First named child that is not a comment
pub fn first_named_child<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

/// Pre-order walk over `root` and everything below it.
///
/// Driven by a tree cursor, so nesting depth never grows the call stack.
pub fn descendants<'t>(root: &Node<'t>) -> Descendants<'t> {
    Descendants {
        cursor: root.walk(),
        done: false,
    }
}

pub struct Descendants<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        // The cursor cannot leave the node it was created on
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_javascript_with_jsx() {
        let tree = parse_source("const a = <div>hi</div>;", JsGrammar::JavaScript).unwrap();
        assert!(!has_parse_errors(&tree));
    }

    #[test]
    fn test_typescript_grammar_rejects_jsx() {
        let source = "const a = <div>hi</div>;";
        let tree = parse_source(source, JsGrammar::TypeScript).unwrap();
        assert!(has_parse_errors(&tree));
        let (_, grammar) = parse_clean(source, &[JsGrammar::TypeScript, JsGrammar::Tsx]).unwrap();
        assert_eq!(grammar, JsGrammar::Tsx);
    }

    #[test]
    fn test_parse_clean_fails_for_garbage() {
        assert!(parse_clean("function ((( {", &[JsGrammar::Tsx, JsGrammar::TypeScript]).is_none());
    }

    #[test]
    fn test_typescript_candidates_by_extension() {
        assert_eq!(JsGrammar::typescript_candidates(Some("tsx")), &[JsGrammar::Tsx]);
        assert_eq!(
            JsGrammar::typescript_candidates(Some("ts")),
            &[JsGrammar::TypeScript]
        );
        assert_eq!(JsGrammar::typescript_candidates(None).len(), 2);
    }

    #[test]
    fn test_string_value() {
        let source = "import a from 'react';";
        let tree = parse_source(source, JsGrammar::JavaScript).unwrap();
        let import = tree.root_node().child(0).unwrap();
        let literal = import.child_by_field_name("source").unwrap();
        assert_eq!(string_value(&literal, source).as_deref(), Some("react"));
    }

    #[test]
    fn test_descendants_visits_in_source_order() {
        let source = "f(a, [b]);";
        let tree = parse_source(source, JsGrammar::JavaScript).unwrap();
        let identifiers: Vec<&str> = descendants(&tree.root_node())
            .filter(|n| n.kind() == "identifier")
            .map(|n| node_text(&n, source))
            .collect();
        assert_eq!(identifiers, vec!["f", "a", "b"]);
    }

    #[test]
    fn test_descendants_stays_inside_subtree() {
        let source = "const x = [a];\nconst y = b;";
        let tree = parse_source(source, JsGrammar::JavaScript).unwrap();
        let first = tree.root_node().child(0).unwrap();
        let identifiers: Vec<&str> = descendants(&first)
            .filter(|n| n.kind() == "identifier")
            .map(|n| node_text(&n, source))
            .collect();
        assert_eq!(identifiers, vec!["x", "a"]);
    }

    #[test]
    fn test_descendants_handles_deep_nesting() {
        let depth = 20_000;
        let source = format!("x = {}1{};", "[".repeat(depth), "]".repeat(depth));
        let tree = parse_source(&source, JsGrammar::JavaScript).unwrap();
        let arrays = descendants(&tree.root_node())
            .filter(|n| n.kind() == "array")
            .count();
        assert_eq!(arrays, depth);
    }
}
