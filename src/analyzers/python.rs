//! Python function, class and import extraction.
//!
//! Module paths are rewritten into `/`-separated form (`app.models` becomes
//! `app/models`, `.models` becomes `./models`) so they resolve against file
//! paths the same way JS imports do.

use super::typescript::components::first_doc_line;
use super::typescript::parser::{descendants, node_end_line, node_line, node_text};
use super::{is_hook_name, LanguageExtractor};
use crate::complexity::count_branch_points;
use crate::core::{CodeComponent, ComponentKind, FileExtraction, ImportInfo, ImportKind};
use anyhow::{Context, Result};
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn parse_python(content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .context("Failed to set tree-sitter language")?;
    parser
        .parse(content, None)
        .context("Failed to parse Python source")
}

impl LanguageExtractor for PythonExtractor {
    fn extract(&self, content: &str, file_path: &str, _extension: Option<&str>) -> Option<FileExtraction> {
        let tree = match parse_python(content) {
            Ok(tree) if !tree.root_node().has_error() => tree,
            Ok(_) => return None,
            Err(e) => {
                log::debug!("Python parser unavailable for {}: {}", file_path, e);
                return None;
            }
        };

        let mut visitor = PythonVisitor {
            source: content,
            file_path,
            result: FileExtraction::default(),
        };
        visitor.visit(&tree.root_node());
        Some(visitor.result)
    }
}

struct PythonVisitor<'s> {
    source: &'s str,
    file_path: &'s str,
    result: FileExtraction,
}

impl PythonVisitor<'_> {
    fn visit(&mut self, root: &Node) {
        for node in descendants(root) {
            self.visit_node(&node);
        }
    }

    fn visit_node(&mut self, node: &Node) {
        match node.kind() {
            "function_definition" if !is_method(node) => {
                self.push_definition(node, ComponentKind::Function)
            }
            "class_definition" => self.push_definition(node, ComponentKind::Class),
            "import_statement" => self.visit_import(node),
            "import_from_statement" => self.visit_import_from(node),
            _ => {}
        }
    }

    fn push_definition(&mut self, node: &Node, shape: ComponentKind) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(&name, self.source).to_string();
        let kind = if is_hook_name(&name) {
            ComponentKind::Hook
        } else {
            shape
        };

        self.result.components.push(CodeComponent {
            kind,
            file_path: self.file_path.to_string(),
            start_line: node_line(node),
            end_line: node_end_line(node),
            complexity: count_branch_points(node_text(node, self.source)),
            props: None,
            exports: None,
            description: docstring(node, self.source),
            name,
        });
    }

    /// `import a.b, c as d`
    fn visit_import(&mut self, node: &Node) {
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            let (module, local) = match name.kind() {
                "aliased_import" => (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ),
                _ => (Some(name), None),
            };
            let Some(module) = module else { continue };
            let module_text = node_text(&module, self.source);
            let local = local
                .map(|l| node_text(&l, self.source))
                .unwrap_or(module_text);

            self.result.imports.push(
                ImportInfo::new(module_path(module_text), ImportKind::Namespace)
                    .with_names(vec![local.to_string()]),
            );
        }
    }

    /// `from x import a, b` / `from . import y` / `from x import *`
    fn visit_import_from(&mut self, node: &Node) {
        let Some(module) = node.child_by_field_name("module_name") else {
            return;
        };
        let raw_source = module_path(node_text(&module, self.source));

        let mut cursor = node.walk();
        let names: Vec<String> = node
            .children_by_field_name("name", &mut cursor)
            .filter_map(|name| match name.kind() {
                "aliased_import" => name.child_by_field_name("alias"),
                _ => Some(name),
            })
            .map(|name| node_text(&name, self.source).to_string())
            .collect();

        let mut wildcard_cursor = node.walk();
        let wildcard = node
            .children(&mut wildcard_cursor)
            .any(|c| c.kind() == "wildcard_import");

        let kind = if wildcard {
            ImportKind::Namespace
        } else {
            ImportKind::Named
        };
        self.result
            .imports
            .push(ImportInfo::new(raw_source, kind).with_names(names));
    }
}

/// Function defined directly in a class body
fn is_method(node: &Node) -> bool {
    let mut current = node.parent();
    if current.is_some_and(|p| p.kind() == "decorated_definition") {
        current = current.and_then(|p| p.parent());
    }
    current
        .filter(|p| p.kind() == "block")
        .and_then(|block| block.parent())
        .is_some_and(|p| p.kind() == "class_definition")
}

/// First line of the docstring opening a function or class body
fn docstring(definition: &Node, source: &str) -> Option<String> {
    let body = definition.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body.named_children(&mut cursor).next()?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let literal = first.named_child(0).filter(|n| n.kind() == "string")?;
    let text = node_text(&literal, source)
        .trim_start_matches(['r', 'R', 'u', 'U', 'b', 'B', 'f', 'F'])
        .trim_matches(|c| c == '"' || c == '\'');
    first_doc_line(text)
}

/// Python module path in `/`-separated form
pub fn module_path(module: &str) -> String {
    let dots = module.chars().take_while(|c| *c == '.').count();
    let rest = module[dots..].replace('.', "/");
    match dots {
        0 => rest,
        1 if rest.is_empty() => ".".to_string(),
        1 => format!("./{}", rest),
        n => {
            let mut prefix = "../".repeat(n - 1);
            if rest.is_empty() {
                prefix.pop();
            }
            prefix + &rest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn extract(source: &str) -> FileExtraction {
        PythonExtractor::new()
            .extract(source, "app/main.py", Some("py"))
            .unwrap_or_default()
    }

    #[test]
    fn test_module_path() {
        assert_eq!(module_path("app.models"), "app/models");
        assert_eq!(module_path(".models"), "./models");
        assert_eq!(module_path("."), ".");
        assert_eq!(module_path("..pkg.mod"), "../pkg/mod");
        assert_eq!(module_path(".."), "..");
    }

    #[test]
    fn test_functions_classes_and_docstrings() {
        let source = indoc! {r#"
            def load(path):
                """Load a file.

                Longer text.
                """
                if path:
                    return open(path)
                return None

            class Repo:
                def save(self):
                    pass
        "#};
        let result = extract(source);
        let names: Vec<_> = result
            .components
            .iter()
            .map(|c| (c.name.as_str(), c.kind))
            .collect();
        assert_eq!(
            names,
            vec![("load", ComponentKind::Function), ("Repo", ComponentKind::Class)]
        );
        let load = &result.components[0];
        assert_eq!(load.description.as_deref(), Some("Load a file."));
        assert_eq!(load.start_line, 1);
        assert_eq!(load.end_line, 8);
        assert_eq!(load.complexity, 2);
    }

    #[test]
    fn test_imports() {
        let source = indoc! {r#"
            import os
            import numpy as np
            from fastapi import FastAPI, Depends
            from .models import User as U
        "#};
        let result = extract(source);
        assert_eq!(result.imports.len(), 4);
        assert_eq!(result.imports[0].raw_source, "os");
        assert_eq!(result.imports[0].kind, ImportKind::Namespace);
        assert_eq!(result.imports[1].imported_names, vec!["np"]);
        assert_eq!(result.imports[2].raw_source, "fastapi");
        assert_eq!(result.imports[2].imported_names, vec!["FastAPI", "Depends"]);
        assert_eq!(result.imports[3].raw_source, "./models");
        assert!(result.imports[3].is_relative());
        assert_eq!(result.imports[3].imported_names, vec!["U"]);
    }

    #[test]
    fn test_syntax_error_yields_none() {
        assert!(PythonExtractor::new()
            .extract("def broken(:\n", "x.py", Some("py"))
            .is_none());
    }

    #[test]
    fn test_deeply_nested_list_still_extracts() {
        let depth = 20_000;
        let source = format!(
            "import os\ngrid = {}0{}\n\ndef size():\n    return len(grid)\n",
            "[".repeat(depth),
            "]".repeat(depth)
        );
        let result = extract(&source);
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[0].name, "size");
    }
}
