//! Single-pass visitor over a JS/TS tree.
//!
//! One traversal collects declarations, imports and export aliases, and
//! records whether the file renders JSX.

use super::components::{
    doc_description, exported_names, extract_props, is_function_value, statement_anchor,
};
use super::imports;
use super::parser::{descendants, node_end_line, node_line, node_text};
use crate::complexity::count_branch_points;
use crate::core::ImportInfo;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationShape {
    Function,
    Class,
    /// `module.exports = fn` / `exports.name = fn`
    CommonJsExport,
}

/// A declaration before its kind is decided
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub shape: DeclarationShape,
    pub start_line: usize,
    pub end_line: usize,
    pub complexity: u32,
    pub props: Vec<String>,
    pub exports: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct JsVisitor<'s> {
    source: &'s str,
    pub contains_jsx: bool,
    pub declarations: Vec<Declaration>,
    pub imports: Vec<ImportInfo>,
    /// `(local, exported)` pairs from export clauses and CommonJS assignments
    pub export_aliases: Vec<(String, String)>,
}

impl<'s> JsVisitor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            contains_jsx: false,
            declarations: Vec::new(),
            imports: Vec::new(),
            export_aliases: Vec::new(),
        }
    }

    pub fn visit(&mut self, root: &Node) {
        for node in descendants(root) {
            self.visit_node(&node);
        }
    }

    fn visit_node(&mut self, node: &Node) {
        match node.kind() {
            "jsx_element" | "jsx_self_closing_element" | "jsx_fragment" => {
                self.contains_jsx = true;
            }
            "function_declaration" | "generator_function_declaration" => {
                self.visit_function_declaration(node);
            }
            "class_declaration" | "abstract_class_declaration" => self.visit_class(node),
            "variable_declarator" => self.visit_variable_declarator(node),
            "assignment_expression" => self.visit_assignment(node),
            "import_statement" => {
                if let Some(import) = imports::from_import_statement(node, self.source) {
                    self.imports.push(import);
                }
            }
            "export_statement" => self.visit_export_statement(node),
            "call_expression" => {
                if let Some(import) = imports::from_call_expression(node, self.source) {
                    self.imports.push(import);
                }
            }
            _ => {}
        }
    }

    fn visit_function_declaration(&mut self, node: &Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(&name, self.source).to_string();
        let anchor = statement_anchor(*node);

        self.declarations.push(Declaration {
            exports: exported_names(&anchor, &name),
            description: doc_description(&anchor, self.source),
            start_line: node_line(node),
            end_line: node_end_line(node),
            complexity: count_branch_points(node_text(node, self.source)),
            props: extract_props(node, self.source),
            shape: DeclarationShape::Function,
            name,
        });
    }

    fn visit_class(&mut self, node: &Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(&name, self.source).to_string();
        let anchor = statement_anchor(*node);

        self.declarations.push(Declaration {
            exports: exported_names(&anchor, &name),
            description: doc_description(&anchor, self.source),
            start_line: node_line(node),
            end_line: node_end_line(node),
            complexity: count_branch_points(node_text(node, self.source)),
            props: Vec::new(),
            shape: DeclarationShape::Class,
            name,
        });
    }

    /// `const Name = () => ...` / `const Name = function () {}`
    fn visit_variable_declarator(&mut self, node: &Node) {
        let (Some(name), Some(value)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) else {
            return;
        };
        if name.kind() != "identifier" || !is_function_value(value.kind()) {
            return;
        }
        let name = node_text(&name, self.source).to_string();

        // Line range spans the whole `const` statement
        let statement = node
            .parent()
            .filter(|p| matches!(p.kind(), "lexical_declaration" | "variable_declaration"))
            .unwrap_or(*node);
        let anchor = statement_anchor(statement);

        self.declarations.push(Declaration {
            exports: exported_names(&anchor, &name),
            description: doc_description(&anchor, self.source),
            start_line: node_line(&statement),
            end_line: node_end_line(&statement),
            complexity: count_branch_points(node_text(node, self.source)),
            props: extract_props(&value, self.source),
            shape: DeclarationShape::Function,
            name,
        });
    }

    /// CommonJS: `module.exports = ...`, `exports.name = ...`,
    /// `module.exports.name = ...`
    fn visit_assignment(&mut self, node: &Node) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        if left.kind() != "member_expression" {
            return;
        }

        let target = node_text(&left, self.source);
        let exported = if target == "module.exports" {
            "default".to_string()
        } else {
            let (Some(object), Some(property)) = (
                left.child_by_field_name("object"),
                left.child_by_field_name("property"),
            ) else {
                return;
            };
            let object = node_text(&object, self.source);
            if object != "exports" && object != "module.exports" {
                return;
            }
            node_text(&property, self.source).to_string()
        };

        match right.kind() {
            "identifier" => {
                let local = node_text(&right, self.source).to_string();
                self.export_aliases.push((local, exported));
            }
            "object" if exported == "default" => self.visit_exports_object(&right),
            kind if is_function_value(kind) => {
                let name = if exported == "default" {
                    right
                        .child_by_field_name("name")
                        .map(|n| node_text(&n, self.source).to_string())
                        .unwrap_or_else(|| exported.clone())
                } else {
                    exported.clone()
                };
                let statement = node.parent().unwrap_or(*node);

                self.declarations.push(Declaration {
                    exports: vec![exported],
                    description: doc_description(&statement, self.source),
                    start_line: node_line(&statement),
                    end_line: node_end_line(&statement),
                    complexity: count_branch_points(node_text(&right, self.source)),
                    props: extract_props(&right, self.source),
                    shape: DeclarationShape::CommonJsExport,
                    name,
                });
            }
            _ => {}
        }
    }

    /// `module.exports = { a, b: c }`
    fn visit_exports_object(&mut self, object: &Node) {
        let mut cursor = object.walk();
        for entry in object.named_children(&mut cursor) {
            match entry.kind() {
                "shorthand_property_identifier" => {
                    let name = node_text(&entry, self.source).to_string();
                    self.export_aliases.push((name.clone(), name));
                }
                "pair" => {
                    let (Some(key), Some(value)) = (
                        entry.child_by_field_name("key"),
                        entry.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    if value.kind() == "identifier" {
                        self.export_aliases.push((
                            node_text(&value, self.source).to_string(),
                            node_text(&key, self.source).to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_export_statement(&mut self, node: &Node) {
        if node.child_by_field_name("source").is_some() {
            if let Some(import) = imports::from_reexport(node, self.source) {
                self.imports.push(import);
            }
            return;
        }

        let mut cursor = node.walk();
        let mut is_default = false;
        for child in node.children(&mut cursor) {
            match child.kind() {
                "default" => is_default = true,
                "export_clause" => self.collect_export_clause(&child),
                _ => {}
            }
        }

        // `export default Name;`
        if is_default {
            if let Some(value) = node.child_by_field_name("value") {
                if value.kind() == "identifier" {
                    let local = node_text(&value, self.source).to_string();
                    self.export_aliases.push((local, "default".to_string()));
                }
            }
        }
    }

    fn collect_export_clause(&mut self, clause: &Node) {
        let mut cursor = clause.walk();
        for spec in clause.named_children(&mut cursor) {
            if spec.kind() != "export_specifier" {
                continue;
            }
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let local = node_text(&name, self.source).to_string();
            let exported = spec
                .child_by_field_name("alias")
                .map(|a| node_text(&a, self.source).to_string())
                .unwrap_or_else(|| local.clone());
            self.export_aliases.push((local, exported));
        }
    }

    /// Attach export aliases to the declarations they name
    pub fn resolve_export_aliases(&mut self) {
        for (local, exported) in std::mem::take(&mut self.export_aliases) {
            for declaration in self.declarations.iter_mut().filter(|d| d.name == local) {
                if !declaration.exports.contains(&exported) {
                    declaration.exports.push(exported.clone());
                }
            }
        }
    }
}
