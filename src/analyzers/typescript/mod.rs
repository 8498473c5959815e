//! TypeScript/JavaScript component and import extraction
//!
//! Files are parsed with tree-sitter. A file that does not parse cleanly
//! with any candidate grammar yields no components and no imports.

pub mod components;
pub mod imports;
pub mod parser;
pub mod visitor;

use super::{is_hook_name, LanguageExtractor};
use crate::core::{CodeComponent, ComponentKind, FileExtraction};
use parser::{parse_clean, JsGrammar};
use visitor::{DeclarationShape, JsVisitor};

/// Extractor for one family of JS grammars
#[derive(Debug, Clone, Copy)]
pub struct TypeScriptExtractor {
    typescript: bool,
}

impl TypeScriptExtractor {
    pub fn typescript() -> Self {
        Self { typescript: true }
    }

    pub fn javascript() -> Self {
        Self { typescript: false }
    }

    fn candidates(&self, extension: Option<&str>) -> &'static [JsGrammar] {
        if self.typescript {
            JsGrammar::typescript_candidates(extension)
        } else {
            &[JsGrammar::JavaScript]
        }
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn extract(&self, content: &str, file_path: &str, extension: Option<&str>) -> Option<FileExtraction> {
        let (tree, grammar) = parse_clean(content, self.candidates(extension))?;
        log::trace!("Parsed {} with {:?} grammar", file_path, grammar);

        let mut visitor = JsVisitor::new(content);
        visitor.visit(&tree.root_node());
        visitor.resolve_export_aliases();

        let contains_jsx = visitor.contains_jsx;
        let components = visitor
            .declarations
            .into_iter()
            .map(|decl| {
                let kind = component_kind(&decl.name, decl.shape, contains_jsx);
                let takes_props = matches!(kind, ComponentKind::Component | ComponentKind::Hook);
                CodeComponent {
                    kind,
                    file_path: file_path.to_string(),
                    start_line: decl.start_line,
                    end_line: decl.end_line,
                    complexity: decl.complexity,
                    props: (takes_props && !decl.props.is_empty()).then_some(decl.props),
                    exports: (!decl.exports.is_empty()).then_some(decl.exports),
                    description: decl.description,
                    name: decl.name,
                }
            })
            .collect();

        Some(FileExtraction {
            components,
            imports: visitor.imports,
        })
    }
}

fn component_kind(name: &str, shape: DeclarationShape, contains_jsx: bool) -> ComponentKind {
    if is_hook_name(name) {
        ComponentKind::Hook
    } else if contains_jsx {
        ComponentKind::Component
    } else {
        match shape {
            DeclarationShape::Function => ComponentKind::Function,
            DeclarationShape::Class => ComponentKind::Class,
            DeclarationShape::CommonJsExport => ComponentKind::Util,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ImportKind;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn extract_ts(path: &str, source: &str) -> FileExtraction {
        let ext = crate::core::extension_of(path);
        TypeScriptExtractor::typescript()
            .extract(source, path, ext)
            .unwrap_or_default()
    }

    fn extract_js(source: &str) -> FileExtraction {
        TypeScriptExtractor::javascript()
            .extract(source, "src/index.js", Some("js"))
            .unwrap_or_default()
    }

    #[test]
    fn test_button_component() {
        let result = extract_ts(
            "src/components/Button.tsx",
            "export function Button(props){ if (props.disabled) return null; return <button/> }",
        );
        assert_eq!(result.components.len(), 1);
        let button = &result.components[0];
        assert_eq!(button.name, "Button");
        assert_eq!(button.kind, ComponentKind::Component);
        assert_eq!(button.complexity, 2);
        assert_eq!(button.start_line, 1);
        assert_eq!(button.end_line, 1);
        assert_eq!(button.props, Some(vec!["disabled".to_string()]));
        assert_eq!(button.exports, Some(vec!["Button".to_string()]));
        assert_eq!(button.file_path, "src/components/Button.tsx");
    }

    #[test]
    fn test_hooks_functions_and_classes() {
        let source = indoc! {r#"
            export const useCounter = (initial: number) => {
                return initial > 0 ? initial : 0;
            };

            function helper(a: number, b: number) {
                return a && b;
            }

            class Store {}
        "#};
        let result = extract_ts("src/lib/state.ts", source);
        let kinds: Vec<_> = result
            .components
            .iter()
            .map(|c| (c.name.as_str(), c.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("useCounter", ComponentKind::Hook),
                ("helper", ComponentKind::Function),
                ("Store", ComponentKind::Class),
            ]
        );
        let hook = &result.components[0];
        assert_eq!(hook.start_line, 1);
        assert_eq!(hook.end_line, 3);
        assert_eq!(hook.complexity, 2);
        assert_eq!(result.components[1].props, None);
    }

    #[test]
    fn test_destructured_props_and_default_export() {
        let source = indoc! {r#"
            /**
             * Shows a user card.
             */
            const Card = ({ title, user: owner, size = "md" }) => <div>{title}</div>;
            export default Card;
        "#};
        let result = extract_ts("src/components/Card.jsx", source);
        let card = &result.components[0];
        assert_eq!(card.kind, ComponentKind::Component);
        assert_eq!(
            card.props,
            Some(vec!["title".to_string(), "user".to_string(), "size".to_string()])
        );
        assert_eq!(card.exports, Some(vec!["default".to_string()]));
        assert_eq!(card.description.as_deref(), Some("Shows a user card."));
    }

    #[test]
    fn test_export_clause_aliases() {
        let source = indoc! {r#"
            function a() {}
            function b() {}
            export { a, b as default };
        "#};
        let result = extract_js(source);
        assert_eq!(result.components[0].exports, Some(vec!["a".to_string()]));
        assert_eq!(result.components[1].exports, Some(vec!["default".to_string()]));
    }

    #[test]
    fn test_es_imports() {
        let source = indoc! {r#"
            import React, { useState } from "react";
            import * as path from "path";
            import { Button } from "@/components/Button";
            import "./styles.css";
            export { helper } from "./helper";
        "#};
        let result = extract_js(source);
        assert_eq!(result.imports.len(), 5);

        assert_eq!(result.imports[0].raw_source, "react");
        assert_eq!(result.imports[0].kind, ImportKind::Default);
        assert_eq!(result.imports[0].imported_names, vec!["React", "useState"]);

        assert_eq!(result.imports[1].kind, ImportKind::Namespace);
        assert_eq!(result.imports[2].kind, ImportKind::Named);
        assert_eq!(result.imports[2].imported_names, vec!["Button"]);

        assert_eq!(result.imports[3].kind, ImportKind::Named);
        assert!(result.imports[3].imported_names.is_empty());

        assert!(result.imports[4].reexport);
        assert_eq!(result.imports[4].raw_source, "./helper");
    }

    #[test]
    fn test_require_and_dynamic_import() {
        let source = indoc! {r#"
            const express = require("express");
            async function load() {
                const mod = await import("./lazy");
                return mod;
            }
        "#};
        let result = extract_js(source);
        assert_eq!(result.imports[0].raw_source, "express");
        assert_eq!(result.imports[0].kind, ImportKind::Default);
        assert_eq!(result.imports[0].imported_names, vec!["express"]);
        assert_eq!(result.imports[1].raw_source, "./lazy");
        assert_eq!(result.imports[1].kind, ImportKind::Dynamic);
    }

    #[test]
    fn test_commonjs_exports_are_utils() {
        let source = indoc! {r#"
            exports.slugify = function (text) {
                return text.toLowerCase();
            };
            function clamp(x) { return x; }
            module.exports.clamp = clamp;
        "#};
        let result = extract_js(source);
        let slugify = result.components.iter().find(|c| c.name == "slugify").unwrap();
        assert_eq!(slugify.kind, ComponentKind::Util);
        assert_eq!(slugify.exports, Some(vec!["slugify".to_string()]));
        let clamp = result.components.iter().find(|c| c.name == "clamp").unwrap();
        assert_eq!(clamp.kind, ComponentKind::Function);
        assert_eq!(clamp.exports, Some(vec!["clamp".to_string()]));
    }

    #[test]
    fn test_parse_failure_yields_none() {
        let result = TypeScriptExtractor::typescript().extract(
            "export function (((",
            "src/broken.ts",
            Some("ts"),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_typescript_generics_parse_with_ts_grammar() {
        let source = "const value = <string>input;\nexport function id<T>(x: T): T { return x; }";
        let result = extract_ts("src/lib/id.ts", source);
        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[0].kind, ComponentKind::Function);
    }

    #[test]
    fn test_deeply_nested_array_still_extracts() {
        let depth = 20_000;
        let source = format!(
            "import axios from 'axios';\nconst grid = {}0{};\nexport function Table(props) {{ return <div title={{props.title}}>{{grid.length}}</div>; }}\n",
            "[".repeat(depth),
            "]".repeat(depth)
        );
        let result = extract_js(&source);
        assert_eq!(result.imports.len(), 1);
        let table = result.components.iter().find(|c| c.name == "Table").unwrap();
        assert_eq!(table.kind, ComponentKind::Component);
        assert_eq!(table.props, Some(vec!["title".to_string()]));
    }
}
