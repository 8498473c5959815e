//! Ordered, data-driven classification rule tables.
//!
//! The tables are deserialized from TOML and compiled once. Each compiled
//! rule can be tested on its own through its `matches` method.

use crate::core::{ComponentType, Error, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The embedded default rule table
pub const DEFAULT_RULES_TOML: &str = include_str!("default_rules.toml");

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_toml_str(DEFAULT_RULES_TOML).expect("embedded default rules must compile")
});

/// Serialized form of a rule table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleTable {
    #[serde(default)]
    pub type_rules: Vec<TypeRuleDef>,
    #[serde(default)]
    pub content_rules: Vec<ContentRuleDef>,
    #[serde(default)]
    pub frameworks: Vec<FrameworkRuleDef>,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRuleDef {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRuleDef {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub content: Vec<String>,
    pub path_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkRuleDef {
    pub name: String,
    pub patterns: Vec<String>,
}

/// Path rule: any pattern matching the path selects `component_type`
#[derive(Debug, Clone)]
pub struct TypeRule {
    pub component_type: ComponentType,
    patterns: Vec<Regex>,
}

impl TypeRule {
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }
}

/// Content rule: content pattern plus a path keyword
#[derive(Debug, Clone)]
pub struct ContentRule {
    pub component_type: ComponentType,
    content: Vec<Regex>,
    path_keywords: Vec<String>,
}

impl ContentRule {
    pub fn matches(&self, path: &str, content: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.path_keywords.iter().any(|k| path.contains(k.as_str()))
            && self.content.iter().any(|p| p.is_match(content))
    }
}

/// Framework rule: any pattern matching content or path
#[derive(Debug, Clone)]
pub struct FrameworkRule {
    pub name: String,
    patterns: Vec<Regex>,
}

impl FrameworkRule {
    pub fn matches(&self, path: &str, content: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.is_match(content) || p.is_match(path))
    }
}

/// Compiled rule tables used by the classifier
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub type_rules: Vec<TypeRule>,
    pub content_rules: Vec<ContentRule>,
    pub frameworks: Vec<FrameworkRule>,
    pub languages: BTreeMap<String, String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl RuleSet {
    /// Parse and compile a TOML rule table
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: RuleTable = toml::from_str(text)?;
        Self::compile(table)
    }

    /// Load a rule table file, replacing the defaults entirely
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system("Failed to read rule table", path, e))?;
        let rules = Self::from_toml_str(&text)?;
        log::debug!(
            "Loaded {} type rules and {} framework rules from {}",
            rules.type_rules.len(),
            rules.frameworks.len(),
            path.display()
        );
        Ok(rules)
    }

    pub fn compile(table: RuleTable) -> Result<Self> {
        let type_rules = table
            .type_rules
            .into_iter()
            .map(|def| {
                let table_name = format!("type:{}", def.component_type);
                Ok(TypeRule {
                    component_type: def.component_type,
                    patterns: compile_patterns(&table_name, &def.patterns)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let content_rules = table
            .content_rules
            .into_iter()
            .map(|def| {
                let table_name = format!("content:{}", def.component_type);
                Ok(ContentRule {
                    component_type: def.component_type,
                    content: compile_patterns(&table_name, &def.content)?,
                    path_keywords: def
                        .path_keywords
                        .iter()
                        .map(|k| k.to_ascii_lowercase())
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let frameworks = table
            .frameworks
            .into_iter()
            .map(|def| {
                let table_name = format!("framework:{}", def.name);
                Ok(FrameworkRule {
                    patterns: compile_patterns(&table_name, &def.patterns)?,
                    name: def.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let languages = table
            .languages
            .into_iter()
            .map(|(ext, lang)| (ext.trim_start_matches('.').to_ascii_lowercase(), lang))
            .collect();

        Ok(Self {
            type_rules,
            content_rules,
            frameworks,
            languages,
        })
    }
}

fn compile_patterns(table: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::invalid_rule(table, p.clone(), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_rule(rules: &RuleSet, component_type: ComponentType) -> &TypeRule {
        rules
            .type_rules
            .iter()
            .find(|r| r.component_type == component_type)
            .unwrap()
    }

    #[test]
    fn test_default_rules_compile() {
        let rules = RuleSet::default();
        assert_eq!(rules.type_rules.len(), 7);
        assert_eq!(rules.content_rules.len(), 3);
        assert!(rules.frameworks.len() >= 9);
        assert_eq!(rules.languages.get("tsx").map(String::as_str), Some("TypeScript"));
    }

    #[test]
    fn test_type_rule_order_follows_table() {
        let rules = RuleSet::default();
        let order: Vec<_> = rules.type_rules.iter().map(|r| r.component_type).collect();
        assert_eq!(
            order,
            vec![
                ComponentType::Page,
                ComponentType::Component,
                ComponentType::Api,
                ComponentType::Service,
                ComponentType::Database,
                ComponentType::Auth,
                ComponentType::Config,
            ]
        );
    }

    #[test]
    fn test_individual_type_rules() {
        let rules = RuleSet::default();
        assert!(type_rule(&rules, ComponentType::Page).matches("src/pages/index.tsx"));
        assert!(type_rule(&rules, ComponentType::Page).matches("app/dashboard/page.tsx"));
        assert!(type_rule(&rules, ComponentType::Api).matches("src/api/users/route.ts"));
        assert!(type_rule(&rules, ComponentType::Database).matches("prisma/schema.prisma"));
        assert!(type_rule(&rules, ComponentType::Config).matches("tsconfig.json"));
        assert!(type_rule(&rules, ComponentType::Config).matches(".env.local"));
        assert!(!type_rule(&rules, ComponentType::Component).matches("src/gui/main.ts"));
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let rules = RuleSet::default();
        assert!(type_rule(&rules, ComponentType::Component).matches("src/Components/Nav.tsx"));
    }

    #[test]
    fn test_content_rule_needs_path_keyword() {
        let rules = RuleSet::default();
        let service = rules
            .content_rules
            .iter()
            .find(|r| r.component_type == ComponentType::Service)
            .unwrap();
        assert!(service.matches("src/lib/userService.ts", "export default class X {}"));
        assert!(!service.matches("src/lib/user.ts", "export default class X {}"));
        assert!(!service.matches("src/lib/userService.ts", "const x = 1;"));
    }

    #[test]
    fn test_framework_rule_matches_content_or_path() {
        let rules = RuleSet::default();
        let vue = rules.frameworks.iter().find(|f| f.name == "vue").unwrap();
        assert!(vue.matches("src/App.vue", ""));
        assert!(vue.matches("src/main.ts", "import { createApp } from 'vue'"));
        assert!(!vue.matches("src/main.ts", "import x from 'react'"));
    }

    #[test]
    fn test_invalid_regex_is_a_configuration_error() {
        let text = r#"
            [[type_rules]]
            type = "page"
            patterns = ["(unclosed"]
        "#;
        let err = RuleSet::from_toml_str(text).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { .. }));
        assert!(err.to_string().contains("type:page"));
    }

    #[test]
    fn test_unknown_component_type_is_rejected() {
        let text = r#"
            [[type_rules]]
            type = "widget"
            patterns = ["x"]
        "#;
        assert!(matches!(RuleSet::from_toml_str(text), Err(Error::Toml(_))));
    }

    #[test]
    fn test_custom_table_replaces_defaults() {
        let text = r#"
            [[type_rules]]
            type = "service"
            patterns = ['(^|/)workers/']

            [languages]
            ".ex" = "Elixir"
        "#;
        let rules = RuleSet::from_toml_str(text).unwrap();
        assert_eq!(rules.type_rules.len(), 1);
        assert!(rules.frameworks.is_empty());
        assert_eq!(rules.languages.get("ex").map(String::as_str), Some("Elixir"));
    }
}
