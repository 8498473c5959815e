//! File classification: architectural type, framework and language.

pub mod rules;

pub use rules::{RuleSet, RuleTable, DEFAULT_RULES_TOML};

use crate::core::{extension_of, ComponentType};
use serde::{Deserialize, Serialize};

/// Language reported for extensions missing from the table
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub component_type: ComponentType,
    pub framework: Option<String>,
    pub language: String,
}

/// Maps a path and its content to a [`Classification`] using a [`RuleSet`]
#[derive(Debug, Clone, Default)]
pub struct TypeClassifier {
    rules: RuleSet,
}

impl TypeClassifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(RuleSet::default())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn classify(&self, path: &str, content: &str) -> Classification {
        Classification {
            component_type: self.component_type(path, content),
            framework: self.framework(path, content),
            language: self.language(path),
        }
    }

    /// First matching path rule, then content rules, then `utility`
    pub fn component_type(&self, path: &str, content: &str) -> ComponentType {
        self.rules
            .type_rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.component_type)
            .or_else(|| {
                self.rules
                    .content_rules
                    .iter()
                    .find(|rule| rule.matches(path, content))
                    .map(|rule| rule.component_type)
            })
            .unwrap_or(ComponentType::Utility)
    }

    pub fn framework(&self, path: &str, content: &str) -> Option<String> {
        self.rules
            .frameworks
            .iter()
            .find(|rule| rule.matches(path, content))
            .map(|rule| rule.name.clone())
    }

    pub fn language(&self, path: &str) -> String {
        extension_of(path)
            .map(str::to_ascii_lowercase)
            .and_then(|ext| self.rules.languages.get(&ext).cloned())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
    }
}
