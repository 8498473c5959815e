//! Architecture graph types.
//!
//! Field names are part of the contract with downstream renderers and
//! serialize in camelCase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Architectural role of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Page,
    Component,
    Api,
    Service,
    Database,
    Auth,
    Utility,
    Config,
}

impl ComponentType {
    pub const ALL: [ComponentType; 8] = [
        ComponentType::Page,
        ComponentType::Component,
        ComponentType::Api,
        ComponentType::Service,
        ComponentType::Database,
        ComponentType::Auth,
        ComponentType::Utility,
        ComponentType::Config,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Page => "page",
            ComponentType::Component => "component",
            ComponentType::Api => "api",
            ComponentType::Service => "service",
            ComponentType::Database => "database",
            ComponentType::Auth => "auth",
            ComponentType::Utility => "utility",
            ComponentType::Config => "config",
        }
    }

    /// Coarse architectural bucket; utilities have none
    pub fn layer(&self) -> Option<&'static str> {
        match self {
            ComponentType::Page => Some("pages"),
            ComponentType::Component => Some("components"),
            ComponentType::Api => Some("api"),
            ComponentType::Service => Some("services"),
            ComponentType::Database => Some("database"),
            ComponentType::Auth => Some("auth"),
            ComponentType::Config => Some("config"),
            ComponentType::Utility => None,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file, or a virtual external package, in the architecture graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: String,
    pub label: String,
    pub path: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub size: u64,
    pub complexity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub is_directory: bool,
}

impl ComponentNode {
    /// Framework marker carried by virtual package nodes
    pub const EXTERNAL_FRAMEWORK: &'static str = "external";

    pub fn is_external(&self) -> bool {
        self.framework.as_deref() == Some(Self::EXTERNAL_FRAMEWORK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRelation {
    Renders,
    Calls,
    Uses,
    Imports,
    Exports,
    Depends,
}

/// A detected relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEdge {
    pub source: String,
    pub target: String,
    pub relation: EdgeRelation,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

/// Derived counts; never maintained by hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Mean node degree (each edge counts once for each endpoint)
    pub average_connections: f64,
    pub layers: Vec<String>,
    pub frameworks: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInsights {
    pub high_complexity: Vec<String>,
    pub isolated: Vec<String>,
    pub critical: Vec<String>,
    pub patterns: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub circular_dependencies: Vec<Vec<String>>,
}

/// Result of one analysis; recomputed from scratch every run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureGraph {
    pub nodes: Vec<ComponentNode>,
    pub edges: Vec<ComponentEdge>,
    pub stats: GraphStats,
    pub insights: GraphInsights,
}

impl ArchitectureGraph {
    pub fn node(&self, id: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_by_path(&self, path: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| n.path == path)
    }

    /// Edges whose endpoints are missing from `nodes`; empty for any graph this crate builds
    pub fn dangling_edges(&self) -> Vec<&ComponentEdge> {
        let ids: std::collections::HashSet<&str> =
            self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mapping() {
        assert_eq!(ComponentType::Component.layer(), Some("components"));
        assert_eq!(ComponentType::Api.layer(), Some("api"));
        assert_eq!(ComponentType::Page.layer(), Some("pages"));
        assert_eq!(ComponentType::Utility.layer(), None);
    }

    #[test]
    fn test_node_serializes_type_field() {
        let node = ComponentNode {
            id: "src_a_ts".into(),
            label: "a.ts".into(),
            path: "src/a.ts".into(),
            component_type: ComponentType::Service,
            size: 10,
            complexity: 3,
            layer: Some("services".into()),
            framework: None,
            language: Some("TypeScript".into()),
            is_directory: false,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "service");
        assert_eq!(json["isDirectory"], false);
        assert!(json.get("framework").is_none());
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(GraphStats::default()).unwrap();
        assert_eq!(json["totalNodes"], 0);
        assert_eq!(json["averageConnections"], 0.0);
    }
}
