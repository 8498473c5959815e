//! Baseline complexity weights for graph nodes.

use crate::core::ComponentType;
use serde::{Deserialize, Serialize};

/// Per-type contribution to a node's baseline complexity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeWeights {
    #[serde(default = "default_page_weight")]
    pub page: u32,
    #[serde(default = "default_component_weight")]
    pub component: u32,
    #[serde(default = "default_api_weight")]
    pub api: u32,
    #[serde(default = "default_service_weight")]
    pub service: u32,
    #[serde(default = "default_database_weight")]
    pub database: u32,
    #[serde(default = "default_auth_weight")]
    pub auth: u32,
    #[serde(default = "default_utility_weight")]
    pub utility: u32,
    #[serde(default = "default_config_weight")]
    pub config: u32,
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            page: default_page_weight(),
            component: default_component_weight(),
            api: default_api_weight(),
            service: default_service_weight(),
            database: default_database_weight(),
            auth: default_auth_weight(),
            utility: default_utility_weight(),
            config: default_config_weight(),
        }
    }
}

impl TypeWeights {
    pub fn weight(&self, component_type: ComponentType) -> u32 {
        match component_type {
            ComponentType::Page => self.page,
            ComponentType::Component => self.component,
            ComponentType::Api => self.api,
            ComponentType::Service => self.service,
            ComponentType::Database => self.database,
            ComponentType::Auth => self.auth,
            ComponentType::Utility => self.utility,
            ComponentType::Config => self.config,
        }
    }
}

/// Knobs for the node complexity baseline and degree boost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityConfig {
    /// Source lines per complexity point
    #[serde(default = "default_lines_per_point")]
    pub lines_per_point: u32,

    /// Bytes per point when content is absent
    #[serde(default = "default_bytes_per_point")]
    pub bytes_per_point: u64,

    #[serde(default = "default_size_cap")]
    pub size_cap: u32,

    #[serde(default = "default_control_flow_cap")]
    pub control_flow_cap: u32,

    /// Points per extracted component
    #[serde(default = "default_per_component")]
    pub per_component: u32,

    #[serde(default = "default_component_cap")]
    pub component_cap: u32,

    /// Points per touching edge
    #[serde(default = "default_degree_factor")]
    pub degree_factor: u32,

    #[serde(default = "default_degree_cap")]
    pub degree_cap: u32,

    #[serde(default)]
    pub type_weights: TypeWeights,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            lines_per_point: default_lines_per_point(),
            bytes_per_point: default_bytes_per_point(),
            size_cap: default_size_cap(),
            control_flow_cap: default_control_flow_cap(),
            per_component: default_per_component(),
            component_cap: default_component_cap(),
            degree_factor: default_degree_factor(),
            degree_cap: default_degree_cap(),
            type_weights: TypeWeights::default(),
        }
    }
}

fn default_lines_per_point() -> u32 {
    10
}

fn default_bytes_per_point() -> u64 {
    400
}

fn default_size_cap() -> u32 {
    30
}

fn default_control_flow_cap() -> u32 {
    40
}

fn default_per_component() -> u32 {
    2
}

fn default_component_cap() -> u32 {
    10
}

fn default_degree_factor() -> u32 {
    2
}

fn default_degree_cap() -> u32 {
    20
}

fn default_page_weight() -> u32 {
    15
}

fn default_component_weight() -> u32 {
    10
}

fn default_api_weight() -> u32 {
    15
}

fn default_service_weight() -> u32 {
    12
}

fn default_database_weight() -> u32 {
    12
}

fn default_auth_weight() -> u32 {
    15
}

fn default_utility_weight() -> u32 {
    5
}

fn default_config_weight() -> u32 {
    3
}
