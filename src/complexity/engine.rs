//! Node complexity: a size/type/control-flow baseline computed before edges
//! exist, then a degree boost applied once the edge set is final.

use super::branching::count_branch_points;
use crate::config::ComplexityConfig;
use crate::core::{ComponentEdge, ComponentNode, ComponentType, FileExtraction, SourceFile};
use crate::graph::degree_map;

pub const MAX_COMPLEXITY: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct ComplexityEngine {
    config: ComplexityConfig,
}

impl ComplexityEngine {
    pub fn new(config: ComplexityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComplexityConfig {
        &self.config
    }

    /// Complexity of a file before any edges are known, in [0, 100]
    pub fn baseline(
        &self,
        file: &SourceFile,
        component_type: ComponentType,
        extraction: &FileExtraction,
    ) -> u32 {
        let c = &self.config;
        let type_weight = c.type_weights.weight(component_type);

        let total = match file.content.as_deref() {
            Some(content) => {
                let lines = content.lines().count() as u32;
                let size_part = (lines / c.lines_per_point.max(1)).min(c.size_cap);
                let flow_part = count_branch_points(content)
                    .saturating_sub(1)
                    .min(c.control_flow_cap);
                let component_part = (extraction.components.len() as u32)
                    .saturating_mul(c.per_component)
                    .min(c.component_cap);
                size_part
                    .saturating_add(type_weight)
                    .saturating_add(flow_part)
                    .saturating_add(component_part)
            }
            None => {
                let size_part = (file.size / c.bytes_per_point.max(1)).min(c.size_cap as u64);
                (size_part as u32).saturating_add(type_weight)
            }
        };

        total.min(MAX_COMPLEXITY)
    }

    /// Degree boost for one node
    pub fn degree_boost(&self, degree: usize) -> u32 {
        let degree = u32::try_from(degree).unwrap_or(u32::MAX);
        degree
            .saturating_mul(self.config.degree_factor)
            .min(self.config.degree_cap)
    }

    /// Apply the degree boost to every file node; virtual nodes stay at zero
    pub fn apply_degree_boost(&self, nodes: &mut [ComponentNode], edges: &[ComponentEdge]) {
        let degrees = degree_map(nodes, edges);
        let boosts: Vec<u32> = nodes
            .iter()
            .map(|n| {
                if n.is_external() {
                    0
                } else {
                    self.degree_boost(degrees.get(n.id.as_str()).copied().unwrap_or(0))
                }
            })
            .collect();

        for (node, boost) in nodes.iter_mut().zip(boosts) {
            node.complexity = node.complexity.saturating_add(boost).min(MAX_COMPLEXITY);
        }
    }
}
