//! Architecture graph construction.

pub mod builder;
pub mod ids;
pub mod stats;

pub use builder::{package_segment, GraphBuilder};
pub use ids::{external_id, sanitize_id, IdAllocator};
pub use stats::compute_stats;

use crate::core::{ComponentEdge, ComponentNode};
use std::collections::HashMap;

/// Edges touching each node, as source or target. Every node is present.
pub fn degree_map<'a>(
    nodes: &'a [ComponentNode],
    edges: &[ComponentEdge],
) -> HashMap<&'a str, usize> {
    let mut degrees: HashMap<&str, usize> = nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
    for edge in edges {
        if let Some(d) = degrees.get_mut(edge.source.as_str()) {
            *d += 1;
        }
        if let Some(d) = degrees.get_mut(edge.target.as_str()) {
            *d += 1;
        }
    }
    degrees
}
