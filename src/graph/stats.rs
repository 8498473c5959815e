use crate::core::{ComponentEdge, ComponentNode, GraphStats};
use std::collections::BTreeSet;

/// Derive stats from the final node and edge sets.
///
/// `average_connections` is the mean degree (`2E / N`), zero for an empty
/// graph. Lists are sorted and distinct; `frameworks` leaves out the
/// virtual-node marker.
pub fn compute_stats(nodes: &[ComponentNode], edges: &[ComponentEdge]) -> GraphStats {
    let average_connections = if nodes.is_empty() {
        0.0
    } else {
        (2 * edges.len()) as f64 / nodes.len() as f64
    };

    let layers: BTreeSet<&str> = nodes.iter().filter_map(|n| n.layer.as_deref()).collect();
    let frameworks: BTreeSet<&str> = nodes
        .iter()
        .filter(|n| !n.is_external())
        .filter_map(|n| n.framework.as_deref())
        .collect();
    let languages: BTreeSet<&str> = nodes.iter().filter_map(|n| n.language.as_deref()).collect();

    GraphStats {
        total_nodes: nodes.len(),
        total_edges: edges.len(),
        average_connections,
        layers: layers.into_iter().map(String::from).collect(),
        frameworks: frameworks.into_iter().map(String::from).collect(),
        languages: languages.into_iter().map(String::from).collect(),
    }
}
