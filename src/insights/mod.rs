//! Structural insights over a finished graph.
//!
//! Every function here is pure over `(nodes, edges)`. Ties are broken by
//! node id so results do not depend on input order.

use crate::core::{ComponentEdge, ComponentNode, ComponentType, GraphInsights};
use crate::graph::degree_map;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

pub const HIGH_COMPLEXITY_THRESHOLD: u32 = 50;
pub const CRITICAL_DEGREE_THRESHOLD: usize = 5;
pub const TOP_N: usize = 5;

pub const LAYERED_ARCHITECTURE: &str = "Layered Architecture";
pub const COMPONENT_BASED_ARCHITECTURE: &str = "Component-Based Architecture";
pub const API_FIRST_ARCHITECTURE: &str = "API-First Architecture";
pub const MICROSERVICES_PATTERN: &str = "Microservices Pattern";

pub fn generate_insights(nodes: &[ComponentNode], edges: &[ComponentEdge]) -> GraphInsights {
    let high_complexity = high_complexity(nodes);
    let isolated = isolated(nodes, edges);
    let critical = critical(nodes, edges);
    let patterns = patterns(nodes);
    let circular_dependencies = circular_dependencies(nodes, edges);

    let recommendations = recommendations(
        nodes,
        edges,
        &high_complexity,
        &isolated,
        &circular_dependencies,
    );

    GraphInsights {
        high_complexity,
        isolated,
        critical,
        patterns,
        recommendations,
        circular_dependencies,
    }
}

/// Up to five ids with complexity above 50, most complex first
pub fn high_complexity(nodes: &[ComponentNode]) -> Vec<String> {
    let mut candidates: Vec<&ComponentNode> = nodes
        .iter()
        .filter(|n| n.complexity > HIGH_COMPLEXITY_THRESHOLD)
        .collect();
    candidates.sort_by(|a, b| b.complexity.cmp(&a.complexity).then_with(|| a.id.cmp(&b.id)));
    candidates
        .into_iter()
        .take(TOP_N)
        .map(|n| n.id.clone())
        .collect()
}

/// Every id with no touching edge, in node order
pub fn isolated(nodes: &[ComponentNode], edges: &[ComponentEdge]) -> Vec<String> {
    let degrees = degree_map(nodes, edges);
    nodes
        .iter()
        .filter(|n| degrees.get(n.id.as_str()).copied().unwrap_or(0) == 0)
        .map(|n| n.id.clone())
        .collect()
}

/// Up to five ids with degree above 5, highest degree first
pub fn critical(nodes: &[ComponentNode], edges: &[ComponentEdge]) -> Vec<String> {
    let degrees = degree_map(nodes, edges);
    let mut candidates: Vec<(&str, usize)> = degrees
        .into_iter()
        .filter(|(_, d)| *d > CRITICAL_DEGREE_THRESHOLD)
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    candidates
        .into_iter()
        .take(TOP_N)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Coarse pattern labels from type counts
pub fn patterns(nodes: &[ComponentNode]) -> Vec<String> {
    let types: BTreeSet<ComponentType> = nodes.iter().map(|n| n.component_type).collect();
    let count = |t: ComponentType| nodes.iter().filter(|n| n.component_type == t).count();

    let mut patterns = Vec::new();
    if types.len() >= 3 {
        patterns.push(LAYERED_ARCHITECTURE.to_string());
    }
    if types.contains(&ComponentType::Component) {
        patterns.push(COMPONENT_BASED_ARCHITECTURE.to_string());
    }
    if types.contains(&ComponentType::Api) {
        patterns.push(API_FIRST_ARCHITECTURE.to_string());
    }
    if count(ComponentType::Service) > 3 {
        patterns.push(MICROSERVICES_PATTERN.to_string());
    }
    patterns
}

/// Strongly connected groups of two or more file nodes
pub fn circular_dependencies(nodes: &[ComponentNode], edges: &[ComponentEdge]) -> Vec<Vec<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for node in nodes.iter().filter(|n| !n.is_external()) {
        node_map.insert(node.id.as_str(), graph.add_node(node.id.as_str()));
    }
    for edge in edges {
        if let (Some(&source), Some(&target)) = (
            node_map.get(edge.source.as_str()),
            node_map.get(edge.target.as_str()),
        ) {
            graph.add_edge(source, target, ());
        }
    }

    let mut groups: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() >= 2)
        .map(|component| {
            let mut ids: Vec<String> = component.iter().map(|idx| graph[*idx].to_string()).collect();
            ids.sort();
            ids
        })
        .collect();
    groups.sort();
    groups
}

pub fn average_degree(nodes: &[ComponentNode], edges: &[ComponentEdge]) -> f64 {
    if nodes.is_empty() {
        0.0
    } else {
        (2 * edges.len()) as f64 / nodes.len() as f64
    }
}

pub fn recommendations(
    nodes: &[ComponentNode],
    edges: &[ComponentEdge],
    high_complexity: &[String],
    isolated: &[String],
    circular_dependencies: &[Vec<String>],
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if nodes.is_empty() {
        return recommendations;
    }

    if !high_complexity.is_empty() {
        recommendations.push(format!(
            "Consider refactoring {} high-complexity component(s): {}",
            high_complexity.len(),
            high_complexity.join(", ")
        ));
    }

    if !isolated.is_empty() {
        recommendations.push(format!(
            "{} isolated component(s) have no connections; check for dead code or missing imports",
            isolated.len()
        ));
    }

    let average = average_degree(nodes, edges);
    if average < 1.0 {
        recommendations.push(format!(
            "Low average connectivity ({:.2}); components may be loosely integrated",
            average
        ));
    } else if average > 5.0 {
        recommendations.push(format!(
            "High average connectivity ({:.2}); consider reducing coupling between components",
            average
        ));
    }

    let frameworks: BTreeSet<&str> = nodes
        .iter()
        .filter(|n| !n.is_external())
        .filter_map(|n| n.framework.as_deref())
        .collect();
    if frameworks.len() > 3 {
        recommendations.push(format!(
            "{} frameworks detected; consider consolidating the technology stack",
            frameworks.len()
        ));
    }

    if !circular_dependencies.is_empty() {
        recommendations.push(format!(
            "{} circular dependency group(s) detected; break cycles to improve modularity",
            circular_dependencies.len()
        ));
    }

    recommendations
}
