//! Materializes nodes from classified files and resolves import edges.

use super::ids::{external_id, sanitize_id, IdAllocator};
use super::stats::compute_stats;
use crate::classification::Classification;
use crate::complexity::ComplexityEngine;
use crate::config::ComplexityConfig;
use crate::core::{
    file_name_of, ArchitectureGraph, ComponentEdge, ComponentNode, ComponentType, EdgeRelation,
    FileExtraction, ImportInfo, PackageJson, SourceFile,
};
use std::collections::{HashMap, HashSet};

/// Builds the node and edge sets for one analysis
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    complexity: ComplexityEngine,
}

impl GraphBuilder {
    pub fn new(config: ComplexityConfig) -> Self {
        Self {
            complexity: ComplexityEngine::new(config),
        }
    }

    /// Build nodes, edges and stats.
    ///
    /// `extractions` and `classifications` are aligned with `files`.
    /// Complexity is the pre-edge baseline and insights are left empty; the
    /// pipeline applies both afterwards.
    pub fn build(
        &self,
        files: &[SourceFile],
        extractions: &[FileExtraction],
        classifications: &[Classification],
        package_json: Option<&PackageJson>,
    ) -> ArchitectureGraph {
        if files.len() != extractions.len() || files.len() != classifications.len() {
            log::warn!(
                "Mismatched inputs: {} files, {} extractions, {} classifications",
                files.len(),
                extractions.len(),
                classifications.len()
            );
        }

        // Dependency ids are claimed first so `external_<name>` always
        // denotes the package; a colliding file takes the suffix.
        let mut ids = IdAllocator::new();
        let externals = package_json
            .map(|package_json| external_nodes(&mut ids, package_json))
            .unwrap_or_default();

        let mut nodes = Vec::new();
        // Import lists for file nodes, by node index
        let mut node_imports: Vec<&[ImportInfo]> = Vec::new();

        for ((file, extraction), classification) in
            files.iter().zip(extractions).zip(classifications)
        {
            if file.is_directory() {
                continue;
            }
            nodes.push(self.file_node(&mut ids, file, extraction, classification));
            node_imports.push(&extraction.imports);
        }

        nodes.extend(externals);

        let edges = resolve_edges(&nodes, &node_imports);
        let edges = verify_edges(&nodes, edges);
        let stats = compute_stats(&nodes, &edges);

        ArchitectureGraph {
            nodes,
            edges,
            stats,
            insights: Default::default(),
        }
    }

    fn file_node(
        &self,
        ids: &mut IdAllocator,
        file: &SourceFile,
        extraction: &FileExtraction,
        classification: &Classification,
    ) -> ComponentNode {
        let component_type = classification.component_type;
        let label = if file.name.is_empty() {
            file_name_of(&file.path).to_string()
        } else {
            file.name.clone()
        };

        ComponentNode {
            id: ids.allocate(sanitize_id(&file.path), &file.path),
            label,
            path: file.path.clone(),
            component_type,
            size: file.size,
            complexity: self.complexity.baseline(file, component_type, extraction),
            layer: component_type.layer().map(String::from),
            framework: classification.framework.clone(),
            language: Some(classification.language.clone()),
            is_directory: false,
        }
    }
}

/// One zero-size node per distinct dependency name
fn external_nodes(ids: &mut IdAllocator, package_json: &PackageJson) -> Vec<ComponentNode> {
    let mut seen = HashSet::new();
    package_json
        .all_dependency_names()
        .filter(|name| seen.insert(*name))
        .map(|name| ComponentNode {
            id: ids.allocate(external_id(name), name),
            label: name.to_string(),
            path: name.to_string(),
            component_type: ComponentType::Utility,
            size: 0,
            complexity: 0,
            layer: None,
            framework: Some(ComponentNode::EXTERNAL_FRAMEWORK.to_string()),
            language: None,
            is_directory: false,
        })
        .collect()
}

/// Lookup tables over node paths and labels
struct NodeIndex<'a> {
    nodes: &'a [ComponentNode],
    by_path: HashMap<&'a str, usize>,
    by_stem: HashMap<&'a str, usize>,
    by_label: HashMap<&'a str, usize>,
}

impl<'a> NodeIndex<'a> {
    fn new(nodes: &'a [ComponentNode]) -> Self {
        let mut by_path = HashMap::new();
        let mut by_stem = HashMap::new();
        let mut by_label = HashMap::new();

        for (idx, node) in nodes.iter().enumerate() {
            by_path.entry(node.path.as_str()).or_insert(idx);
            if let Some(stem) = strip_extension(&node.path) {
                by_stem.entry(stem).or_insert(idx);
            }
            by_label.entry(node.label.as_str()).or_insert(idx);
        }

        Self {
            nodes,
            by_path,
            by_stem,
            by_label,
        }
    }

    /// Exact path, then relative gap, then package segment
    fn resolve(&self, import: &ImportInfo) -> Option<usize> {
        let raw = import.raw_source.as_str();
        if let Some(idx) = self.by_path.get(raw).or_else(|| self.by_stem.get(raw)) {
            return Some(*idx);
        }

        // Relative specifiers would need the importer's directory and
        // bundler rules; they stay unresolved.
        if import.is_relative() {
            return None;
        }

        let segment = package_segment(raw)?;
        if let Some(idx) = self.by_label.get(segment) {
            return Some(*idx);
        }
        self.nodes
            .iter()
            .position(|n| n.label.contains(segment) || n.path.contains(segment))
    }
}

/// Leading package name: `@scope/pkg` or `pkg`
pub fn package_segment(specifier: &str) -> Option<&str> {
    let specifier = specifier.trim();
    if specifier.is_empty() {
        return None;
    }
    let end = if specifier.starts_with('@') {
        specifier
            .match_indices('/')
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or(specifier.len())
    } else {
        specifier.find('/').unwrap_or(specifier.len())
    };
    let segment = &specifier[..end];
    (!segment.is_empty()).then_some(segment)
}

fn strip_extension(path: &str) -> Option<&str> {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&path[..name_start + dot]),
    }
}

fn relation_for(source: &ComponentNode, target: &ComponentNode, import: &ImportInfo) -> EdgeRelation {
    use ComponentType::*;

    if target.is_external() {
        return EdgeRelation::Depends;
    }
    if import.reexport {
        return EdgeRelation::Exports;
    }
    match (source.component_type, target.component_type) {
        (Page | Component, Component) => EdgeRelation::Renders,
        (_, Api | Service) => EdgeRelation::Calls,
        (_, Database | Auth | Config) => EdgeRelation::Uses,
        _ => EdgeRelation::Imports,
    }
}

fn resolve_edges(nodes: &[ComponentNode], node_imports: &[&[ImportInfo]]) -> Vec<ComponentEdge> {
    let index = NodeIndex::new(nodes);
    let mut edges: Vec<ComponentEdge> = Vec::new();
    let mut merged: HashMap<(usize, usize), usize> = HashMap::new();

    for (source_idx, imports) in node_imports.iter().enumerate() {
        for import in imports.iter() {
            let Some(target_idx) = index.resolve(import) else {
                continue;
            };
            if target_idx == source_idx {
                continue;
            }

            let weight = import.imported_names.len().max(1) as f64;
            if let Some(existing) = merged.get(&(source_idx, target_idx)) {
                let edge = &mut edges[*existing];
                edge.strength = Some(edge.strength.unwrap_or(0.0) + weight);
                continue;
            }

            let source = &nodes[source_idx];
            let target = &nodes[target_idx];
            merged.insert((source_idx, target_idx), edges.len());
            edges.push(ComponentEdge {
                source: source.id.clone(),
                target: target.id.clone(),
                relation: relation_for(source, target, import),
                label: import.raw_source.clone(),
                strength: Some(weight),
            });
        }
    }

    edges
}

/// Drop any edge whose endpoint is not a node
fn verify_edges(nodes: &[ComponentNode], mut edges: Vec<ComponentEdge>) -> Vec<ComponentEdge> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let before = edges.len();
    edges.retain(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
    debug_assert_eq!(before, edges.len(), "graph builder produced dangling edges");
    edges
}
