// Test utility module for archmap integration tests
#![allow(dead_code)]

use archmap::core::{ArchitectureGraph, PackageJson, RepositorySnapshot, SourceFile};
use archmap::{analyze_repository, AnalysisOutput, ArchmapConfig};
use std::collections::HashMap;
use std::path::Path;

/// Snapshot of text files, with parent directories listed first
pub fn snapshot_of(files: &[(&str, &str)]) -> RepositorySnapshot {
    let mut dirs: Vec<String> = files
        .iter()
        .filter_map(|(path, _)| path.rsplit_once('/').map(|(dir, _)| dir.to_string()))
        .collect();
    dirs.sort();
    dirs.dedup();

    let mut entries: Vec<SourceFile> = dirs.into_iter().map(SourceFile::directory).collect();
    entries.extend(
        files
            .iter()
            .map(|(path, content)| SourceFile::new(*path, *content)),
    );
    RepositorySnapshot::new(entries)
}

pub fn package_json(dependencies: &[(&str, &str)]) -> PackageJson {
    PackageJson {
        dependencies: dependencies
            .iter()
            .map(|(name, version)| (name.to_string(), version.to_string()))
            .collect(),
        ..Default::default()
    }
}

pub fn analyze(snapshot: &RepositorySnapshot) -> AnalysisOutput {
    analyze_repository(snapshot, &ArchmapConfig::default())
}

/// Edges touching each node id
pub fn degrees(graph: &ArchitectureGraph) -> HashMap<String, usize> {
    archmap::graph::degree_map(&graph.nodes, &graph.edges)
        .into_iter()
        .map(|(id, degree)| (id.to_string(), degree))
        .collect()
}

pub fn assert_no_dangling_edges(graph: &ArchitectureGraph) {
    let dangling = graph.dangling_edges();
    assert!(dangling.is_empty(), "dangling edges: {:?}", dangling);
}

/// Write files under `root`, creating parent directories
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}
