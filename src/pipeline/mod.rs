//! End-to-end analysis of one repository snapshot.
//!
//! Extraction and classification fan out per file, then join before the
//! graph is built. The degree boost runs only once edges exist, and
//! insights only once complexity is final. Quality scoring shares nothing
//! with graph construction and runs alongside it.

use crate::analyzers::ComponentExtractor;
use crate::classification::{Classification, RuleSet, TypeClassifier};
use crate::complexity::ComplexityEngine;
use crate::config::{ArchmapConfig, ParallelConfig};
use crate::core::{
    ArchitectureGraph, CategoryBreakdown, FileExtraction, QualityReport, QualityScore,
    RepositorySnapshot, SourceFile,
};
use crate::graph::GraphBuilder;
use crate::insights::generate_insights;
use crate::observability::{
    enter_recoverable, increment_processed, set_current_file, set_phase, set_progress,
    AnalysisPhase,
};
use crate::scoring::ScoringEngine;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{info, info_span};

/// Rayon thread stack size (8MB for deeply nested syntax trees)
pub const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Graph plus quality score for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub graph: ArchitectureGraph,
    pub quality: QualityScore,
    pub breakdown: Vec<CategoryBreakdown>,
}

/// Analyze with the rule table named by `config.rules_path`, or the embedded defaults.
///
/// A rule table that fails to load is reported and replaced by the defaults;
/// call [`analyze_with_rules`] to handle that error yourself.
pub fn analyze_repository(snapshot: &RepositorySnapshot, config: &ArchmapConfig) -> AnalysisOutput {
    analyze_with_rules(snapshot, config, load_rules(config))
}

pub fn load_rules(config: &ArchmapConfig) -> RuleSet {
    match &config.rules_path {
        Some(path) => RuleSet::from_path(path).unwrap_or_else(|e| {
            log::warn!(
                "Failed to load rules from {}: {}. Using embedded defaults.",
                path.display(),
                e
            );
            RuleSet::default()
        }),
        None => RuleSet::default(),
    }
}

pub fn analyze_with_rules(
    snapshot: &RepositorySnapshot,
    config: &ArchmapConfig,
    rules: RuleSet,
) -> AnalysisOutput {
    let span = info_span!(
        "analyze_repository",
        file_count = snapshot.files.len(),
        parallel = config.parallel.enabled,
    );
    let _guard = span.enter();

    info!(file_count = snapshot.files.len(), "Starting analysis");
    set_progress(0, snapshot.files.len());

    let classifier = TypeClassifier::new(rules);
    let scoring = ScoringEngine::new(config.scoring.clone());

    let (graph, report): (ArchitectureGraph, QualityReport) = run_in_pool(&config.parallel, || {
        rayon::join(
            || build_graph(snapshot, config, &classifier),
            || {
                let _phase = set_phase(AnalysisPhase::QualityScoring);
                let _span = info_span!("quality_scoring").entered();
                scoring.analyze(snapshot)
            },
        )
    });

    info!(
        nodes = graph.stats.total_nodes,
        edges = graph.stats.total_edges,
        overall = report.score.overall,
        "Analysis complete"
    );

    AnalysisOutput {
        graph,
        quality: report.score,
        breakdown: report.breakdown,
    }
}

/// Run `job` on a pool sized from `parallel`.
///
/// Sequential mode uses a single worker, so nested parallel iterators run
/// in order too. Without a concurrency cap the global pool is used.
fn run_in_pool<R: Send>(parallel: &ParallelConfig, job: impl FnOnce() -> R + Send) -> R {
    if parallel.enabled && parallel.max_concurrency.is_none() {
        return job();
    }

    let threads = if parallel.enabled {
        parallel.effective_concurrency()
    } else {
        1
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .stack_size(RAYON_STACK_SIZE)
        .build();
    match pool {
        Ok(pool) => pool.install(job),
        Err(e) => {
            log::warn!("Failed to build a {}-thread pool: {}. Using the global pool.", threads, e);
            job()
        }
    }
}

fn build_graph(
    snapshot: &RepositorySnapshot,
    config: &ArchmapConfig,
    classifier: &TypeClassifier,
) -> ArchitectureGraph {
    let extractor = ComponentExtractor::new();

    let per_file: Vec<(FileExtraction, Classification)> = {
        let _span = info_span!("extraction").entered();
        if config.parallel.enabled {
            snapshot
                .files
                .par_iter()
                .map(|file| extract_file(&extractor, classifier, file))
                .collect()
        } else {
            snapshot
                .files
                .iter()
                .map(|file| extract_file(&extractor, classifier, file))
                .collect()
        }
    };
    let (extractions, classifications): (Vec<_>, Vec<_>) = per_file.into_iter().unzip();

    let mut graph = {
        let _phase = set_phase(AnalysisPhase::GraphBuilding);
        let _span = info_span!("graph_building").entered();
        GraphBuilder::new(config.complexity.clone()).build(
            &snapshot.files,
            &extractions,
            &classifications,
            snapshot.package_json.as_ref(),
        )
    };

    {
        let _phase = set_phase(AnalysisPhase::ComplexityScoring);
        let _span = info_span!("complexity_boost").entered();
        ComplexityEngine::new(config.complexity.clone())
            .apply_degree_boost(&mut graph.nodes, &graph.edges);
    }

    {
        let _phase = set_phase(AnalysisPhase::InsightGeneration);
        let _span = info_span!("insight_generation").entered();
        graph.insights = generate_insights(&graph.nodes, &graph.edges);
    }

    graph
}

/// Classify one entry and extract its components.
///
/// A panic inside the parser degrades to an empty extraction for that file.
fn extract_file(
    extractor: &ComponentExtractor,
    classifier: &TypeClassifier,
    file: &SourceFile,
) -> (FileExtraction, Classification) {
    let _phase = set_phase(AnalysisPhase::Extraction);
    let _file = set_current_file(file.path.as_str());

    let content = file.text();
    let classification = classifier.classify(&file.path, content);

    let extraction = if file.is_directory() || file.content.is_none() {
        FileExtraction::empty()
    } else {
        let _recover = enter_recoverable();
        catch_unwind(AssertUnwindSafe(|| {
            extractor.extract_for_path(&file.path, content, &classification.language)
        }))
        .unwrap_or_else(|_| {
            log::warn!(
                "Extraction panicked for {}; continuing without components",
                file.path
            );
            FileExtraction::empty()
        })
    };

    increment_processed();
    (extraction, classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComponentType, PackageJson};
    use pretty_assertions::assert_eq;

    fn snapshot() -> RepositorySnapshot {
        RepositorySnapshot::new(vec![
            SourceFile::directory("src"),
            SourceFile::new(
                "src/components/Button.tsx",
                "export const Button = ({ label }) => <button>{label}</button>;\n",
            ),
            SourceFile::new(
                "src/pages/index.tsx",
                "import React from 'react';\nimport { Button } from 'Button';\nexport default function Home() { return <Button label=\"hi\" />; }\n",
            ),
            SourceFile::new("src/lib/format.ts", "export function format(x: number) { return x > 0 ? `${x}` : ''; }\n"),
        ])
        .with_package_json(PackageJson {
            dependencies: [("react".to_string(), "18.2.0".to_string())].into_iter().collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_pipeline_builds_graph_and_score() {
        let output = analyze_repository(&snapshot(), &ArchmapConfig::default());
        let graph = &output.graph;

        assert_eq!(graph.stats.total_nodes, 4);
        assert!(graph.dangling_edges().is_empty());
        let button = graph.node_by_path("src/components/Button.tsx").unwrap();
        assert_eq!(button.component_type, ComponentType::Component);
        assert!(graph.node("external_react").is_some());
        assert_eq!(output.breakdown.len(), 9);
        assert!((0.0..=100.0).contains(&output.quality.overall));
    }

    #[test]
    fn test_sequential_and_parallel_runs_agree() {
        let snapshot = snapshot();
        let parallel = analyze_repository(&snapshot, &ArchmapConfig::default());

        let mut config = ArchmapConfig::default();
        config.parallel = ParallelConfig::sequential();
        let sequential = analyze_repository(&snapshot, &config);

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_capped_concurrency_matches_default() {
        let snapshot = snapshot();
        let mut config = ArchmapConfig::default();
        config.parallel.max_concurrency = Some(2);
        assert_eq!(
            analyze_repository(&snapshot, &config),
            analyze_repository(&snapshot, &ArchmapConfig::default())
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let output = analyze_repository(&RepositorySnapshot::default(), &ArchmapConfig::default());
        assert!(output.graph.nodes.is_empty());
        assert!(output.graph.edges.is_empty());
        assert_eq!(output.graph.stats.average_connections, 0.0);
        assert!(output.graph.insights.recommendations.is_empty());
    }

    #[test]
    fn test_missing_rules_file_falls_back_to_defaults() {
        let mut config = ArchmapConfig::default();
        config.rules_path = Some("/nonexistent/archmap-rules.toml".into());
        let rules = load_rules(&config);
        assert_eq!(rules.type_rules.len(), RuleSet::default().type_rules.len());
    }

    #[test]
    fn test_deeply_nested_literals_are_analyzed() {
        let depth = 20_000;
        let js = format!("export const table = {}1{};\n", "[".repeat(depth), "]".repeat(depth));
        let py = format!("table = {}1{}\n", "[".repeat(depth), "]".repeat(depth));
        let snapshot = RepositorySnapshot::new(vec![
            SourceFile::new("src/lib/table.js", js),
            SourceFile::new("scripts/table.py", py),
        ]);

        let mut config = ArchmapConfig::default();
        config.parallel = ParallelConfig::sequential();
        let output = analyze_repository(&snapshot, &config);

        assert!(output.graph.node_by_path("src/lib/table.js").is_some());
        assert!(output.graph.node_by_path("scripts/table.py").is_some());
    }
}
