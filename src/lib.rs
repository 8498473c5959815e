// Export modules for library usage
pub mod analyzers;
pub mod classification;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod graph;
pub mod insights;
pub mod io;
pub mod observability;
pub mod pipeline;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    ActivityMetadata, ArchitectureGraph, CategoryBreakdown, CodeComponent, ComponentEdge,
    ComponentKind, ComponentNode, ComponentType, Error, GraphInsights, GraphStats, PackageJson,
    QualityCategory, QualityScore, RepositorySnapshot, Result, SourceFile, SubFactor,
};

pub use crate::analyzers::ComponentExtractor;
pub use crate::classification::{Classification, RuleSet, TypeClassifier};
pub use crate::complexity::ComplexityEngine;
pub use crate::config::ArchmapConfig;
pub use crate::graph::GraphBuilder;
pub use crate::insights::generate_insights;
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::pipeline::{analyze_repository, analyze_with_rules, AnalysisOutput};
pub use crate::scoring::ScoringEngine;
